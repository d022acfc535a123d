//! Colony simulation with a hard population ceiling.
//!
//! The population owns the live mice and drives one tick at a time:
//! - every mouse of the start-of-tick snapshot ages, then rolls for death
//! - survivors look for a partner among the other live mice and may mate
//! - carrying mice advance gestation and queue newborns
//! - deaths and births are committed together at the end of the tick

use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::PopulationError;
use super::event_log::{EventKind, EventLog};
use super::events::{self, EventQueue, SimulationEvent};
use super::intervention::Intervention;
use super::mouse::Mouse;
use super::params::Params;

/// Aggregate outcome of one committed tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    /// Tick the summary belongs to.
    pub tick: u64,
    /// Live mice after the commit.
    pub population: usize,
    /// Mice removed this tick.
    pub deaths: usize,
    /// Successful matings this tick.
    pub matings: usize,
    /// Newborns admitted this tick.
    pub births: usize,
    /// Newborns dropped because the ceiling was reached.
    pub discarded_births: usize,
    /// Pregnant mice after the commit.
    pub pregnant: usize,
}

/// Per-mouse view handed to reporting code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CensusEntry {
    /// Mouse identifier.
    pub id: u64,
    /// Social rank.
    pub social_rank: u32,
    /// Age in ticks.
    pub age: u32,
    /// Whether the mouse is pregnant.
    pub pregnant: bool,
    /// Remaining gestation ticks, 0 if no litter is scheduled.
    pub ticks_until_birth: u32,
}

/// A closed colony of mice.
///
/// All randomness is drawn from the single stream owned by the population, so
/// a seeded population replays identically.
#[derive(Debug, Clone)]
pub struct Population {
    mice: Vec<Mouse>,
    params: Params,
    time_step: u64,
    next_id: u64,
    rng: SmallRng,
    event_log: EventLog,
    last_summary: Option<TickSummary>,
}

impl Population {
    /// Creates a colony of `initial_population` founders under a ceiling of
    /// `max_population`, using default parameters otherwise.
    pub fn new(
        initial_population: usize,
        max_population: usize,
        rng: SmallRng,
    ) -> Result<Self, PopulationError> {
        let params = Params {
            initial_population,
            max_population,
            ..Params::default()
        };
        Self::with_rng(params, rng)
    }

    /// Like [`Population::new`], seeding the stream from `seed`.
    pub fn seeded(
        initial_population: usize,
        max_population: usize,
        seed: u64,
    ) -> Result<Self, PopulationError> {
        Self::new(
            initial_population,
            max_population,
            SmallRng::seed_from_u64(seed),
        )
    }

    /// Creates a colony from parameters, seeding from `params.rng_seed`.
    pub fn from_params(params: Params) -> Result<Self, PopulationError> {
        let rng = params.seeded_rng();
        Self::with_rng(params, rng)
    }

    /// Creates a colony from parameters and an explicit random stream.
    ///
    /// Founders are age 0, not pregnant, and get a uniformly random rank.
    pub fn with_rng(params: Params, rng: SmallRng) -> Result<Self, PopulationError> {
        params.validate()?;

        let mut population = Self {
            mice: Vec::with_capacity(params.max_population),
            time_step: 0,
            next_id: 1,
            rng,
            event_log: EventLog::new(params.event_log_capacity),
            last_summary: None,
            params,
        };

        for _ in 0..population.params.initial_population {
            let ranks = population.params.min_social_rank..=population.params.max_social_rank;
            let rank = population.rng.random_range(ranks);
            population.add_agent(rank);
        }

        debug!(
            founders = population.mice.len(),
            max_population = population.params.max_population,
            "colony founded"
        );
        Ok(population)
    }

    /// Adds a newborn with the given rank if the colony has room.
    ///
    /// # Returns
    ///
    /// The new mouse's ID, or `None` if the colony is full.
    pub fn add_agent(&mut self, social_rank: u32) -> Option<u64> {
        self.admit(Mouse::new(social_rank))
    }

    /// Advances the colony by one tick.
    ///
    /// Mice are evaluated in insertion order on a working copy. A mouse marked
    /// dead is never offered as a partner afterwards, and newborns do not act
    /// until the next tick. Deaths are committed before births, and births
    /// beyond the ceiling are discarded.
    pub fn update(&mut self) {
        let params = &self.params;
        let mut working = self.mice.clone();
        let mut dead = vec![false; working.len()];
        let mut queue = EventQueue::new();

        for i in 0..working.len() {
            working[i].age_one_tick();

            if working[i].evaluate_death(params, &mut self.rng) {
                dead[i] = true;
                queue.push(SimulationEvent::Died {
                    index: i,
                    mouse_id: working[i].id,
                    age: working[i].age,
                });
                continue;
            }

            // Same pick as `Mouse::select_partner`, keeping working-copy indices.
            let suitable: Vec<usize> = working
                .iter()
                .enumerate()
                .filter(|&(j, mouse)| {
                    j != i && !dead[j] && working[i].is_suitable_partner(mouse, params)
                })
                .map(|(j, _)| j)
                .collect();
            if let Some(&j) = suitable.choose(&mut self.rng) {
                let (mouse, partner) = pair_mut(&mut working, i, j);
                if mouse.attempt_mate(partner, params, &mut self.rng) {
                    queue.push(SimulationEvent::Mated {
                        initiator_id: mouse.id,
                        partner_id: partner.id,
                    });
                }
            }

            if let Some(newborn) = working[i].advance_gestation(params, &mut self.rng) {
                queue.push(SimulationEvent::Born {
                    mother_id: working[i].id,
                    newborn,
                });
            }
        }

        self.time_step += 1;
        let summary = events::apply_events(self, working, queue);
        debug!(
            tick = summary.tick,
            population = summary.population,
            deaths = summary.deaths,
            matings = summary.matings,
            births = summary.births,
            discarded = summary.discarded_births,
            "tick committed"
        );
        self.last_summary = Some(summary);
    }

    /// Applies an intervention to the live colony.
    pub fn apply_intervention(&mut self, intervention: Intervention) {
        let mice = std::mem::take(&mut self.mice);
        let (mice, kind) = intervention.apply(mice, &mut self.rng);
        self.mice = mice;
        debug!(tick = self.time_step, ?kind, "intervention applied");
        self.log_event(kind);
    }

    /// Number of live mice.
    pub fn population_size(&self) -> usize {
        self.mice.len()
    }

    /// Population ceiling.
    pub fn max_population(&self) -> usize {
        self.params.max_population
    }

    /// Number of ticks simulated so far.
    pub fn time_step(&self) -> u64 {
        self.time_step
    }

    /// Parameters the colony runs with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Live mice in insertion order.
    pub fn mice(&self) -> &[Mouse] {
        &self.mice
    }

    /// Snapshot of every live mouse for external aggregation.
    pub fn census(&self) -> Vec<CensusEntry> {
        self.mice
            .iter()
            .map(|m| CensusEntry {
                id: m.id,
                social_rank: m.social_rank,
                age: m.age,
                pregnant: m.is_pregnant(),
                ticks_until_birth: m.ticks_until_birth(),
            })
            .collect()
    }

    /// Recent events, newest first.
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Summary of the most recent tick, if any has run.
    pub fn last_summary(&self) -> Option<&TickSummary> {
        self.last_summary.as_ref()
    }

    pub(crate) fn admit(&mut self, mut mouse: Mouse) -> Option<u64> {
        if self.mice.len() >= self.params.max_population {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        mouse.id = id;
        self.mice.push(mouse);
        Some(id)
    }

    pub(crate) fn replace_mice(&mut self, mice: Vec<Mouse>) {
        self.mice = mice;
    }

    pub(crate) fn log_event(&mut self, kind: EventKind) {
        self.event_log.log(self.time_step, kind);
    }
}

fn pair_mut(mice: &mut [Mouse], a: usize, b: usize) -> (&mut Mouse, &mut Mouse) {
    debug_assert_ne!(a, b, "a mouse cannot pair with itself");
    if a < b {
        let (left, right) = mice.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = mice.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::mouse::Gestation;

    fn mouse(id: u64, social_rank: u32, age: u32) -> Mouse {
        let mut mouse = Mouse::new(social_rank);
        mouse.id = id;
        mouse.age = age;
        mouse
    }

    #[test]
    fn mouse_dead_this_tick_is_not_offered_as_partner() {
        // The elder rate is certain death; the ramp below it is negligible.
        let params = Params {
            initial_population: 1,
            max_population: 10,
            base_death_rate: 1.0,
            elder_death_factor: 1.0,
            elder_age: u32::MAX,
            mating_probability: 1.0,
            event_log_capacity: 16,
            ..Params::default()
        };
        let mut population =
            Population::with_rng(params, SmallRng::seed_from_u64(3)).expect("valid params");
        population.mice = vec![mouse(1, 50, u32::MAX - 1), mouse(2, 50, 4)];
        population.next_id = 3;

        population.update();

        let summary = population.last_summary().expect("summary");
        assert_eq!(summary.deaths, 1);
        assert_eq!(summary.matings, 0);
        assert_eq!(population.population_size(), 1);

        let survivor = &population.mice()[0];
        assert_eq!(survivor.id, 2);
        assert_eq!(survivor.gestation(), Gestation::Idle);
        assert!(
            population
                .event_log()
                .events()
                .iter()
                .all(|e| !matches!(e.kind, EventKind::Mating { .. }))
        );
    }

    #[test]
    fn surviving_earlier_mouse_is_offered_as_partner() {
        let params = Params {
            initial_population: 1,
            max_population: 10,
            base_death_rate: 0.0,
            mating_probability: 1.0,
            ..Params::default()
        };
        let mut population =
            Population::with_rng(params, SmallRng::seed_from_u64(3)).expect("valid params");
        population.mice = vec![mouse(1, 50, 10), mouse(2, 50, 4)];
        population.next_id = 3;

        population.update();

        assert_eq!(population.last_summary().map(|s| s.matings), Some(1));
        let carrying = Gestation::Carrying {
            ticks_until_birth: 19,
        };
        assert_eq!(population.mice()[0].gestation(), carrying);
        assert_eq!(population.mice()[1].gestation(), Gestation::Bonded);
    }
}
