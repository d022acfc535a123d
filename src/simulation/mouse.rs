//! Mouse behavior, state, and lifecycle management.
//!
//! A mouse ages once per tick, may die with an age-weighted probability, picks
//! and mates with compatible partners, and carries a litter through gestation.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::params::{GestationPolicy, Params};

/// Reproductive state of a mouse.
///
/// A countdown only exists while carrying, so a non-pregnant mouse can never
/// hold a pending birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gestation {
    /// Not pregnant.
    #[default]
    Idle,
    /// Carrying a litter that is born when the countdown reaches zero.
    Carrying {
        /// Remaining ticks before birth; always at least 1.
        ticks_until_birth: u32,
    },
    /// Flagged pregnant by a mating it did not initiate, with no litter
    /// scheduled. Only an intervention returns such a mouse to [`Gestation::Idle`].
    Bonded,
}

impl Gestation {
    /// Whether this state counts as pregnant.
    pub fn is_pregnant(self) -> bool {
        !matches!(self, Gestation::Idle)
    }

    /// Remaining ticks before birth, or 0 if no litter is scheduled.
    pub fn ticks_until_birth(self) -> u32 {
        match self {
            Gestation::Carrying { ticks_until_birth } => ticks_until_birth,
            Gestation::Idle | Gestation::Bonded => 0,
        }
    }
}

/// A simulated mouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mouse {
    /// Identifier assigned when the mouse joins a population; 0 until then.
    pub id: u64,
    /// Fixed social rank, used only to filter compatible mates.
    pub social_rank: u32,
    /// Ticks survived.
    pub age: u32,
    gestation: Gestation,
}

impl Mouse {
    /// Creates a newborn (age 0, not pregnant) with the given social rank.
    pub fn new(social_rank: u32) -> Self {
        Self {
            id: 0,
            social_rank,
            age: 0,
            gestation: Gestation::Idle,
        }
    }

    /// Creates a newborn with a rank drawn uniformly from the configured range.
    pub fn new_random<R: Rng>(params: &Params, rng: &mut R) -> Self {
        Self::new(rng.random_range(params.min_social_rank..=params.max_social_rank))
    }

    /// Current reproductive state.
    pub fn gestation(&self) -> Gestation {
        self.gestation
    }

    /// Checks if the mouse is pregnant, whether or not it carries a countdown.
    pub fn is_pregnant(&self) -> bool {
        self.gestation.is_pregnant()
    }

    /// Remaining ticks before this mouse gives birth, or 0.
    pub fn ticks_until_birth(&self) -> u32 {
        self.gestation.ticks_until_birth()
    }

    /// Increments the mouse's age by one tick.
    pub fn age_one_tick(&mut self) {
        self.age += 1;
    }

    /// Per-tick death probability at the current age.
    ///
    /// Ramps linearly from 0 towards `base_death_rate` until `elder_age`, then
    /// drops to the flat `base_death_rate * elder_death_factor`.
    pub fn death_probability(&self, params: &Params) -> f64 {
        if self.age < params.elder_age {
            params.base_death_rate * (f64::from(self.age) / f64::from(params.elder_age))
        } else {
            params.base_death_rate * params.elder_death_factor
        }
    }

    /// Rolls for death this tick.
    ///
    /// # Returns
    ///
    /// `true` if the mouse dies. Consumes exactly one draw from `rng`.
    pub fn evaluate_death<R: Rng>(&self, params: &Params, rng: &mut R) -> bool {
        let roll: f64 = rng.random();
        roll < self.death_probability(params)
    }

    /// Checks if the mouse is old enough to mate.
    pub fn is_mature(&self, params: &Params) -> bool {
        self.age >= params.maturity_age
    }

    /// Checks if the social rank gap to `other` is within tolerance.
    pub fn is_rank_compatible(&self, other: &Mouse, params: &Params) -> bool {
        self.social_rank.abs_diff(other.social_rank) <= params.rank_tolerance
    }

    /// Checks if `other` could be picked as this mouse's partner: not pregnant,
    /// mature, and rank compatible.
    pub fn is_suitable_partner(&self, other: &Mouse, params: &Params) -> bool {
        !other.is_pregnant() && other.is_mature(params) && self.is_rank_compatible(other, params)
    }

    /// Picks a uniformly random partner among suitable candidates.
    ///
    /// A candidate is suitable if it is not pregnant, mature, and rank
    /// compatible. The caller must not pass `self` among the candidates.
    ///
    /// # Returns
    ///
    /// The chosen candidate, or `None` if no candidate is suitable. No draw is
    /// taken when nothing is suitable.
    pub fn select_partner<'a, R: Rng>(
        &self,
        candidates: impl IntoIterator<Item = &'a Mouse>,
        params: &Params,
        rng: &mut R,
    ) -> Option<&'a Mouse> {
        let suitable: Vec<&Mouse> = candidates
            .into_iter()
            .filter(|m| self.is_suitable_partner(m, params))
            .collect();

        suitable.choose(rng).copied()
    }

    /// Tries to conceive with `partner`.
    ///
    /// Nothing happens if either mouse is pregnant or immature, if their ranks
    /// are too far apart, or if the mating roll fails. The roll is only drawn
    /// once every other condition holds.
    ///
    /// # Returns
    ///
    /// `true` if both mice became pregnant.
    pub fn attempt_mate<R: Rng>(
        &mut self,
        partner: &mut Mouse,
        params: &Params,
        rng: &mut R,
    ) -> bool {
        if self.is_pregnant() || partner.is_pregnant() {
            return false;
        }
        if !self.is_mature(params) || !partner.is_mature(params) {
            return false;
        }
        if !self.is_rank_compatible(partner, params) {
            return false;
        }
        if !rng.random_bool(params.mating_probability) {
            return false;
        }

        let carrying = Gestation::Carrying {
            ticks_until_birth: params.gestation_ticks,
        };
        self.gestation = carrying;
        partner.gestation = match params.gestation_policy {
            GestationPolicy::InitiatorCarries => Gestation::Bonded,
            GestationPolicy::BothCarry => carrying,
        };
        true
    }

    /// Advances gestation by one tick.
    ///
    /// # Returns
    ///
    /// The newborn when the countdown reaches zero. A mouse without a
    /// countdown is left untouched and yields `None`.
    pub fn advance_gestation<R: Rng>(
        &mut self,
        params: &Params,
        rng: &mut R,
    ) -> Option<Mouse> {
        let Gestation::Carrying { ticks_until_birth } = self.gestation else {
            return None;
        };

        let remaining = ticks_until_birth.saturating_sub(1);
        if remaining > 0 {
            self.gestation = Gestation::Carrying {
                ticks_until_birth: remaining,
            };
            return None;
        }

        self.gestation = Gestation::Idle;
        Some(Mouse::new_random(params, rng))
    }

    /// Returns the mouse to [`Gestation::Idle`], dropping any pending litter.
    pub fn end_pregnancy(&mut self) {
        self.gestation = Gestation::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aged(age: u32) -> Mouse {
        let mut mouse = Mouse::new(50);
        mouse.age = age;
        mouse
    }

    #[test]
    fn newborn_has_no_death_risk() {
        let params = Params::default();
        assert!(aged(0).death_probability(&params).abs() < f64::EPSILON);
    }

    #[test]
    fn death_risk_ramps_until_elder_age() {
        let params = Params::default();
        assert!((aged(20).death_probability(&params) - 0.125).abs() < 1e-12);
        assert!((aged(39).death_probability(&params) - 0.25 * 39.0 / 40.0).abs() < 1e-12);
    }

    #[test]
    fn elders_use_reduced_flat_rate() {
        let params = Params::default();
        assert!((aged(40).death_probability(&params) - 0.0375).abs() < 1e-12);
        assert!((aged(400).death_probability(&params) - 0.0375).abs() < 1e-12);
    }
}
