//! Event system for committing a tick atomically.
//!
//! A tick runs on a working copy of the colony. Deaths and births found during
//! the pass are queued as events and applied in one commit at the end, so the
//! live collection is never mutated while it is being iterated.

use tracing::{debug, trace};

use super::event_log::EventKind;
use super::mouse::Mouse;
use super::population::{Population, TickSummary};

/// Events produced while evaluating a tick.
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    /// A mouse died and must be removed.
    Died {
        /// Position of the mouse in the tick's working copy.
        index: usize,
        /// ID of the mouse that died.
        mouse_id: u64,
        /// Age at death.
        age: u32,
    },
    /// Two mice conceived. Their state is already updated in the working copy.
    Mated {
        /// ID of the initiating mouse.
        initiator_id: u64,
        /// ID of the partner.
        partner_id: u64,
    },
    /// A litter was born and waits for room in the colony.
    Born {
        /// ID of the mother.
        mother_id: u64,
        /// The newborn, not yet admitted.
        newborn: Mouse,
    },
}

/// Queue for collecting simulation events during a tick.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<SimulationEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Drains all events from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SimulationEvent> {
        self.events.drain(..)
    }
}

/// Commits a tick: removes the dead from `working`, installs the survivors,
/// then admits newborns in queue order until the ceiling is reached.
pub(crate) fn apply_events(
    population: &mut Population,
    working: Vec<Mouse>,
    mut queue: EventQueue,
) -> TickSummary {
    let tick = population.time_step();
    let events: Vec<SimulationEvent> = queue.drain().collect();

    let mut dead = vec![false; working.len()];
    for event in &events {
        if let SimulationEvent::Died { index, .. } = event {
            dead[*index] = true;
        }
    }
    let survivors = working
        .into_iter()
        .zip(dead)
        .filter_map(|(mouse, is_dead)| (!is_dead).then_some(mouse))
        .collect();
    population.replace_mice(survivors);

    let mut summary = TickSummary {
        tick,
        ..TickSummary::default()
    };

    for event in events {
        match event {
            SimulationEvent::Died { mouse_id, age, .. } => {
                summary.deaths += 1;
                trace!(tick, mouse_id, age, "mouse died");
                population.log_event(EventKind::Death { mouse_id, age });
            }
            SimulationEvent::Mated {
                initiator_id,
                partner_id,
            } => {
                summary.matings += 1;
                trace!(tick, initiator_id, partner_id, "mice mated");
                population.log_event(EventKind::Mating {
                    initiator_id,
                    partner_id,
                });
            }
            SimulationEvent::Born { mother_id, newborn } => {
                if let Some(newborn_id) = population.admit(newborn) {
                    summary.births += 1;
                    trace!(tick, mother_id, newborn_id, "mouse born");
                    population.log_event(EventKind::Birth {
                        mother_id,
                        newborn_id,
                    });
                } else {
                    summary.discarded_births += 1;
                    debug!(tick, mother_id, "colony full, newborn discarded");
                    population.log_event(EventKind::BirthDiscarded { mother_id });
                }
            }
        }
    }

    summary.population = population.population_size();
    summary.pregnant = population.mice().iter().filter(|m| m.is_pregnant()).count();
    summary
}
