//! Event logging system for reporting recent colony events.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// What happened to the colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A mouse died of old age or bad luck.
    Death {
        /// ID of the mouse that died.
        mouse_id: u64,
        /// Age at death.
        age: u32,
    },
    /// Two mice conceived.
    Mating {
        /// ID of the mouse that initiated the mating.
        initiator_id: u64,
        /// ID of the chosen partner.
        partner_id: u64,
    },
    /// A newborn joined the colony.
    Birth {
        /// ID of the mother.
        mother_id: u64,
        /// ID assigned to the newborn.
        newborn_id: u64,
    },
    /// A newborn was discarded because the colony was full.
    BirthDiscarded {
        /// ID of the mother.
        mother_id: u64,
    },
    /// A cull removed part of the colony.
    Cull {
        /// Number of mice removed.
        removed: usize,
    },
    /// All pregnancies were ended.
    PregnanciesEnded {
        /// Number of mice that were pregnant.
        ended: usize,
    },
}

/// A logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Tick at which the event was committed
    pub tick: u64,
    /// What happened
    pub kind: EventKind,
}

/// Event log that tracks recent colony events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    /// Recent events, newest first
    events: VecDeque<LoggedEvent>,
    /// Maximum number of events to keep
    max_events: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventLog {
    /// Creates a new event log with specified capacity. Zero disables logging.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Adds a new event to the log
    pub fn log(&mut self, tick: u64, kind: EventKind) {
        if self.max_events == 0 {
            return;
        }

        self.events.push_front(LoggedEvent { tick, kind });

        // Keep only the most recent events
        while self.events.len() > self.max_events {
            self.events.pop_back();
        }
    }

    /// Returns all events, newest first
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.events
    }

    /// Number of events currently held
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Checks if the log holds no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clears all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
