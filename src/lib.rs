//! # Universe25 - Closed Colony Population Simulation
//!
//! A discrete-time simulation of a closed mouse colony. Mice age, die with an
//! age-weighted probability, pick partners of similar social rank, carry
//! litters through gestation, and give birth, all under a hard population
//! ceiling.
//!
//! ## Features
//!
//! - Age-weighted mortality with a reduced elder rate
//! - Rank-filtered partner selection and stochastic mating
//! - Gestation as an explicit state machine
//! - Snapshot-then-commit ticks with a deterministic add/remove order
//! - A single seedable random stream per colony
//! - Bounded event log and per-tick summaries for reporting front ends
//! - Culling and pregnancy interventions
//!
//! ## Core Modules
//!
//! - [`simulation::mouse`] - Mouse behavior and state
//! - [`simulation::population`] - Colony tick logic
//! - [`simulation::params`] - Simulation parameters
//! - [`simulation::events`] - Tick commit
//! - [`simulation::event_log`] - Recent event history

/// Core simulation logic and data structures.
pub mod simulation {
    /// Configuration errors.
    pub mod error;
    /// Bounded log of recent colony events.
    pub mod event_log;
    /// Event queue used to commit a tick atomically.
    pub mod events;
    /// External interventions such as culls.
    pub mod intervention;
    /// Mouse behavior, state, and lifecycle.
    pub mod mouse;
    /// Simulation parameters.
    pub mod params;
    /// Colony state and the per-tick update.
    pub mod population;
}

pub use simulation::error::PopulationError;
pub use simulation::intervention::Intervention;
pub use simulation::mouse::{Gestation, Mouse};
pub use simulation::params::{GestationPolicy, Params};
pub use simulation::population::{CensusEntry, Population, TickSummary};
