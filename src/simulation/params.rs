//! Simulation parameters and their validation.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use super::error::PopulationError;

/// Which mates start a gestation countdown after a successful mating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestationPolicy {
    /// Only the initiating mouse carries a litter. The partner is flagged
    /// pregnant but has no countdown, so it never gives birth on its own.
    #[default]
    InitiatorCarries,
    /// Both mates start an independent countdown and each gives birth.
    BothCarry,
}

/// Simulation parameters that control colony behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Number of founding mice.
    pub initial_population: usize,
    /// Maximum number of live mice (hard cap).
    pub max_population: usize,
    /// Optional RNG seed for reproducible runs.
    pub rng_seed: Option<u64>,
    /// Per-tick death probability that the age ramp scales towards.
    pub base_death_rate: f64,
    /// Multiplier applied to `base_death_rate` once a mouse reaches `elder_age`.
    pub elder_death_factor: f64,
    /// Age at which the linear death ramp stops and the elder rate applies.
    pub elder_age: u32,
    /// Minimum age for a mouse to mate or be chosen as a partner.
    pub maturity_age: u32,
    /// Largest social rank gap two mice can bridge when mating.
    pub rank_tolerance: u32,
    /// Probability that a compatible pair actually conceives.
    pub mating_probability: f64,
    /// Ticks between conception and birth.
    pub gestation_ticks: u32,
    /// Lowest social rank assigned to a new mouse (inclusive).
    pub min_social_rank: u32,
    /// Highest social rank assigned to a new mouse (inclusive).
    pub max_social_rank: u32,
    /// Which mates carry a litter after mating.
    pub gestation_policy: GestationPolicy,
    /// Number of recent events kept in the event log. Zero disables logging.
    pub event_log_capacity: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            initial_population: 50,
            max_population: 200,
            rng_seed: None,
            base_death_rate: 0.25,
            elder_death_factor: 0.15,
            elder_age: 40,
            maturity_age: 4,
            rank_tolerance: 25,
            mating_probability: 0.5,
            gestation_ticks: 20,
            min_social_rank: 1,
            max_social_rank: 100,
            gestation_policy: GestationPolicy::InitiatorCarries,
            event_log_capacity: 64,
        }
    }
}

impl Params {
    /// Checks every field, returning the first violation found.
    pub fn validate(&self) -> Result<(), PopulationError> {
        if self.initial_population == 0 {
            return Err(PopulationError::InvalidConfig(
                "initial_population must be positive",
            ));
        }
        if self.max_population == 0 {
            return Err(PopulationError::InvalidConfig(
                "max_population must be positive",
            ));
        }
        if self.initial_population > self.max_population {
            return Err(PopulationError::InitialExceedsCeiling {
                initial: self.initial_population,
                max: self.max_population,
            });
        }
        let unit = 0.0..=1.0;
        if !unit.contains(&self.base_death_rate)
            || !unit.contains(&self.elder_death_factor)
            || !unit.contains(&self.mating_probability)
        {
            return Err(PopulationError::InvalidConfig(
                "death rates and mating_probability must lie in [0, 1]",
            ));
        }
        if self.elder_age == 0 {
            return Err(PopulationError::InvalidConfig("elder_age must be positive"));
        }
        if self.gestation_ticks == 0 {
            return Err(PopulationError::InvalidConfig(
                "gestation_ticks must be positive",
            ));
        }
        if self.min_social_rank > self.max_social_rank {
            return Err(PopulationError::InvalidConfig(
                "min_social_rank cannot exceed max_social_rank",
            ));
        }
        Ok(())
    }

    /// Returns the configured RNG, generating a seed from entropy if absent.
    pub fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let seed: u64 = rand::random();
                SmallRng::seed_from_u64(seed)
            }
        }
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), PopulationError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads parameters from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, PopulationError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
