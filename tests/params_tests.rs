#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::fs;
use std::path::PathBuf;

use universe25::simulation::error::PopulationError;
use universe25::simulation::params::{GestationPolicy, Params};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("universe25_{}_{name}", std::process::id()))
}

#[test]
fn test_default_params() {
    let params = Params::default();
    assert_eq!(params.initial_population, 50);
    assert_eq!(params.max_population, 200);
    assert_eq!(params.base_death_rate, 0.25);
    assert_eq!(params.elder_death_factor, 0.15);
    assert_eq!(params.elder_age, 40);
    assert_eq!(params.maturity_age, 4);
    assert_eq!(params.rank_tolerance, 25);
    assert_eq!(params.mating_probability, 0.5);
    assert_eq!(params.gestation_ticks, 20);
    assert_eq!((params.min_social_rank, params.max_social_rank), (1, 100));
    assert_eq!(params.gestation_policy, GestationPolicy::InitiatorCarries);
    assert!(params.validate().is_ok());
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases = [
        Params {
            mating_probability: 1.5,
            ..Params::default()
        },
        Params {
            base_death_rate: -0.1,
            ..Params::default()
        },
        Params {
            gestation_ticks: 0,
            ..Params::default()
        },
        Params {
            elder_age: 0,
            ..Params::default()
        },
        Params {
            min_social_rank: 10,
            max_social_rank: 9,
            ..Params::default()
        },
    ];
    for params in cases {
        assert!(
            matches!(params.validate(), Err(PopulationError::InvalidConfig(_))),
            "{params:?} should be rejected"
        );
    }

    let crowded = Params {
        initial_population: 201,
        ..Params::default()
    };
    assert!(matches!(
        crowded.validate(),
        Err(PopulationError::InitialExceedsCeiling { initial: 201, max: 200 })
    ));
}

#[test]
fn test_save_and_load() {
    let params = Params {
        initial_population: 12,
        max_population: 34,
        rng_seed: Some(5),
        gestation_policy: GestationPolicy::BothCarry,
        ..Params::default()
    };
    let path = temp_path("roundtrip.json");

    params.save_to_file(&path).expect("Failed to save params");
    let loaded = Params::load_from_file(&path).expect("Failed to load params");
    fs::remove_file(&path).ok();

    assert_eq!(loaded, params);
}

#[test]
fn test_partial_file_uses_defaults() {
    let path = temp_path("partial.json");
    fs::write(&path, r#"{ "max_population": 75, "rng_seed": 3 }"#).expect("write");

    let loaded = Params::load_from_file(&path).expect("Failed to load params");
    fs::remove_file(&path).ok();

    assert_eq!(loaded.max_population, 75);
    assert_eq!(loaded.rng_seed, Some(3));
    assert_eq!(loaded.initial_population, 50);
    assert_eq!(loaded.gestation_ticks, 20);
}

#[test]
fn test_load_rejects_malformed_and_invalid_files() {
    let garbage = temp_path("garbage.json");
    fs::write(&garbage, "not json").expect("write");
    let result = Params::load_from_file(&garbage);
    fs::remove_file(&garbage).ok();
    assert!(matches!(result, Err(PopulationError::Json(_))));

    let invalid = temp_path("invalid.json");
    fs::write(&invalid, r#"{ "initial_population": 0 }"#).expect("write");
    let result = Params::load_from_file(&invalid);
    fs::remove_file(&invalid).ok();
    assert!(matches!(result, Err(PopulationError::InvalidConfig(_))));

    let missing = temp_path("missing.json");
    assert!(matches!(
        Params::load_from_file(&missing),
        Err(PopulationError::Io(_))
    ));
}
