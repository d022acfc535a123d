#![allow(missing_docs)]

use proptest::prelude::*;
use universe25::simulation::params::{GestationPolicy, Params};
use universe25::simulation::population::Population;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn tick_invariants_hold(
        seed in any::<u64>(),
        initial in 1usize..40,
        headroom in 0usize..60,
        both_carry in any::<bool>(),
    ) {
        let params = Params {
            initial_population: initial,
            max_population: initial + headroom,
            rng_seed: Some(seed),
            gestation_policy: if both_carry {
                GestationPolicy::BothCarry
            } else {
                GestationPolicy::InitiatorCarries
            },
            ..Params::default()
        };
        let max = params.max_population;
        let mut population = Population::from_params(params).expect("valid params");

        for tick in 1..=80u64 {
            population.update();
            prop_assert_eq!(population.time_step(), tick);
            prop_assert!(population.population_size() <= max);
            for mouse in population.mice() {
                if mouse.ticks_until_birth() > 0 {
                    prop_assert!(mouse.is_pregnant());
                }
                if !mouse.is_pregnant() {
                    prop_assert_eq!(mouse.ticks_until_birth(), 0);
                }
                prop_assert!(u64::from(mouse.age) <= tick);
            }
        }
    }
}
