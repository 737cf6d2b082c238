//! Property tests for the state invariants
//!
//! Random configurations, random operator abuse, random tick counts:
//! the documented invariants must hold at every observable point.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use control_room::{
    run_plant_tick, Difficulty, PlantController, PlantState, PlantStatus, ReactorType, Scenario,
    SimConfig, SimParams,
};

fn arb_config() -> impl Strategy<Value = SimConfig> {
    (
        prop_oneof![
            Just(ReactorType::Pwr),
            Just(ReactorType::Rbmk),
            Just(ReactorType::Bwr)
        ],
        prop_oneof![
            Just(Scenario::Normal),
            Just(Scenario::TmiAccident),
            Just(Scenario::ChernobylRun),
            Just(Scenario::XenonPit)
        ],
        prop_oneof![
            Just(Difficulty::Trainee),
            Just(Difficulty::Normal),
            Just(Difficulty::Veteran)
        ],
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(reactor, scenario, difficulty, cold_start, manual_sync, chemical_shim)| SimConfig {
                reactor,
                scenario,
                difficulty,
                cold_start,
                manual_sync,
                chemical_shim,
            },
        )
}

fn assert_invariants(s: &PlantState) {
    assert!((0.0..=100.0).contains(&s.control_rod_position), "rods {}", s.control_rod_position);
    assert!((0.0..=100.0).contains(&s.coolant_pump_speed));
    assert!((0.0..=100.0).contains(&s.feedwater_flow));
    assert!(s.boron_concentration >= 0.0);
    assert!(s.xenon_level >= 0.0, "xenon {}", s.xenon_level);
    assert!((0.0..360.0).contains(&s.turbine_phase), "phase {}", s.turbine_phase);
    assert!((0.0..360.0).contains(&s.grid_phase));
    assert_eq!(s.core_regions.len(), 9);
    assert!(
        (s.fuel_temp - s.mean_region_temp()).abs() < 1e-9,
        "fuel temp must be the region mean"
    );
    assert_eq!(s.history.len(), 60);
    assert!(s.neutron_flux.is_finite());
    assert!(s.pressure.is_finite());
    assert!(s.condenser_temp.is_finite());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_over_any_run(
        config in arb_config(),
        seed in any::<u64>(),
        ticks in 1usize..300,
        rod in 0.0f64..200.0,
        pump in -50.0f64..200.0,
    ) {
        let cfg = config;
        let mut s = PlantState::for_config(&cfg);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // Operator sets some (possibly out-of-range, pre-clamped here the
        // way the handlers would) inputs mid-run
        let mut c = PlantController::new(cfg, SimParams { tick_interval_ms: 100, seed });
        c.set_rod_position(rod);
        c.set_pump_speed(pump);
        let clamped = c.snapshot();
        s.control_rod_position = clamped.control_rod_position;
        s.coolant_pump_speed = clamped.coolant_pump_speed;

        for _ in 0..ticks {
            s = run_plant_tick(&s, &cfg, 0.1, &mut rng);
            assert_invariants(&s);
        }
    }

    #[test]
    fn scram_latch_is_permanent(
        config in arb_config(),
        seed in any::<u64>(),
        scram_at in 0usize..50,
        ticks_after in 1usize..100,
    ) {
        let mut c = PlantController::new(config, SimParams { tick_interval_ms: 100, seed });
        for _ in 0..scram_at {
            c.step();
        }
        c.scram();
        for _ in 0..ticks_after {
            c.step();
            let s = c.snapshot();
            prop_assert!(s.is_scrammed, "scram latch must survive every tick");
        }
    }

    #[test]
    fn history_is_always_sixty_samples(
        config in arb_config(),
        seed in any::<u64>(),
        ticks in 0usize..200,
    ) {
        let mut c = PlantController::new(config, SimParams { tick_interval_ms: 100, seed });
        for _ in 0..ticks {
            c.step();
            prop_assert_eq!(c.snapshot().history.len(), 60);
        }
    }

    #[test]
    fn handler_inputs_always_clamped(
        config in arb_config(),
        rod in -1e6f64..1e6,
        pump in -1e6f64..1e6,
        feed in -1e6f64..1e6,
        boron in -1e6f64..1e6,
    ) {
        let mut c = PlantController::new(config, SimParams::default());
        c.set_rod_position(rod);
        c.set_pump_speed(pump);
        c.set_feedwater_flow(feed);
        c.set_boron_concentration(boron);
        let s = c.snapshot();
        prop_assert!((0.0..=100.0).contains(&s.coolant_pump_speed));
        prop_assert!((0.0..=100.0).contains(&s.feedwater_flow));
        prop_assert!(s.boron_concentration >= 0.0);
        // Rods: clamped, unless the preset started the run scrammed (the
        // handler is a no-op then and the preset value stands)
        prop_assert!((0.0..=100.0).contains(&s.control_rod_position));
    }
}
