//! Tick function - one step of the plant state transition
//!
//! Pure transformation `(State, Config) -> State`, composed from the
//! per-system modules in a fixed order:
//! neutronics -> core regions -> primary loop -> secondary loop ->
//! turbine/electrical -> protection -> trend history.
//!
//! No I/O happens here; randomness enters only through the injected
//! RNG used for per-region flux jitter.

use rand::Rng;

use crate::core::config::SimConfig;
use crate::plant::state::PlantState;
use crate::simulation::{neutronics, protection, thermal, turbine};

/// Advance the plant one tick
///
/// `dt_secs` is the scheduler interval in seconds (0.1 at the default
/// 100ms tick); it only affects phase integration, the rest of the
/// model is tuned per-tick.
pub fn run_plant_tick(
    s: &PlantState,
    config: &SimConfig,
    dt_secs: f64,
    rng: &mut impl Rng,
) -> PlantState {
    let mut next = s.clone();

    // The TMI voiding boost degrades heat transfer only; the neutron
    // kinetics always run on the plain difficulty factor.
    neutronics::update(&mut next, s, config, config.difficulty.heat_factor());
    let heat_factor = thermal::effective_heat_factor(s, config);
    thermal::update_regions(&mut next, s, config, heat_factor, rng);
    thermal::update_primary_loop(&mut next, s, config);
    thermal::update_secondary_loop(&mut next, s);
    turbine::update(&mut next, s, dt_secs);
    protection::update(&mut next, config);

    next.history
        .record(next.neutron_flux, next.fuel_temp, next.pressure);
    next.tick_count = s.tick_count + 1;

    next
}
