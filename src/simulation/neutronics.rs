//! Neutron population and xenon poison dynamics
//!
//! Reactivity is a sum of four feedback terms (rods, temperature, xenon,
//! optional boron), each of which is a design knob looked up from the
//! run configuration. The result drives relative power; xenon then
//! evolves from production, decay and burnup, producing the classic
//! xenon-pit dip after a power reduction.

use crate::core::config::SimConfig;
use crate::plant::state::PlantState;

/// Startup neutron source, enough to begin a self-sustaining chain once
/// the rods are withdrawn
const SOURCE_TERM: f64 = 0.05;

/// Geometric flux decay per tick while scrammed
const SCRAM_DECAY: f64 = 0.9;

const XENON_PRODUCTION_RATE: f64 = 0.005;
const BASE_XENON_DECAY: f64 = 0.001;
const XENON_BURNUP_RATE: f64 = 0.0001;

/// Net reactivity from all feedback terms, at current state
pub fn total_reactivity(s: &PlantState, config: &SimConfig) -> f64 {
    let rod_reactivity = (50.0 - s.control_rod_position) * config.reactor.rod_worth();
    let temp_feedback = (s.fuel_temp - 300.0) * config.reactor.void_coefficient(s.neutron_flux);
    let xenon_feedback = s.xenon_level * -0.01;
    let boron_reactivity = if config.chemical_shim {
        (s.boron_concentration / 1000.0) * -0.05
    } else {
        0.0
    };

    rod_reactivity + temp_feedback + xenon_feedback + boron_reactivity
}

/// Advance flux and xenon one tick
///
/// `heat_factor` is the difficulty heat-accumulation factor, possibly
/// already boosted by a scenario override.
pub fn update(next: &mut PlantState, s: &PlantState, config: &SimConfig, heat_factor: f64) {
    if s.is_scrammed {
        next.neutron_flux = s.neutron_flux * SCRAM_DECAY;
    } else {
        let mut power_change = s.neutron_flux * total_reactivity(s, config) * heat_factor;

        // Subcritical source: lets a cold core bootstrap once rods are
        // pulled past the 80% insertion threshold
        if s.neutron_flux < 0.1 && s.control_rod_position < 80.0 {
            power_change += SOURCE_TERM;
        }

        let max_flux = config.scenario.max_flux();
        next.neutron_flux = (s.neutron_flux + power_change).clamp(0.0, max_flux);
    }

    let production = next.neutron_flux * XENON_PRODUCTION_RATE;
    let decay = s.xenon_level * BASE_XENON_DECAY;
    let burnup = s.xenon_level * next.neutron_flux * XENON_BURNUP_RATE;
    next.xenon_level = (s.xenon_level + production - decay - burnup).max(0.0);
}
