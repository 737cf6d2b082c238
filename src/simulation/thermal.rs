//! Thermal transport, pressure, and the secondary loop
//!
//! Region heating, primary coolant, pressurizer lag, the TMI stuck-valve
//! override, and the steam/condenser side. All dynamics are first-order
//! lags integrated per tick; divisors are either constants or
//! floor-clamped, so no reachable state produces a NaN.

use rand::Rng;

use crate::core::config::{ReactorType, Scenario, SimConfig};
use crate::plant::state::PlantState;

/// Heat generated per unit of region flux
const REGION_HEAT_GEN: f64 = 5.0;

/// Fuel-to-coolant transfer coefficient
const HEAT_TRANSFER_COEFF: f64 = 0.2;

/// Fractional heat loss to ambient per tick
const AMBIENT_LOSS: f64 = 0.001;

/// Effective heat-accumulation factor for this tick
///
/// Difficulty sets the base rate; the TMI scenario multiplies it by 1.5
/// once the primary has depressurized below 8 MPa at power, modeling the
/// loss of heat transfer when the coolant voids and the core uncovers.
pub fn effective_heat_factor(s: &PlantState, config: &SimConfig) -> f64 {
    let mut factor = config.difficulty.heat_factor();
    if config.scenario == Scenario::TmiAccident
        && !config.cold_start
        && s.pressure < 8.0
        && s.neutron_flux > 10.0
    {
        factor *= 1.5;
    }
    factor
}

/// Advance the nine core regions and recompute the mean fuel temperature
///
/// Each region sees the plant flux with a +/-1% jitter for visual
/// texture. An RBMK with rods below 10% insertion skews the bottom rows
/// (index > 6) by +0.5, the bottom-of-core surge of a positive-scram
/// style excursion.
pub fn update_regions(
    next: &mut PlantState,
    s: &PlantState,
    config: &SimConfig,
    heat_factor: f64,
    rng: &mut impl Rng,
) {
    for (i, region) in next.core_regions.iter_mut().enumerate() {
        let mut variation = 1.0 + (rng.gen::<f64>() * 0.02 - 0.01);
        if config.reactor == ReactorType::Rbmk && s.control_rod_position < 10.0 && i > 6 {
            variation += 0.5;
        }

        let region_flux = next.neutron_flux * variation;
        let heat_gen = region_flux * REGION_HEAT_GEN;
        let transfer = (region.temp - s.coolant_temp) * HEAT_TRANSFER_COEFF;

        let mut temp = region.temp + (heat_gen - transfer) * heat_factor;
        temp -= (temp - 25.0) * AMBIENT_LOSS;

        region.flux = region_flux;
        region.power = region_flux;
        region.temp = temp;
    }

    next.fuel_temp = next.mean_region_temp();
}

/// Primary loop: coolant temperature, ambient losses, pressurizer lag
pub fn update_primary_loop(next: &mut PlantState, s: &PlantState, config: &SimConfig) {
    // Stagnant flow moves almost no heat out of the core
    let flow_factor = if s.coolant_pump_speed > 0.0 { 1.0 } else { 0.1 };
    let transfer_in = (next.fuel_temp - s.coolant_temp) * HEAT_TRANSFER_COEFF * flow_factor;
    let steam_gen_removal = (s.coolant_temp - 100.0) * 0.15 * (s.coolant_pump_speed / 100.0);

    next.coolant_temp = s.coolant_temp + (transfer_in - steam_gen_removal) * 0.05;

    // Second ambient correction, applied per region so the mean-of-regions
    // invariant on fuel_temp stays exact (the correction is linear, so the
    // mean trajectory is unchanged)
    for region in &mut next.core_regions {
        region.temp -= (region.temp - 25.0) * AMBIENT_LOSS;
    }
    next.fuel_temp = next.mean_region_temp();
    next.coolant_temp -= (next.coolant_temp - 25.0) * AMBIENT_LOSS;

    // Pressurizer: first-order lag toward the saturation target
    let target_pressure = (next.coolant_temp / 300.0) * 15.0;
    next.pressure = s.pressure + (target_pressure - s.pressure) * 0.02;

    // TMI stuck-open relief valve: the primary keeps venting inventory
    // while above 4 MPa. Applied after the lag so the vent actually
    // lowers the pressure it is draining.
    if config.scenario == Scenario::TmiAccident && !config.cold_start && next.pressure > 4.0 {
        next.pressure -= 0.05 * (next.pressure / 10.0);
    }
}

/// Secondary loop: steam pressure, cooling tower, condenser
///
/// Condenser temperature is computed from the previous tick's output;
/// this tick's electrical output is not known until the turbine stage.
pub fn update_secondary_loop(next: &mut PlantState, s: &PlantState) {
    let target_steam = (next.coolant_temp / 320.0) * 8.0;
    next.steam_pressure = s.steam_pressure + (target_steam - s.steam_pressure) * 0.01;

    // Floor at 0.5 keeps the condenser divisor away from zero on any
    // ambient input
    let cooling_eff = (1.0 - (s.ambient_temp - 20.0) * 0.01).max(0.5);
    next.cooling_tower_efficiency = cooling_eff * 100.0;
    next.condenser_temp = s.ambient_temp + (s.output_mw * 0.05) / cooling_eff;
}
