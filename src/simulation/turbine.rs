//! Turbine, generator and grid synchronization
//!
//! Above 2 MPa of steam the governor chases a pressure-proportional
//! speed target; below it the machine coasts down. Phase is the
//! integral of the frequency error against the grid. With the breaker
//! closed the grid forces synchronism and output follows thermal power.

use crate::plant::state::{PlantState, GRID_FREQUENCY};

/// Grid-synchronous shaft speed (RPM) for a 4-pole machine at 60 Hz
pub const SYNC_RPM: f64 = 1800.0;

/// Advance turbine speed, frequency, phase and electrical output
///
/// `dt_secs` is the tick interval in seconds; phase integration is the
/// only place wall-clock time enters the model.
pub fn update(next: &mut PlantState, s: &PlantState, dt_secs: f64) {
    if next.steam_pressure > 2.0 {
        let target_rpm = (next.steam_pressure / 8.0) * SYNC_RPM;
        next.turbine_speed = s.turbine_speed + (target_rpm - s.turbine_speed) * 0.01;
    } else {
        next.turbine_speed = s.turbine_speed * 0.99;
    }

    next.turbine_freq = next.turbine_speed / 30.0;

    let freq_diff = next.turbine_freq - s.grid_freq;
    let mut phase = (s.turbine_phase + freq_diff * 360.0 * dt_secs) % 360.0;
    if phase < 0.0 {
        phase += 360.0;
    }
    next.turbine_phase = phase;

    if s.breaker_open {
        next.output_mw = 0.0;
        next.grid_load = 0.0;
    } else {
        // Locked to the grid: the network is infinitely stiff compared
        // to one machine
        next.turbine_speed = SYNC_RPM;
        next.turbine_freq = GRID_FREQUENCY;
        next.turbine_phase = 0.0;
        next.output_mw = next.neutron_flux * 10.0 * next.cooling_eff_fraction();
        next.grid_load = next.output_mw;
    }
}
