//! Alarm annunciator and the trip state machine
//!
//! Alarms are rebuilt from live thresholds every tick, never
//! accumulated. Meltdown is terminal; a latched scram holds until the
//! run is reset. Under the Chernobyl run the automatic scram is
//! deliberately disarmed and the annunciator can only demand a manual
//! one.

use crate::core::config::SimConfig;
use crate::plant::state::{PlantState, PlantStatus, MAX_PRESSURE};

pub const ALARM_CORE_TEMP: &str = "CORE TEMP HIGH";
pub const ALARM_OVERPRESSURE: &str = "PRI OVERPRESSURE";
pub const ALARM_OVERPOWER: &str = "OVERPOWER";
pub const ALARM_XENON: &str = "XENON POISONING";
pub const ALARM_MELTDOWN: &str = "CORE MELTDOWN IMMINENT";
pub const ALARM_AUTO_SCRAM: &str = "AUTO SCRAM";
pub const ALARM_SCRAM_REQUIRED: &str = "SCRAM REQUIRED";
pub const ALARM_MANUAL_SCRAM: &str = "MANUAL SCRAM";
pub const ALARM_BAD_SYNC: &str = "BAD SYNC - TURBINE TRIP";

/// Pressure above which the automatic scram fires (MPa)
const SCRAM_PRESSURE: f64 = 17.0;

/// Rebuild alarms, evaluate meltdown and trip conditions, derive status
pub fn update(next: &mut PlantState, config: &SimConfig) {
    let mut alarms: Vec<String> = Vec::new();
    if next.fuel_temp > 2000.0 {
        alarms.push(ALARM_CORE_TEMP.into());
    }
    if next.pressure > MAX_PRESSURE {
        alarms.push(ALARM_OVERPRESSURE.into());
    }
    if next.neutron_flux > 110.0 {
        alarms.push(ALARM_OVERPOWER.into());
    }
    if next.xenon_level > 50.0 {
        alarms.push(ALARM_XENON.into());
    }

    // Meltdown is terminal: once entered, nothing below may overwrite it
    if next.fuel_temp > config.difficulty.meltdown_threshold() {
        if next.status != PlantStatus::Meltdown {
            tracing::warn!(fuel_temp = next.fuel_temp, "core meltdown");
        }
        next.status = PlantStatus::Meltdown;
        alarms.push(ALARM_MELTDOWN.into());
    }

    next.alarms = alarms;

    let trip_demand = next.fuel_temp > config.difficulty.scram_threshold()
        || next.pressure > SCRAM_PRESSURE;
    if trip_demand && !next.is_scrammed && next.status != PlantStatus::Meltdown {
        if config.scenario.auto_scram_enabled() {
            tracing::info!(
                fuel_temp = next.fuel_temp,
                pressure = next.pressure,
                "automatic scram"
            );
            next.is_scrammed = true;
            next.control_rod_position = 100.0;
            next.status = PlantStatus::Tripped;
            next.breaker_open = true;
            next.alarms.push(ALARM_AUTO_SCRAM.into());
        } else {
            // Protection disarmed for the run: demand the operator do it
            next.alarms.push(ALARM_SCRAM_REQUIRED.into());
        }
    }

    derive_status(next);
}

/// Recompute operating status from live readings
///
/// Skipped entirely while scrammed or melted down. Conditions are
/// evaluated in fixed order and the last true one wins, which makes
/// rods-fully-inserted the strongest claim and leaves the previous
/// status in place when nothing matches.
fn derive_status(next: &mut PlantState) {
    if next.is_scrammed || next.status == PlantStatus::Meltdown {
        return;
    }

    let mut status = next.status;
    if next.neutron_flux > 1.0 {
        status = PlantStatus::Critical;
    }
    if next.output_mw > 100.0 {
        status = PlantStatus::PowerOps;
    }
    if next.neutron_flux < 1.0 && next.coolant_pump_speed > 0.0 {
        status = PlantStatus::Startup;
    }
    if next.control_rod_position >= 100.0 {
        status = PlantStatus::Shutdown;
    }

    if status != next.status {
        tracing::debug!(previous = next.status.label(), current = status.label(), "status change");
    }
    next.status = status;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Scenario;

    fn config() -> SimConfig {
        SimConfig::default()
    }

    #[test]
    fn test_alarms_rebuilt_not_accumulated() {
        let cfg = config();
        let mut s = PlantState::cold();
        s.alarms = vec![ALARM_MANUAL_SCRAM.into()];
        s.neutron_flux = 120.0;
        update(&mut s, &cfg);
        assert_eq!(s.alarms, vec![ALARM_OVERPOWER.to_string()]);

        // Condition clears, alarm disappears next evaluation
        s.neutron_flux = 50.0;
        update(&mut s, &cfg);
        assert!(s.alarms.is_empty());
    }

    #[test]
    fn test_threshold_alarms() {
        let cfg = config();
        let mut s = PlantState::cold();
        s.fuel_temp = 2100.0;
        s.pressure = 16.5;
        s.xenon_level = 60.0;
        update(&mut s, &cfg);
        assert!(s.alarms.contains(&ALARM_CORE_TEMP.to_string()));
        assert!(s.alarms.contains(&ALARM_OVERPRESSURE.to_string()));
        assert!(s.alarms.contains(&ALARM_XENON.to_string()));
    }

    #[test]
    fn test_auto_scram_latches_and_opens_breaker() {
        let cfg = config();
        let mut s = PlantState::cold();
        s.fuel_temp = 2500.0; // above the NORMAL 2400 threshold
        s.breaker_open = false;
        update(&mut s, &cfg);
        assert!(s.is_scrammed);
        assert_eq!(s.control_rod_position, 100.0);
        assert_eq!(s.status, PlantStatus::Tripped);
        assert!(s.breaker_open);
        assert!(s.alarms.contains(&ALARM_AUTO_SCRAM.to_string()));
    }

    #[test]
    fn test_overpressure_trips_independently_of_temperature() {
        let cfg = config();
        let mut s = PlantState::cold();
        s.pressure = 17.5;
        update(&mut s, &cfg);
        assert!(s.is_scrammed);
        assert!(s.alarms.contains(&ALARM_AUTO_SCRAM.to_string()));
    }

    #[test]
    fn test_chernobyl_demands_manual_scram() {
        let mut cfg = config();
        cfg.scenario = Scenario::ChernobylRun;
        let mut s = PlantState::cold();
        s.fuel_temp = 2500.0;
        update(&mut s, &cfg);
        assert!(!s.is_scrammed, "auto protection is disarmed for the run");
        assert!(s.alarms.contains(&ALARM_SCRAM_REQUIRED.to_string()));
        assert_ne!(s.status, PlantStatus::Tripped);
    }

    #[test]
    fn test_meltdown_is_terminal() {
        let cfg = config();
        let mut s = PlantState::cold();
        s.fuel_temp = 2900.0; // above the NORMAL 2800 meltdown threshold
        update(&mut s, &cfg);
        assert_eq!(s.status, PlantStatus::Meltdown);
        assert!(s.alarms.contains(&ALARM_MELTDOWN.to_string()));

        // Even if the core somehow cools, the status holds
        s.fuel_temp = 100.0;
        s.control_rod_position = 100.0;
        update(&mut s, &cfg);
        assert_eq!(s.status, PlantStatus::Meltdown);
    }

    #[test]
    fn test_status_priority_order() {
        let cfg = config();

        // Critical: flux above 1
        let mut s = PlantState::cold();
        s.control_rod_position = 40.0;
        s.neutron_flux = 50.0;
        update(&mut s, &cfg);
        assert_eq!(s.status, PlantStatus::Critical);

        // Power ops beats critical once output passes 100 MW
        s.output_mw = 500.0;
        update(&mut s, &cfg);
        assert_eq!(s.status, PlantStatus::PowerOps);

        // Startup: subcritical with pumps running
        let mut s = PlantState::cold();
        s.control_rod_position = 90.0;
        s.neutron_flux = 0.5;
        s.coolant_pump_speed = 50.0;
        update(&mut s, &cfg);
        assert_eq!(s.status, PlantStatus::Startup);

        // Rods fully in always reads shutdown
        let mut s = PlantState::cold();
        s.neutron_flux = 50.0;
        s.coolant_pump_speed = 50.0;
        update(&mut s, &cfg);
        assert_eq!(s.status, PlantStatus::Shutdown);
    }

    #[test]
    fn test_scrammed_status_untouched_by_recompute() {
        let cfg = config();
        let mut s = PlantState::cold();
        s.is_scrammed = true;
        s.status = PlantStatus::Tripped;
        s.neutron_flux = 50.0;
        update(&mut s, &cfg);
        assert_eq!(s.status, PlantStatus::Tripped);
    }
}
