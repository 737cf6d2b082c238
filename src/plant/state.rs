//! The full plant snapshot and its scenario presets
//!
//! One `PlantState` instance is owned by the controller; the
//! presentation layer only ever sees clones. Every field a gauge,
//! synchroscope or strip chart needs is here, so external consumers
//! never reach into the physics modules.

use serde::{Deserialize, Serialize};

use crate::core::config::{Scenario, SimConfig};
use crate::plant::history::TrendHistory;

/// Number of regions in the coarse 3x3 core discretization
pub const CORE_REGIONS: usize = 9;

/// Operating pressure ceiling before the overpressure alarm (MPa)
pub const MAX_PRESSURE: f64 = 16.0;

/// Grid nominal frequency (Hz)
pub const GRID_FREQUENCY: f64 = 60.0;

/// Plant operating status, derived every tick
///
/// `Meltdown` is terminal for the run; `Tripped` holds until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlantStatus {
    Shutdown,
    Startup,
    Critical,
    PowerOps,
    Tripped,
    Meltdown,
}

impl PlantStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Shutdown => "SHUTDOWN",
            Self::Startup => "STARTUP",
            Self::Critical => "CRITICAL",
            Self::PowerOps => "POWER_OPS",
            Self::Tripped => "TRIPPED",
            Self::Meltdown => "MELTDOWN",
        }
    }
}

/// One cell of the 3x3 core grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreRegion {
    pub id: u8,
    pub temp: f64,
    pub power: f64,
    pub flux: f64,
}

impl CoreRegion {
    fn cold(id: u8) -> Self {
        Self {
            id,
            temp: 25.0,
            power: 0.0,
            flux: 0.0,
        }
    }
}

fn cold_regions() -> [CoreRegion; CORE_REGIONS] {
    std::array::from_fn(|i| CoreRegion::cold(i as u8 + 1))
}

/// The complete mutable plant snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantState {
    // Core / neutronics
    /// Control rod insertion, 0-100 (100 = fully inserted)
    pub control_rod_position: f64,
    /// Relative power, clamped to the scenario flux ceiling
    pub neutron_flux: f64,
    pub xenon_level: f64,
    /// Dissolved boron, ppm (only reactive with chemical shim enabled)
    pub boron_concentration: f64,

    // Thermal
    /// Mean of the nine region temperatures, never stored independently
    pub fuel_temp: f64,
    pub coolant_temp: f64,
    /// Primary pressure, MPa
    pub pressure: f64,
    pub steam_pressure: f64,
    pub condenser_temp: f64,
    pub ambient_temp: f64,
    pub cooling_tower_efficiency: f64,
    pub core_regions: [CoreRegion; CORE_REGIONS],

    // Electromechanical
    pub coolant_pump_speed: f64,
    pub feedwater_flow: f64,
    /// RPM; 1800 is grid-synchronous for a 4-pole machine at 60 Hz
    pub turbine_speed: f64,
    pub turbine_freq: f64,
    pub grid_freq: f64,
    /// Degrees relative to the grid, wrapped into [0, 360)
    pub turbine_phase: f64,
    pub grid_phase: f64,
    pub breaker_open: bool,
    pub output_mw: f64,
    pub grid_load: f64,

    // Safety / status
    pub is_scrammed: bool,
    /// Active alarm labels, rebuilt from live thresholds every tick
    pub alarms: Vec<String>,
    pub status: PlantStatus,

    pub history: TrendHistory,
    pub tick_count: u64,
}

impl Default for PlantState {
    fn default() -> Self {
        Self::cold()
    }
}

impl PlantState {
    /// Cold shut-down plant: rods in, breaker open, everything at ambient
    pub fn cold() -> Self {
        Self {
            control_rod_position: 100.0,
            neutron_flux: 0.0,
            xenon_level: 0.0,
            boron_concentration: 1000.0,
            fuel_temp: 25.0,
            coolant_temp: 25.0,
            pressure: 0.1,
            steam_pressure: 0.1,
            condenser_temp: 20.0,
            ambient_temp: 20.0,
            cooling_tower_efficiency: 100.0,
            core_regions: cold_regions(),
            coolant_pump_speed: 0.0,
            feedwater_flow: 0.0,
            turbine_speed: 0.0,
            turbine_freq: 0.0,
            grid_freq: GRID_FREQUENCY,
            turbine_phase: 0.0,
            grid_phase: 0.0,
            breaker_open: true,
            output_mw: 0.0,
            grid_load: 0.0,
            is_scrammed: false,
            alarms: Vec::new(),
            status: PlantStatus::Shutdown,
            history: TrendHistory::filled(0.0, 25.0, 0.1),
            tick_count: 0,
        }
    }

    /// Initial state for a configured run, applying the scenario preset
    ///
    /// A cold start overrides every scenario: the operator gets the full
    /// startup sequence from ambient conditions.
    pub fn for_config(config: &SimConfig) -> Self {
        let mut s = Self::cold();
        if config.cold_start {
            return s;
        }

        match config.scenario {
            Scenario::Normal => {}
            Scenario::ChernobylRun => {
                // Rods dangerously withdrawn into a heavy xenon load
                s.neutron_flux = 50.0;
                s.control_rod_position = 20.0;
                s.xenon_level = 80.0;
                s.coolant_temp = 280.0;
                s.pressure = 6.5;
                s.status = PlantStatus::Critical;
                s.breaker_open = false;
                for r in &mut s.core_regions {
                    r.temp = 300.0;
                }
                s.fuel_temp = 300.0;
            }
            Scenario::TmiAccident => {
                // At power with the relief valve already stuck open
                s.neutron_flux = 95.0;
                s.control_rod_position = 10.0;
                s.pressure = 10.0;
                s.coolant_pump_speed = 100.0;
                s.feedwater_flow = 100.0;
                s.status = PlantStatus::PowerOps;
                s.breaker_open = false;
                s.turbine_speed = 1800.0;
                for r in &mut s.core_regions {
                    r.temp = 320.0;
                }
                s.fuel_temp = 320.0;
            }
            Scenario::XenonPit => {
                // Just tripped, poison still building
                s.is_scrammed = true;
                s.control_rod_position = 100.0;
                s.xenon_level = 95.0;
                s.status = PlantStatus::Tripped;
                s.breaker_open = true;
            }
        }
        s
    }

    /// Mean of the nine region temperatures
    pub fn mean_region_temp(&self) -> f64 {
        let sum: f64 = self.core_regions.iter().map(|r| r.temp).sum();
        sum / self.core_regions.len() as f64
    }

    /// Cooling tower efficiency as a 0..1 fraction (floor-clamped at 0.5
    /// upstream, so safe as a divisor)
    pub fn cooling_eff_fraction(&self) -> f64 {
        self.cooling_tower_efficiency / 100.0
    }
}
