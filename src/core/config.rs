//! Run configuration with documented physics constants
//!
//! Reactor type, scenario and difficulty are small enums whose physics
//! parameters live in lookup methods rather than scattered conditionals,
//! so the branch matrix can be tested in isolation and the tick function
//! stays auditable.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Reactor design variant
///
/// Determines control-rod worth and the sign/magnitude of the
/// temperature (void) feedback coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ReactorType {
    Pwr,
    Rbmk,
    Bwr,
}

impl ReactorType {
    /// Reactivity change per unit of rod withdrawal
    ///
    /// RBMK graphite-tipped rods respond at less than half the worth of
    /// the PWR/BWR designs, so power maneuvers feel sluggish.
    pub fn rod_worth(&self) -> f64 {
        match self {
            Self::Pwr | Self::Bwr => 0.05,
            Self::Rbmk => 0.02,
        }
    }

    /// Temperature-feedback coefficient at the given relative power
    ///
    /// PWR/BWR run a small negative coefficient: hotter fuel pushes
    /// power down, self-stabilizing. The RBMK flips sign below 40%
    /// power, the low-power positive-void instability zone that made
    /// the real design dangerous. Above 40% it is weakly negative.
    pub fn void_coefficient(&self, neutron_flux: f64) -> f64 {
        match self {
            Self::Pwr | Self::Bwr => -0.0001,
            Self::Rbmk => {
                if neutron_flux < 40.0 {
                    0.0008
                } else {
                    -0.00005
                }
            }
        }
    }
}

/// Accident / operational scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Cold plant, everything nominal
    Normal,
    /// Three Mile Island: stuck-open relief valve bleeding primary
    /// pressure, degraded heat transfer once the core starts to uncover
    TmiAccident,
    /// Late-night RBMK test run: high xenon, rods nearly out, and the
    /// automatic protection system deliberately disabled
    ChernobylRun,
    /// Freshly tripped plant buried under a xenon transient
    XenonPit,
}

impl Scenario {
    /// Flux ceiling (relative power)
    ///
    /// The Chernobyl run permits a runaway excursion well past the
    /// normal clamp; that is the scripted hazard.
    pub fn max_flux(&self) -> f64 {
        match self {
            Self::ChernobylRun => 500.0,
            _ => 200.0,
        }
    }

    /// Whether the automatic scram is armed
    ///
    /// Disabled for the Chernobyl run: the protection system only raises
    /// SCRAM REQUIRED and waits for the operator. This mirrors the
    /// historical disabling of the automatic protection and is a
    /// deliberate design choice, not an oversight.
    pub fn auto_scram_enabled(&self) -> bool {
        !matches!(self, Self::ChernobylRun)
    }
}

/// Difficulty tier
///
/// Scales how fast heat accumulates and how forgiving the trip
/// thresholds are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    Trainee,
    Normal,
    Veteran,
}

impl Difficulty {
    /// Heat accumulation per tick (multiplies every thermal transient)
    pub fn heat_factor(&self) -> f64 {
        match self {
            Self::Trainee => 0.05,
            Self::Normal => 0.1,
            Self::Veteran => 0.2,
        }
    }

    /// Fuel temperature above which the core melts (terminal)
    pub fn meltdown_threshold(&self) -> f64 {
        match self {
            Self::Trainee => 3500.0,
            Self::Normal => 2800.0,
            Self::Veteran => 2600.0,
        }
    }

    /// Fuel temperature that triggers the automatic scram
    ///
    /// Veteran sets this at its own meltdown threshold, so the automatic
    /// protection can never beat the operator to a developing transient.
    pub fn scram_threshold(&self) -> f64 {
        match self {
            Self::Trainee => 2200.0,
            Self::Normal => 2400.0,
            Self::Veteran => 2600.0,
        }
    }
}

/// Immutable per-run configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub reactor: ReactorType,
    pub scenario: Scenario,
    pub difficulty: Difficulty,
    /// Start from a fully cold, shut-down plant regardless of scenario
    pub cold_start: bool,
    /// Operator must match frequency and phase before closing the breaker
    pub manual_sync: bool,
    /// Enable boron (chemical shim) reactivity control
    pub chemical_shim: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            reactor: ReactorType::Pwr,
            scenario: Scenario::Normal,
            difficulty: Difficulty::Normal,
            cold_start: false,
            manual_sync: false,
            chemical_shim: false,
        }
    }
}

impl SimConfig {
    /// Load a run configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }
}

/// Scheduler and RNG parameters, separate from the physics config so
/// tests can drive ticks manually with a fixed seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimParams {
    /// Wall-clock interval between ticks, milliseconds
    pub tick_interval_ms: u64,
    /// Seed for the per-region flux jitter
    pub seed: u64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            seed: 0,
        }
    }
}

impl SimParams {
    /// Tick interval as seconds, the dt used by phase integration
    pub fn dt_secs(&self) -> f64 {
        self.tick_interval_ms as f64 / 1000.0
    }
}
