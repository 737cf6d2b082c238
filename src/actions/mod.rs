//! Operator action surface
//!
//! `PlantController` owns the one live `PlantState` and is the only
//! mutation path besides the tick itself. Handlers are validated,
//! clamp-on-invalid-input mutations executed synchronously between
//! ticks; the presentation layer only ever receives cloned snapshots.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::{SimConfig, SimParams};
use crate::plant::state::{PlantState, PlantStatus};
use crate::simulation::protection::{ALARM_BAD_SYNC, ALARM_MANUAL_SCRAM};
use crate::simulation::tick::run_plant_tick;

/// Phase tolerance for closing the breaker under manual sync (degrees)
const SYNC_PHASE_TOLERANCE: f64 = 20.0;

/// Frequency tolerance for closing the breaker under manual sync (Hz)
const SYNC_FREQ_TOLERANCE: f64 = 0.5;

/// Owns the live plant state and dispatches operator actions
pub struct PlantController {
    state: PlantState,
    config: SimConfig,
    params: SimParams,
    rng: ChaCha8Rng,
}

impl PlantController {
    pub fn new(config: SimConfig, params: SimParams) -> Self {
        Self {
            state: PlantState::for_config(&config),
            config,
            params,
            rng: ChaCha8Rng::seed_from_u64(params.seed),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Read-only snapshot for gauges, charts and audio cues
    pub fn snapshot(&self) -> PlantState {
        self.state.clone()
    }

    /// Advance the simulation one tick
    pub fn step(&mut self) {
        self.state = run_plant_tick(&self.state, &self.config, self.params.dt_secs(), &mut self.rng);
    }

    /// Set rod insertion, clamped to [0, 100]. Ignored while scrammed:
    /// the rods are driven in and stay in.
    pub fn set_rod_position(&mut self, value: f64) {
        if self.state.is_scrammed {
            return;
        }
        self.state.control_rod_position = value.clamp(0.0, 100.0);
    }

    /// Set primary coolant pump speed, clamped to [0, 100]
    pub fn set_pump_speed(&mut self, value: f64) {
        self.state.coolant_pump_speed = value.clamp(0.0, 100.0);
    }

    /// Set feedwater flow, clamped to [0, 100]
    pub fn set_feedwater_flow(&mut self, value: f64) {
        self.state.feedwater_flow = value.clamp(0.0, 100.0);
    }

    /// Set boron concentration in ppm, floored at zero
    pub fn set_boron_concentration(&mut self, value: f64) {
        self.state.boron_concentration = value.max(0.0);
    }

    /// Open or close the generator breaker
    ///
    /// Opening is always allowed. Closing goes through the
    /// synchronization gate when manual sync is enabled: out of phase or
    /// frequency tolerance, the breaker stays open and the out-of-phase
    /// closure trips the unit instead.
    pub fn toggle_breaker(&mut self) {
        if !self.state.breaker_open {
            self.state.breaker_open = true;
            tracing::info!("breaker opened");
            return;
        }

        if self.config.manual_sync {
            let phase_err = self.state.turbine_phase.abs();
            let freq_err = (self.state.turbine_freq - self.state.grid_freq).abs();
            if phase_err > SYNC_PHASE_TOLERANCE || freq_err > SYNC_FREQ_TOLERANCE {
                tracing::warn!(phase_err, freq_err, "out-of-phase breaker closure, tripping");
                self.state.is_scrammed = true;
                self.state.control_rod_position = 100.0;
                self.state.status = PlantStatus::Tripped;
                self.state.alarms.push(ALARM_BAD_SYNC.into());
                return;
            }
        }

        self.state.breaker_open = false;
        tracing::info!("breaker closed, generator on the grid");
    }

    /// Manual scram: unconditional trip latch
    pub fn scram(&mut self) {
        tracing::info!("manual scram");
        self.state.is_scrammed = true;
        self.state.control_rod_position = 100.0;
        self.state.status = PlantStatus::Tripped;
        self.state.breaker_open = true;
        self.state.alarms.push(ALARM_MANUAL_SCRAM.into());
    }

    /// Hard reset: discard the run and return to the unconfigured cold
    /// default, clearing any scram or meltdown latch
    pub fn reset(&mut self) {
        tracing::info!("hard reset to cold default");
        self.state = PlantState::cold();
        self.rng = ChaCha8Rng::seed_from_u64(self.params.seed);
    }

    /// Reset re-applying the scenario preset, the restart a player
    /// expects mid-scenario
    pub fn reset_with_config(&mut self) {
        tracing::info!(scenario = ?self.config.scenario, "reset with scenario preset");
        self.state = PlantState::for_config(&self.config);
        self.rng = ChaCha8Rng::seed_from_u64(self.params.seed);
    }
}
