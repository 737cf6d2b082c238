//! Rolling trend buffers for the control-room strip charts
//!
//! Three fixed-length rings (flux, fuel temperature, pressure). Capacity
//! is always exactly [`TREND_SAMPLES`]: recording evicts the oldest
//! sample and appends the newest, so consumers can plot without
//! handling a warm-up phase.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Samples kept per channel (6 seconds of trend at the 100ms tick)
pub const TREND_SAMPLES: usize = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendHistory {
    flux: VecDeque<f64>,
    fuel_temp: VecDeque<f64>,
    pressure: VecDeque<f64>,
}

impl TrendHistory {
    /// Pre-fill every channel with the given initial readings
    pub fn filled(flux: f64, fuel_temp: f64, pressure: f64) -> Self {
        Self {
            flux: std::iter::repeat(flux).take(TREND_SAMPLES).collect(),
            fuel_temp: std::iter::repeat(fuel_temp).take(TREND_SAMPLES).collect(),
            pressure: std::iter::repeat(pressure).take(TREND_SAMPLES).collect(),
        }
    }

    /// Append one sample per channel, evicting the oldest (FIFO)
    pub fn record(&mut self, flux: f64, fuel_temp: f64, pressure: f64) {
        self.flux.pop_front();
        self.flux.push_back(flux);
        self.fuel_temp.pop_front();
        self.fuel_temp.push_back(fuel_temp);
        self.pressure.pop_front();
        self.pressure.push_back(pressure);
    }

    pub fn flux(&self) -> impl Iterator<Item = f64> + '_ {
        self.flux.iter().copied()
    }

    pub fn fuel_temp(&self) -> impl Iterator<Item = f64> + '_ {
        self.fuel_temp.iter().copied()
    }

    pub fn pressure(&self) -> impl Iterator<Item = f64> + '_ {
        self.pressure.iter().copied()
    }

    /// Newest flux sample (the right edge of the chart)
    pub fn latest_flux(&self) -> f64 {
        *self.flux.back().unwrap_or(&0.0)
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.flux.len(), self.fuel_temp.len());
        debug_assert_eq!(self.flux.len(), self.pressure.len());
        self.flux.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
