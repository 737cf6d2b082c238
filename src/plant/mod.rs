pub mod history;
pub mod state;

pub use history::{TrendHistory, TREND_SAMPLES};
pub use state::{CoreRegion, PlantState, PlantStatus, CORE_REGIONS, GRID_FREQUENCY, MAX_PRESSURE};
