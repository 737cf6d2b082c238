pub mod config;
pub mod error;

pub use config::{Difficulty, ReactorType, Scenario, SimConfig, SimParams};
pub use error::{ControlRoomError, Result};
