//! Control Room - interactive nuclear power plant simulator
//!
//! A fixed-timestep arcade model of a reactor core, its thermal loops,
//! the turbine-generator and grid synchronization. The simulation core
//! is a pure tick function over a plant snapshot; all operator input
//! goes through the validated action handlers on `PlantController`.

pub mod actions;
pub mod core;
pub mod plant;
pub mod simulation;

pub use actions::PlantController;
pub use core::config::{Difficulty, ReactorType, Scenario, SimConfig, SimParams};
pub use plant::state::{PlantState, PlantStatus};
pub use simulation::scheduler::SimulationHandle;
pub use simulation::tick::run_plant_tick;
