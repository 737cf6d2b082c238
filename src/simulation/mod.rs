pub mod neutronics;
pub mod protection;
pub mod scheduler;
pub mod thermal;
pub mod tick;
pub mod turbine;

pub use scheduler::SimulationHandle;
pub use tick::run_plant_tick;
