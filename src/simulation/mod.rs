// simulation/mod.rs
// Re-exports and module declarations for simulation submodules

pub mod boundary;
pub mod collision;
pub mod forces;
pub mod history;
pub mod integrator;
pub mod simulation;

pub use history::{SampleLog, SimulationSample};
pub use integrator::RungeKutta4;
pub use simulation::*;
