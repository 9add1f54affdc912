//! Fixed-step simulation of a plant under open-loop and PID control.
//!
//! Provides:
//! - `TransientModel` seam and explicit `ForwardEuler` integrator
//! - Simulation configuration (horizon, step size, open-loop drive)
//! - Unit-step driver producing open-loop and closed-loop trajectories
//!
//! Both runs go through the same `integrate` primitive, parameterized by a
//! `ControlSource`. Plant and controller state are created fresh per run.

pub mod config;
pub mod driver;
pub mod error;
pub mod integrator;
pub mod model;
pub mod trajectory;

pub use config::{OpenLoopDrive, SimulationConfig};
pub use driver::{ClosedLoop, ControlSource, DrivenPlant, OpenLoop, integrate, run, unit_step};
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator};
pub use model::TransientModel;
pub use trajectory::{Sample, Trajectory};
