//! Application service layer for the PID simulator.
//!
//! Front ends go through this crate: it validates requests, runs the
//! open- and closed-loop simulations, extracts metrics, and handles
//! scenario files, result export and gain sweeps.

pub mod advice;
pub mod error;
pub mod export;
pub mod scenario;
pub mod service;
pub mod sweep;

pub use advice::{Advisory, Describe, ParameterRange, advisories, describe};
pub use error::{AppError, AppResult};
pub use export::{ExportFormat, export, to_csv, to_json};
pub use scenario::{Scenario, load, load_json, load_yaml, save_json, save_yaml, validate_scenario};
pub use service::{
    REFERENCE_FINAL_VALUE, SimulationRequest, SimulationResult, simulate, simulate_scenario,
    simulate_with,
};
pub use sweep::{SweepPoint, sweep};
