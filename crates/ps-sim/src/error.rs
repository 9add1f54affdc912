//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered before or during a simulation run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Plant error: {0}")]
    Plant(#[from] ps_plant::PlantError),

    #[error("Controller error: {0}")]
    Control(#[from] ps_controls::ControlError),

    #[error("Numeric error: {0}")]
    Core(#[from] ps_core::CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
