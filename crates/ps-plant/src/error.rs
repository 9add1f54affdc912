//! Error types for plant model operations.

use thiserror::Error;

/// Result type for plant model operations.
pub type PlantResult<T> = Result<T, PlantError>;

/// Errors raised by plant construction and evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlantError {
    /// A coefficient lies outside its documented range.
    #[error("Plant parameter {field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// State vector length does not match the plant's state dimension.
    #[error("State dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

impl From<ps_core::RangeError> for PlantError {
    fn from(e: ps_core::RangeError) -> Self {
        PlantError::OutOfRange {
            field: e.what,
            value: e.value,
            min: e.min,
            max: e.max,
        }
    }
}
