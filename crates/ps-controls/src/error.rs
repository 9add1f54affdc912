//! Error types for control operations.

use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur when configuring a controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// A gain lies outside its documented range.
    #[error("Gain {field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl From<ps_core::RangeError> for ControlError {
    fn from(e: ps_core::RangeError) -> Self {
        ControlError::OutOfRange {
            field: e.what,
            value: e.value,
            min: e.min,
            max: e.max,
        }
    }
}
