use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// A value fell outside its inclusive `[min, max]` range.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("{what} = {value} is outside the valid range [{min}, {max}]")]
pub struct RangeError {
    pub what: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error(transparent)]
    OutOfRange(#[from] RangeError),

    #[error("{what} = {value} must be positive")]
    NotPositive { what: &'static str, value: f64 },
}
