//! Closed parameter ranges.

use crate::{RangeError, Real};

/// Inclusive `[min, max]` range a configuration value must fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamRange {
    pub min: Real,
    pub max: Real,
}

impl ParamRange {
    pub const fn new(min: Real, max: Real) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: Real) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Check `value` against the range, naming the offending field on failure.
    pub fn check(&self, what: &'static str, value: Real) -> Result<Real, RangeError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(RangeError {
                what,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}
