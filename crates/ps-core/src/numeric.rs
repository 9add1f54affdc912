use crate::{CoreError, RangeError};

/// Floating point type used throughout the simulator.
pub type Real = f64;

/// Upper bound on the number of fixed steps in one run.
pub const MAX_STEPS: usize = 1_000_000;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Number of fixed steps needed to cover `horizon` with steps of `dt`.
///
/// Computes `ceil(horizon / dt)`, ignoring float noise below a relative
/// 1e-9 so that e.g. `10.0 / 0.01` yields 1000 rather than 1001.
///
/// A step size that would need more than [`MAX_STEPS`] steps is reported as
/// out of range, with the smallest admissible step as the lower bound.
pub fn step_count(horizon: Real, dt: Real) -> Result<usize, CoreError> {
    let horizon = ensure_finite(horizon, "horizon")?;
    let dt = ensure_finite(dt, "step_size")?;
    if horizon <= 0.0 {
        return Err(CoreError::NotPositive {
            what: "horizon",
            value: horizon,
        });
    }
    if dt <= 0.0 {
        return Err(CoreError::NotPositive {
            what: "step_size",
            value: dt,
        });
    }

    let ratio = horizon / dt;
    let rounded = ratio.round();
    let steps = if nearly_equal(ratio, rounded, Tolerances { abs: 0.0, rel: 1e-9 }) {
        rounded
    } else {
        ratio.ceil()
    };
    // also catches an infinite ratio from a subnormal dt
    if steps > MAX_STEPS as Real {
        return Err(RangeError {
            what: "step_size",
            value: dt,
            min: horizon / MAX_STEPS as Real,
            max: Real::INFINITY,
        }
        .into());
    }
    Ok((steps as usize).max(1))
}
