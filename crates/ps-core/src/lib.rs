//! ps-core: shared foundation for the PID simulator.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers + step counting)
//! - range (closed parameter ranges used by configuration validation)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod range;

pub use error::{CoreError, CoreResult, RangeError};
pub use numeric::*;
pub use range::ParamRange;
