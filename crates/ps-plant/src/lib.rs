//! Plant models for the PID simulator.
//!
//! A plant is one of three linear, time-invariant systems driven by a scalar
//! input `u`:
//!
//! - **First order**: `G(s) = K / (τs + 1)`
//! - **Second order**: `G(s) = K·ωn² / (s² + 2ζωn·s + ωn²)`
//! - **Integrator**: `G(s) = K / s`
//!
//! Each variant supplies a pure state-derivative function and an output
//! projection. Parameters are validated once, up front; the model itself
//! never clamps at runtime.

pub mod describe;
pub mod error;
pub mod model;
pub mod params;

pub use describe::{DampingClass, Pole, SystemDescription};
pub use error::{PlantError, PlantResult};
pub use model::{PlantState, derivative, output};
pub use params::{PlantKind, PlantParameters};
