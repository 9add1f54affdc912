//! Discrete PID control for the simulator.
//!
//! The controller approximates the continuous law
//! `u = Kp·e + Ki·∫e dt + Kd·de/dt` with forward rectangular integration
//! and a backward difference for the derivative. There is no output
//! limiting and no anti-windup; gains are validated once at configuration
//! time and the control signal is reported as computed.

pub mod controller;
pub mod error;
pub mod gains;

pub use controller::{ControllerState, PidController};
pub use error::{ControlError, ControlResult};
pub use gains::{GainAdvice, GainTerm, PidGains};
