//! Discrete PID controller.

use ps_core::Real;
use serde::{Deserialize, Serialize};

use crate::gains::PidGains;

/// PID controller state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ControllerState {
    /// Integral accumulator, `Σ e·dt`.
    pub integral: Real,
    /// Error seen on the previous step.
    pub previous_error: Real,
    /// False until the first step; the first step has no derivative term.
    pub has_previous_error: bool,
}

/// Stateful PID controller.
///
/// One instance per simulation run. Each call to [`PidController::step`]
/// both computes an output and advances the state, so it is not idempotent.
#[derive(Debug, Clone, PartialEq)]
pub struct PidController {
    gains: PidGains,
    state: ControllerState,
}

impl PidController {
    /// Create a controller with fresh state. Gains are assumed validated.
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            state: ControllerState::default(),
        }
    }

    pub fn gains(&self) -> &PidGains {
        &self.gains
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Clear the integral and derivative memory.
    pub fn reset(&mut self) {
        self.state = ControllerState::default();
    }

    /// Compute the control signal for `error` and advance one step of `dt`.
    pub fn step(&mut self, error: Real, dt: Real) -> Real {
        // Forward rectangular integration
        self.state.integral += error * dt;

        // No derivative on the first call: the previous error is undefined
        let derivative = if self.state.has_previous_error {
            (error - self.state.previous_error) / dt
        } else {
            0.0
        };

        let output =
            self.gains.kp * error + self.gains.ki * self.state.integral + self.gains.kd * derivative;

        self.state.previous_error = error;
        self.state.has_previous_error = true;

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_only() {
        let mut pid = PidController::new(PidGains::proportional(2.0).unwrap());
        assert_eq!(pid.step(0.5, 0.1), 1.0);
        assert_eq!(pid.step(-0.25, 0.1), -0.5);
    }

    #[test]
    fn integral_accumulates_rectangles() {
        let mut pid = PidController::new(PidGains::new(0.0, 1.0, 0.0).unwrap());
        for _ in 0..10 {
            pid.step(1.0, 0.1);
        }
        assert!((pid.state().integral - 1.0).abs() < 1e-12);
        // Output includes the current step's contribution
        let out = pid.step(1.0, 0.1);
        assert!((out - 1.1).abs() < 1e-12);
    }

    #[test]
    fn first_step_has_no_derivative_kick() {
        let mut pid = PidController::new(PidGains::new(0.0, 0.0, 2.0).unwrap());
        assert_eq!(pid.step(1.0, 0.01), 0.0);
        assert!(pid.state().has_previous_error);
        // (0.5 - 1.0) / 0.01 * 2
        let out = pid.step(0.5, 0.01);
        assert!((out + 100.0).abs() < 1e-9);
    }

    #[test]
    fn full_law_combines_terms() {
        let mut pid = PidController::new(PidGains::new(1.0, 0.5, 0.1).unwrap());
        let dt = 0.1;
        let u0 = pid.step(1.0, dt);
        // 1*1 + 0.5*(0.1) + 0
        assert!((u0 - 1.05).abs() < 1e-12);
        let u1 = pid.step(0.8, dt);
        // 1*0.8 + 0.5*(0.18) + 0.1*(-0.2/0.1)
        assert!((u1 - (0.8 + 0.09 - 0.2)).abs() < 1e-12);
    }

    #[test]
    fn reset_clears_memory() {
        let mut pid = PidController::new(PidGains::default());
        pid.step(1.0, 0.01);
        pid.step(0.5, 0.01);
        pid.reset();
        assert_eq!(pid.state(), &ControllerState::default());
    }

    #[test]
    fn disabled_gains_output_zero() {
        let mut pid = PidController::new(PidGains::disabled());
        for e in [1.0, -3.0, 0.2] {
            assert_eq!(pid.step(e, 0.01), 0.0);
        }
    }
}
