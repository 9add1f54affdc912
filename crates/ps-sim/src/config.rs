//! Simulation configuration.

use ps_core::{Real, step_count};
use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Input applied to the plant in the uncontrolled (open-loop) run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenLoopDrive {
    /// Drive the plant directly with the step reference, `u = r(t)`.
    #[default]
    Reference,
    /// Leave the plant unexcited, `u = 0`.
    Zero,
}

/// Options for a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated time span (seconds).
    pub horizon: Real,
    /// Fixed Euler step (seconds). Should be well below the plant's dominant
    /// time constant.
    pub step_size: Real,
    /// Input for the open-loop run.
    pub open_loop_drive: OpenLoopDrive,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon: 10.0,
            step_size: 0.01,
            open_loop_drive: OpenLoopDrive::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a validated configuration with the default open-loop drive.
    pub fn new(horizon: Real, step_size: Real) -> SimResult<Self> {
        let config = Self {
            horizon,
            step_size,
            open_loop_drive: OpenLoopDrive::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_open_loop_drive(mut self, drive: OpenLoopDrive) -> Self {
        self.open_loop_drive = drive;
        self
    }

    /// Check that horizon and step size are finite and positive, and that a
    /// run fits in [`ps_core::MAX_STEPS`] steps.
    pub fn validate(&self) -> SimResult<()> {
        self.step_count().map(|_| ())
    }

    /// Number of samples per run, `ceil(horizon / step_size)`.
    pub fn step_count(&self) -> SimResult<usize> {
        Ok(step_count(self.horizon, self.step_size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.horizon, 10.0);
        assert_eq!(config.step_size, 0.01);
        assert_eq!(config.open_loop_drive, OpenLoopDrive::Reference);
        assert_eq!(config.step_count().unwrap(), 1000);
    }

    #[test]
    fn invalid_horizon_or_step() {
        assert!(SimulationConfig::new(0.0, 0.01).is_err());
        assert!(SimulationConfig::new(10.0, 0.0).is_err());
        assert!(SimulationConfig::new(-1.0, 0.01).is_err());
        assert!(SimulationConfig::new(f64::NAN, 0.01).is_err());
    }

    #[test]
    fn oversized_run_is_rejected_before_allocating() {
        let err = SimulationConfig::new(1e12, 1e-6).unwrap_err();
        assert!(
            matches!(
                &err,
                crate::SimError::Core(ps_core::CoreError::OutOfRange(e)) if e.what == "step_size"
            ),
            "{err}"
        );
    }

    #[test]
    fn step_count_rounds_up() {
        let config = SimulationConfig::new(1.0, 0.3).unwrap();
        assert_eq!(config.step_count().unwrap(), 4);
    }
}
