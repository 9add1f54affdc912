//! Recorded simulation output.

use ps_core::Real;
use serde::{Deserialize, Serialize};

/// One recorded time step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Time (seconds).
    pub t: Real,
    /// Reference value at `t`.
    pub reference: Real,
    /// Plant output at `t`, before the step is applied.
    pub output: Real,
    /// `reference - output`.
    pub error: Real,
    /// Plant input applied over `[t, t + dt)`.
    pub control: Real,
}

/// Time-ordered samples of one run. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Build a trajectory from `(t, output)` pairs against a constant
    /// reference. Control is recorded as zero.
    pub fn from_outputs(reference: Real, points: &[(Real, Real)]) -> Self {
        let samples = points
            .iter()
            .map(|&(t, output)| Sample {
                t,
                reference,
                output,
                error: reference - output,
                control: 0.0,
            })
            .collect();
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn times(&self) -> impl Iterator<Item = Real> + '_ {
        self.samples.iter().map(|s| s.t)
    }

    pub fn outputs(&self) -> impl Iterator<Item = Real> + '_ {
        self.samples.iter().map(|s| s.output)
    }

    pub fn final_output(&self) -> Option<Real> {
        self.last().map(|s| s.output)
    }

    /// Time covered from first to last sample.
    pub fn span(&self) -> Real {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => b.t - a.t,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_outputs_fills_error() {
        let traj = Trajectory::from_outputs(1.0, &[(0.0, 0.0), (0.5, 0.25), (1.0, 0.75)]);
        assert_eq!(traj.len(), 3);
        assert_eq!(traj.samples()[1].error, 0.75);
        assert_eq!(traj.final_output(), Some(0.75));
        assert_eq!(traj.span(), 1.0);
        assert_eq!(traj.times().collect::<Vec<_>>(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn empty_trajectory() {
        let traj = Trajectory::default();
        assert!(traj.is_empty());
        assert_eq!(traj.final_output(), None);
        assert_eq!(traj.span(), 0.0);
    }
}
