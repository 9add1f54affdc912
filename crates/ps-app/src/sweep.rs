//! Gain sweeps: rerun one request while varying a single PID term.

use ps_controls::GainTerm;
use ps_core::Real;
use ps_metrics::{MetricsConfig, PerformanceMetrics};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::service::{SimulationRequest, simulate_with};

/// Closed-loop metrics for one value of the swept gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub term: GainTerm,
    pub value: Real,
    pub metrics: PerformanceMetrics,
}

/// Simulate `base` once per entry of `values`, with `term` replaced by that
/// value, scoring each run with `metrics`. Points come back in the order of
/// `values`.
///
/// Runs are independent and execute in parallel. The first invalid value
/// fails the whole sweep.
pub fn sweep(
    base: &SimulationRequest,
    term: GainTerm,
    values: &[Real],
    metrics: &MetricsConfig,
) -> AppResult<Vec<SweepPoint>> {
    if values.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "no values given for {term} sweep"
        )));
    }
    tracing::debug!(%term, points = values.len(), "starting gain sweep");

    values
        .par_iter()
        .map(|&value| {
            let request = SimulationRequest {
                gains: base.gains.with(term, value),
                ..base.clone()
            };
            Ok(SweepPoint {
                term,
                value,
                metrics: simulate_with(&request, metrics)?.metrics,
            })
        })
        .collect()
}
