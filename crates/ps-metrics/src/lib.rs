//! Step response performance metrics.
//!
//! Computes settling time, overshoot, rise time and steady-state error from
//! a recorded closed-loop trajectory. "Never reached within the horizon" is
//! reported as `None`, not as an error. A diverging response is flagged and
//! gets no rise or settling time; its overshoot still reflects the raw peak.
//!
//! Threshold crossings are linearly interpolated between the two bracketing
//! samples instead of snapping to a sample time. A response whose tail is
//! still drifting out of the settling band is reported as not settled.

use ps_core::Real;
use ps_sim::{Sample, Trajectory};
use serde::{Deserialize, Serialize};

/// Thresholds used when extracting metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Half-width of the settling band as a fraction of the final value.
    pub settling_band: Real,
    /// Lower rise-time level as a fraction of the reference.
    pub rise_low: Real,
    /// Upper rise-time level as a fraction of the reference.
    pub rise_high: Real,
    /// Minimum share of the trajectory span the settled suffix must cover.
    ///
    /// Any smooth signal stays within 2% of its own last value for some
    /// final stretch; a ramp does so for exactly 2% of the span.
    pub min_settled_fraction: Real,
    /// Outputs beyond `divergence_limit · max(|reference|, 1)` mark the run
    /// as diverged.
    pub divergence_limit: Real,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            settling_band: 0.02,
            rise_low: 0.1,
            rise_high: 0.9,
            min_settled_fraction: 0.05,
            divergence_limit: 1e6,
        }
    }
}

/// Time-domain summary of a step response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Earliest time after which the output stays within the settling band.
    pub settling_time: Option<Real>,
    /// Peak excursion above the reference, percent of the reference.
    pub overshoot_percent: Real,
    /// Time from the 10% crossing to the 90% crossing.
    pub rise_time: Option<Real>,
    /// `reference - final output`.
    pub steady_state_error: Real,
    /// Output became non-finite or grew past the divergence limit.
    pub diverged: bool,
}

/// Extract metrics with the default thresholds.
pub fn extract(trajectory: &Trajectory, reference_final_value: Real) -> PerformanceMetrics {
    extract_with(trajectory, reference_final_value, &MetricsConfig::default())
}

/// Extract metrics with explicit thresholds.
pub fn extract_with(
    trajectory: &Trajectory,
    reference_final_value: Real,
    config: &MetricsConfig,
) -> PerformanceMetrics {
    let r = reference_final_value;
    let samples = trajectory.samples();

    let steady_state_error = trajectory.final_output().map_or(r, |y| r - y);
    let overshoot_percent = overshoot_percent(samples, r);
    let diverged = is_diverged(samples, r, config.divergence_limit);

    let (rise_time, settling_time) = if diverged {
        (None, None)
    } else {
        (
            rise_time(samples, r, config.rise_low, config.rise_high),
            settling_time(samples, r, config),
        )
    };

    PerformanceMetrics {
        settling_time,
        overshoot_percent,
        rise_time,
        steady_state_error,
        diverged,
    }
}

/// Peak overshoot in percent; zero when the output never passes the reference.
fn overshoot_percent(samples: &[Sample], r: Real) -> Real {
    if r == 0.0 {
        return 0.0;
    }
    // f64::max skips NaN, so a run that blows up still reports its last finite peak
    let peak = samples
        .iter()
        .map(|s| s.output / r)
        .fold(Real::NEG_INFINITY, Real::max);
    ((peak - 1.0) * 100.0).max(0.0)
}

fn is_diverged(samples: &[Sample], r: Real, limit: Real) -> bool {
    let bound = limit * r.abs().max(1.0);
    samples
        .iter()
        .any(|s| !s.output.is_finite() || s.output.abs() > bound)
}

/// Time between the first ascending crossings of `low·r` and `high·r`.
fn rise_time(samples: &[Sample], r: Real, low: Real, high: Real) -> Option<Real> {
    if r == 0.0 {
        return None;
    }
    let t_high = first_crossing(samples, r, high)?;
    let t_low = first_crossing(samples, r, low)?;
    Some(t_high - t_low)
}

/// First time the normalized output `y / r` rises to `level`.
fn first_crossing(samples: &[Sample], r: Real, level: Real) -> Option<Real> {
    let first = samples.first()?;
    if first.output / r >= level {
        return Some(first.t);
    }
    samples.windows(2).find_map(|w| {
        let (v0, v1) = (w[0].output / r, w[1].output / r);
        (v0 < level && v1 >= level).then(|| interpolate(w[0].t, v0, w[1].t, v1, level))
    })
}

/// Earliest time after which every sample stays in the band around the
/// final output.
fn settling_time(samples: &[Sample], r: Real, config: &MetricsConfig) -> Option<Real> {
    if samples.len() < 2 {
        return None;
    }
    let first = samples[0];
    let last = samples[samples.len() - 1];

    let target = last.output;
    let scale = if target != 0.0 { target.abs() } else { r.abs() };
    let tol = config.settling_band * scale;
    if tol <= 0.0 {
        return None;
    }

    // Suffix scan: the last sample outside the band bounds the settled stretch
    let outside = samples
        .iter()
        .rposition(|s| (s.output - target).abs() > tol);

    let settle_t = match outside {
        None => first.t,
        Some(j) => {
            let (a, b) = (samples[j], samples[j + 1]);
            let edge = if a.output > target {
                target + tol
            } else {
                target - tol
            };
            interpolate(a.t, a.output, b.t, b.output, edge)
        }
    };

    let span = last.t - first.t;
    let held = last.t - settle_t;
    if held < config.min_settled_fraction * span {
        return None;
    }

    // A tail still drifting toward a value outside the band has not settled
    let limit = tail_limit(samples, 1e-3 * tol)?;
    if (limit - target).abs() > tol {
        return None;
    }
    Some(settle_t)
}

/// Value the output is heading to, extrapolated geometrically from three
/// equally spaced points over the last fifth of the run.
///
/// `None` when the tail is not contracting. Changes at or below `noise`
/// count as stationary, as does a tail that has turned around.
fn tail_limit(samples: &[Sample], noise: Real) -> Option<Real> {
    let n = samples.len();
    let m = ((n - 1) / 10).max(1);
    let y2 = samples[n - 1].output;
    if n < 2 * m + 1 {
        return Some(y2);
    }
    let y0 = samples[n - 1 - 2 * m].output;
    let y1 = samples[n - 1 - m].output;

    let (d1, d2) = (y1 - y0, y2 - y1);
    if d2.abs() <= noise || d1 * d2 <= 0.0 {
        return Some(y2);
    }
    if d2.abs() >= d1.abs() {
        return None;
    }
    let q = d2 / d1;
    Some(y2 + d2 * q / (1.0 - q))
}

/// Time at which the segment `(t0, v0) -> (t1, v1)` reaches `level`.
fn interpolate(t0: Real, v0: Real, t1: Real, v1: Real, level: Real) -> Real {
    let dv = v1 - v0;
    if dv == 0.0 {
        return t1;
    }
    t0 + (level - v0) / dv * (t1 - t0)
}
