//! Human-facing summaries: metric advisories and system descriptions.

use std::fmt;

use ps_controls::{GainAdvice, PidGains};
use ps_core::{ParamRange, Real};
use ps_metrics::PerformanceMetrics;
use ps_plant::{PlantParameters, SystemDescription};
use serde::Serialize;

/// Overshoot above this percentage is flagged.
pub const OVERSHOOT_LIMIT_PERCENT: Real = 10.0;
/// Steady-state error magnitude above this is flagged.
pub const STEADY_STATE_ERROR_LIMIT: Real = 0.01;

/// A metric that falls outside the usual tuning targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Overshoot beyond [`OVERSHOOT_LIMIT_PERCENT`]; `excess` is the amount
    /// above the limit.
    HighOvershoot { overshoot_percent: Real, excess: Real },
    SteadyStateError { steady_state_error: Real },
    NotSettled,
    Diverged,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::HighOvershoot {
                overshoot_percent,
                excess,
            } => write!(
                f,
                "overshoot {overshoot_percent:.1}% is {excess:.1}% above the {OVERSHOOT_LIMIT_PERCENT}% target"
            ),
            Advisory::SteadyStateError { steady_state_error } => write!(
                f,
                "steady-state error {steady_state_error:.4} exceeds {STEADY_STATE_ERROR_LIMIT}"
            ),
            Advisory::NotSettled => f.write_str("response does not settle within the horizon"),
            Advisory::Diverged => f.write_str("closed-loop response diverges"),
        }
    }
}

/// Flag the metrics a user would want to act on. A diverged run only
/// reports the divergence.
pub fn advisories(metrics: &PerformanceMetrics) -> Vec<Advisory> {
    if metrics.diverged {
        return vec![Advisory::Diverged];
    }

    let mut out = Vec::new();
    if metrics.overshoot_percent > OVERSHOOT_LIMIT_PERCENT {
        out.push(Advisory::HighOvershoot {
            overshoot_percent: metrics.overshoot_percent,
            excess: metrics.overshoot_percent - OVERSHOOT_LIMIT_PERCENT,
        });
    }
    if metrics.steady_state_error.abs() > STEADY_STATE_ERROR_LIMIT {
        out.push(Advisory::SteadyStateError {
            steady_state_error: metrics.steady_state_error,
        });
    }
    if metrics.settling_time.is_none() {
        out.push(Advisory::NotSettled);
    }
    out
}

/// A configurable value with its current setting and valid range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterRange {
    pub field: &'static str,
    pub value: Real,
    pub range: ParamRange,
}

/// Plant and controller overview shown before running.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Describe {
    pub plant: SystemDescription,
    pub controller: String,
    pub gain_advice: Vec<GainAdvice>,
    pub parameters: Vec<ParameterRange>,
}

pub fn describe(plant: &PlantParameters, gains: &PidGains) -> Describe {
    use ps_controls::gains::{KD_RANGE, KI_RANGE, KP_RANGE};
    use ps_plant::params::{GAIN_RANGE, TAU_RANGE, WN_RANGE, ZETA_RANGE};

    let param = |field, value, range| ParameterRange {
        field,
        value,
        range,
    };
    let mut parameters = match *plant {
        PlantParameters::FirstOrder { k, tau } => {
            vec![param("k", k, GAIN_RANGE), param("tau", tau, TAU_RANGE)]
        }
        PlantParameters::SecondOrder { k, wn, zeta } => vec![
            param("k", k, GAIN_RANGE),
            param("wn", wn, WN_RANGE),
            param("zeta", zeta, ZETA_RANGE),
        ],
        PlantParameters::Integrator { k } => vec![param("k", k, GAIN_RANGE)],
    };
    parameters.extend([
        param("kp", gains.kp, KP_RANGE),
        param("ki", gains.ki, KI_RANGE),
        param("kd", gains.kd, KD_RANGE),
    ]);

    Describe {
        plant: plant.describe(),
        controller: gains.to_string(),
        gain_advice: gains.advice(),
        parameters,
    }
}
