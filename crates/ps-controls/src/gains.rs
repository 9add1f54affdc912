//! PID gain set, validation and tuning advice.

use std::fmt;

use ps_core::{ParamRange, Real};
use serde::{Deserialize, Serialize};

use crate::error::ControlResult;

/// Valid range for the proportional gain.
pub const KP_RANGE: ParamRange = ParamRange::new(0.0, 10.0);
/// Valid range for the integral gain.
pub const KI_RANGE: ParamRange = ParamRange::new(0.0, 5.0);
/// Valid range for the derivative gain.
pub const KD_RANGE: ParamRange = ParamRange::new(0.0, 2.0);

/// Proportional gains in this band give a reasonable speed/overshoot trade-off
/// on the bundled plants.
const KP_ADEQUATE: ParamRange = ParamRange::new(0.5, 3.0);

/// PID gains. Each term is disabled by a zero gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: Real,
    /// Integral gain.
    pub ki: Real,
    /// Derivative gain.
    pub kd: Real,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.1,
            kd: 0.05,
        }
    }
}

impl PidGains {
    /// Create a validated gain set.
    pub fn new(kp: Real, ki: Real, kd: Real) -> ControlResult<Self> {
        let gains = Self { kp, ki, kd };
        gains.validate()?;
        Ok(gains)
    }

    /// All-zero gains: the controller is switched off.
    pub fn disabled() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
        }
    }

    /// Proportional-only gains.
    pub fn proportional(kp: Real) -> ControlResult<Self> {
        Self::new(kp, 0.0, 0.0)
    }

    pub fn is_disabled(&self) -> bool {
        self.kp == 0.0 && self.ki == 0.0 && self.kd == 0.0
    }

    /// Check each gain against its range. Gains are never clamped.
    pub fn validate(&self) -> ControlResult<()> {
        KP_RANGE.check("kp", self.kp)?;
        KI_RANGE.check("ki", self.ki)?;
        KD_RANGE.check("kd", self.kd)?;
        Ok(())
    }

    pub fn get(&self, term: GainTerm) -> Real {
        match term {
            GainTerm::Kp => self.kp,
            GainTerm::Ki => self.ki,
            GainTerm::Kd => self.kd,
        }
    }

    /// Copy with one gain replaced (unvalidated).
    pub fn with(mut self, term: GainTerm, value: Real) -> Self {
        match term {
            GainTerm::Kp => self.kp = value,
            GainTerm::Ki => self.ki = value,
            GainTerm::Kd => self.kd = value,
        }
        self
    }

    /// Qualitative notes about each term, one entry per gain.
    pub fn advice(&self) -> Vec<GainAdvice> {
        vec![
            GainAdvice {
                term: GainTerm::Kp,
                ok: KP_ADEQUATE.contains(self.kp),
                note: if KP_ADEQUATE.contains(self.kp) {
                    "adequate proportional action"
                } else {
                    "review Kp: adjusts response speed"
                },
            },
            GainAdvice {
                term: GainTerm::Ki,
                ok: self.ki > 0.0,
                note: if self.ki > 0.0 {
                    "integral action removes steady-state error"
                } else {
                    "no integral action: steady-state error may remain"
                },
            },
            GainAdvice {
                term: GainTerm::Kd,
                ok: self.kd > 0.0,
                note: if self.kd > 0.0 {
                    "derivative action damps oscillation"
                } else {
                    "no derivative action: overshoot is not damped"
                },
            },
        ]
    }
}

/// Renders the controller transfer function, `PID(s) = Kp + Ki/s + Kd·s`.
impl fmt::Display for PidGains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PID(s) = {:.1} + {:.2}/s + {:.2}s",
            self.kp, self.ki, self.kd
        )
    }
}

/// One of the three PID terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GainTerm {
    Kp,
    Ki,
    Kd,
}

impl fmt::Display for GainTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GainTerm::Kp => "kp",
            GainTerm::Ki => "ki",
            GainTerm::Kd => "kd",
        })
    }
}

/// Tuning note for a single gain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GainAdvice {
    pub term: GainTerm,
    pub ok: bool,
    pub note: &'static str,
}
