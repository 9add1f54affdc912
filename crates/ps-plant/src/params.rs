//! Plant kinds and their coefficient sets.

use std::fmt;

use ps_core::{ParamRange, Real};
use serde::{Deserialize, Serialize};

use crate::error::PlantResult;

/// Valid range for the static gain `K` of every plant.
pub const GAIN_RANGE: ParamRange = ParamRange::new(0.1, 5.0);
/// Valid range for the first-order time constant `τ` (seconds).
pub const TAU_RANGE: ParamRange = ParamRange::new(0.1, 5.0);
/// Valid range for the natural frequency `ωn` (rad/s).
pub const WN_RANGE: ParamRange = ParamRange::new(0.1, 5.0);
/// Valid range for the damping ratio `ζ`.
pub const ZETA_RANGE: ParamRange = ParamRange::new(0.1, 2.0);

/// The supported plant structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantKind {
    FirstOrder,
    SecondOrder,
    Integrator,
}

impl PlantKind {
    pub const ALL: [PlantKind; 3] = [
        PlantKind::FirstOrder,
        PlantKind::SecondOrder,
        PlantKind::Integrator,
    ];

    /// Length of the state vector for this plant.
    pub fn state_dim(self) -> usize {
        match self {
            PlantKind::FirstOrder | PlantKind::Integrator => 1,
            PlantKind::SecondOrder => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlantKind::FirstOrder => "first order",
            PlantKind::SecondOrder => "second order",
            PlantKind::Integrator => "integrator",
        }
    }
}

impl fmt::Display for PlantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Plant coefficients, tagged by plant kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlantParameters {
    /// `τ·dy/dt + y = K·u`
    FirstOrder { k: Real, tau: Real },
    /// Controllable canonical form of `K·ωn² / (s² + 2ζωn·s + ωn²)`.
    SecondOrder { k: Real, wn: Real, zeta: Real },
    /// `dy/dt = K·u`
    Integrator { k: Real },
}

impl PlantParameters {
    /// Build validated first-order parameters.
    pub fn first_order(k: Real, tau: Real) -> PlantResult<Self> {
        let params = PlantParameters::FirstOrder { k, tau };
        params.validate()?;
        Ok(params)
    }

    /// Build validated second-order parameters.
    pub fn second_order(k: Real, wn: Real, zeta: Real) -> PlantResult<Self> {
        let params = PlantParameters::SecondOrder { k, wn, zeta };
        params.validate()?;
        Ok(params)
    }

    /// Build validated integrator parameters.
    pub fn integrator(k: Real) -> PlantResult<Self> {
        let params = PlantParameters::Integrator { k };
        params.validate()?;
        Ok(params)
    }

    /// Default coefficients for a plant kind: unit gain, unit time constant
    /// and natural frequency, damping ratio 0.5.
    pub fn default_for(kind: PlantKind) -> Self {
        match kind {
            PlantKind::FirstOrder => PlantParameters::FirstOrder { k: 1.0, tau: 1.0 },
            PlantKind::SecondOrder => PlantParameters::SecondOrder {
                k: 1.0,
                wn: 1.0,
                zeta: 0.5,
            },
            PlantKind::Integrator => PlantParameters::Integrator { k: 1.0 },
        }
    }

    pub fn kind(&self) -> PlantKind {
        match self {
            PlantParameters::FirstOrder { .. } => PlantKind::FirstOrder,
            PlantParameters::SecondOrder { .. } => PlantKind::SecondOrder,
            PlantParameters::Integrator { .. } => PlantKind::Integrator,
        }
    }

    /// Static gain `K`.
    pub fn gain(&self) -> Real {
        match *self {
            PlantParameters::FirstOrder { k, .. }
            | PlantParameters::SecondOrder { k, .. }
            | PlantParameters::Integrator { k } => k,
        }
    }

    pub fn state_dim(&self) -> usize {
        self.kind().state_dim()
    }

    /// Check every coefficient against its documented range.
    ///
    /// The ranges exclude zero, so `τ`, `ωn` and `K` are strictly positive
    /// once this passes.
    pub fn validate(&self) -> PlantResult<()> {
        match *self {
            PlantParameters::FirstOrder { k, tau } => {
                GAIN_RANGE.check("k", k)?;
                TAU_RANGE.check("tau", tau)?;
            }
            PlantParameters::SecondOrder { k, wn, zeta } => {
                GAIN_RANGE.check("k", k)?;
                WN_RANGE.check("wn", wn)?;
                ZETA_RANGE.check("zeta", zeta)?;
            }
            PlantParameters::Integrator { k } => {
                GAIN_RANGE.check("k", k)?;
            }
        }
        Ok(())
    }
}

impl Default for PlantParameters {
    fn default() -> Self {
        PlantParameters::default_for(PlantKind::FirstOrder)
    }
}

/// Renders the transfer function, e.g. `G(s) = 2/(0.5s + 1)`.
impl fmt::Display for PlantParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlantParameters::FirstOrder { k, tau } => write!(f, "G(s) = {k}/({tau}s + 1)"),
            PlantParameters::SecondOrder { k, wn, zeta } => write!(
                f,
                "G(s) = {k}·{wn:.1}^2/(s^2 + {:.1}s + {wn:.1}^2)",
                2.0 * zeta * wn
            ),
            PlantParameters::Integrator { k } => write!(f, "G(s) = {k}/s"),
        }
    }
}
