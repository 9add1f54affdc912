//! Qualitative description of a plant: poles, DC gain, damping class.

use std::fmt;

use ps_core::Real;
use serde::{Deserialize, Serialize};

use crate::params::{PlantKind, PlantParameters};

/// A pole of the plant transfer function, `re + j·im`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pole {
    pub re: Real,
    pub im: Real,
}

impl Pole {
    pub fn real(re: Real) -> Self {
        Self { re, im: 0.0 }
    }

    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }
}

impl fmt::Display for Pole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_real() {
            write!(f, "{:.3}", self.re)
        } else if self.im > 0.0 {
            write!(f, "{:.3} + {:.3}j", self.re, self.im)
        } else {
            write!(f, "{:.3} - {:.3}j", self.re, -self.im)
        }
    }
}

/// Damping regime of a second-order plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DampingClass {
    /// ζ < 1: oscillatory step response.
    Underdamped,
    /// ζ = 1: fastest response without overshoot.
    CriticallyDamped,
    /// ζ > 1: sluggish, non-oscillatory.
    Overdamped,
}

impl DampingClass {
    pub fn from_zeta(zeta: Real) -> Self {
        if zeta < 1.0 {
            DampingClass::Underdamped
        } else if zeta == 1.0 {
            DampingClass::CriticallyDamped
        } else {
            DampingClass::Overdamped
        }
    }
}

/// Summary of plant characteristics shown next to a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDescription {
    pub kind: PlantKind,
    pub transfer_function: String,
    pub dc_gain: Real,
    pub poles: Vec<Pole>,
    /// System type: number of poles at the origin.
    pub system_type: u8,
    pub time_constant: Option<Real>,
    pub natural_frequency: Option<Real>,
    pub damping_ratio: Option<Real>,
    pub damping: Option<DampingClass>,
    pub behavior: String,
}

impl PlantParameters {
    /// Describe the plant's poles and expected step-response character.
    pub fn describe(&self) -> SystemDescription {
        let transfer_function = self.to_string();
        match *self {
            PlantParameters::FirstOrder { k, tau } => SystemDescription {
                kind: PlantKind::FirstOrder,
                transfer_function,
                dc_gain: k,
                poles: vec![Pole::real(-1.0 / tau)],
                system_type: 0,
                time_constant: Some(tau),
                natural_frequency: None,
                damping_ratio: None,
                damping: None,
                behavior: "exponential response".to_string(),
            },
            PlantParameters::SecondOrder { k, wn, zeta } => {
                let damping = DampingClass::from_zeta(zeta);
                let behavior = match damping {
                    DampingClass::Underdamped => "underdamped (oscillatory)",
                    DampingClass::CriticallyDamped => "critically damped",
                    DampingClass::Overdamped => "overdamped",
                };
                SystemDescription {
                    kind: PlantKind::SecondOrder,
                    transfer_function,
                    dc_gain: k,
                    poles: second_order_poles(wn, zeta).to_vec(),
                    system_type: 0,
                    time_constant: None,
                    natural_frequency: Some(wn),
                    damping_ratio: Some(zeta),
                    damping: Some(damping),
                    behavior: behavior.to_string(),
                }
            }
            PlantParameters::Integrator { k } => SystemDescription {
                kind: PlantKind::Integrator,
                transfer_function,
                dc_gain: k,
                poles: vec![Pole::real(0.0)],
                system_type: 1,
                time_constant: None,
                natural_frequency: None,
                damping_ratio: None,
                damping: None,
                behavior: "type 1 system, zero steady-state error to a step".to_string(),
            },
        }
    }
}

/// Roots of `s² + 2ζωn·s + ωn²`.
fn second_order_poles(wn: Real, zeta: Real) -> [Pole; 2] {
    let re = -zeta * wn;
    let disc = zeta * zeta - 1.0;
    if disc < 0.0 {
        let im = wn * (-disc).sqrt();
        [Pole { re, im }, Pole { re, im: -im }]
    } else {
        let spread = wn * disc.sqrt();
        [Pole::real(re + spread), Pole::real(re - spread)]
    }
}
