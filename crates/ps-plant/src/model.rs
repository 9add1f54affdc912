//! Plant state and dynamics.

use ps_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::{PlantError, PlantResult};
use crate::params::PlantParameters;

/// Plant state vector.
///
/// Length 1 for first-order and integrator plants (`[y]`), length 2 for the
/// second-order plant (`[x1, x2]`, position and velocity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantState(Vec<Real>);

impl PlantState {
    /// Zero state sized for the given plant.
    pub fn zeros_for(params: &PlantParameters) -> Self {
        Self(vec![0.0; params.state_dim()])
    }

    pub fn from_vec(values: Vec<Real>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Element-wise sum: `self + other`.
    pub fn add(&self, other: &PlantState) -> PlantState {
        PlantState(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect())
    }

    /// Scale every element: `factor * self`.
    pub fn scale(&self, factor: Real) -> PlantState {
        PlantState(self.0.iter().map(|v| v * factor).collect())
    }

    fn check_dim(&self, params: &PlantParameters) -> PlantResult<()> {
        let expected = params.state_dim();
        if self.0.len() != expected {
            return Err(PlantError::DimensionMismatch {
                expected,
                got: self.0.len(),
            });
        }
        Ok(())
    }
}

/// State derivative `dx/dt = f(x, u)` for the given plant.
pub fn derivative(params: &PlantParameters, state: &PlantState, u: Real) -> PlantResult<PlantState> {
    state.check_dim(params)?;
    let x = state.as_slice();

    let dx = match *params {
        PlantParameters::FirstOrder { k, tau } => vec![(k * u - x[0]) / tau],
        PlantParameters::Integrator { k } => vec![k * u],
        PlantParameters::SecondOrder { k, wn, zeta } => {
            let wn2 = wn * wn;
            vec![x[1], -wn2 * x[0] - 2.0 * zeta * wn * x[1] + k * wn2 * u]
        }
    };

    Ok(PlantState(dx))
}

/// Measured output: the first state component for every plant.
pub fn output(params: &PlantParameters, state: &PlantState) -> PlantResult<Real> {
    state.check_dim(params)?;
    Ok(state.as_slice()[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_order_derivative() {
        let params = PlantParameters::FirstOrder { k: 2.0, tau: 0.5 };
        let state = PlantState::from_vec(vec![1.0]);
        let dx = derivative(&params, &state, 1.0).unwrap();
        // (2*1 - 1) / 0.5
        assert_eq!(dx.as_slice(), &[2.0]);
    }

    #[test]
    fn first_order_rest_at_equilibrium() {
        let params = PlantParameters::FirstOrder { k: 3.0, tau: 2.0 };
        let state = PlantState::from_vec(vec![3.0]);
        let dx = derivative(&params, &state, 1.0).unwrap();
        assert_eq!(dx.as_slice(), &[0.0]);
    }

    #[test]
    fn integrator_derivative_ignores_state() {
        let params = PlantParameters::Integrator { k: 1.5 };
        let a = derivative(&params, &PlantState::from_vec(vec![0.0]), 2.0).unwrap();
        let b = derivative(&params, &PlantState::from_vec(vec![42.0]), 2.0).unwrap();
        assert_eq!(a.as_slice(), &[3.0]);
        assert_eq!(a, b);
    }

    #[test]
    fn second_order_derivative() {
        let params = PlantParameters::SecondOrder {
            k: 1.0,
            wn: 2.0,
            zeta: 0.5,
        };
        let state = PlantState::from_vec(vec![0.5, 1.0]);
        let dx = derivative(&params, &state, 1.0).unwrap();
        // dx1 = x2; dx2 = -4*0.5 - 2*0.5*2*1 + 1*4*1 = -2 - 2 + 4
        assert_eq!(dx.as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn output_projects_first_component() {
        let params = PlantParameters::SecondOrder {
            k: 1.0,
            wn: 1.0,
            zeta: 0.5,
        };
        let state = PlantState::from_vec(vec![0.25, -3.0]);
        assert_eq!(output(&params, &state).unwrap(), 0.25);
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let params = PlantParameters::SecondOrder {
            k: 1.0,
            wn: 1.0,
            zeta: 0.5,
        };
        let state = PlantState::from_vec(vec![0.0]);
        assert_eq!(
            derivative(&params, &state, 1.0).unwrap_err(),
            PlantError::DimensionMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn zero_state_matches_dimension() {
        let fo = PlantParameters::default();
        assert_eq!(PlantState::zeros_for(&fo).len(), 1);
        let so = PlantParameters::SecondOrder {
            k: 1.0,
            wn: 1.0,
            zeta: 0.5,
        };
        assert_eq!(PlantState::zeros_for(&so).as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn add_and_scale() {
        let a = PlantState::from_vec(vec![1.0, 2.0]);
        let b = PlantState::from_vec(vec![0.5, -1.0]);
        assert_eq!(a.add(&b).as_slice(), &[1.5, 1.0]);
        assert_eq!(a.scale(0.5).as_slice(), &[0.5, 1.0]);
    }
}
