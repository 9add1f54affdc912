//! Fixed-step time integrators.

use ps_core::Real;

use crate::error::SimResult;
use crate::model::TransientModel;

/// Advances a [`TransientModel`] by one fixed step.
pub trait Integrator {
    /// State at `t + dt` given the state `x` at `t`.
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: Real,
        x: &M::State,
        dt: Real,
    ) -> SimResult<M::State>;
}

/// Forward Euler (explicit, 1st order).
///
/// `x_new = x + dt * rhs(t, x)`. No error control and no higher-order
/// correction; large steps relative to the plant time constants go unstable.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: Real,
        x: &M::State,
        dt: Real,
    ) -> SimResult<M::State> {
        let xdot = model.rhs(t, x)?;
        Ok(model.add(x, &model.scale(&xdot, dt)))
    }
}
