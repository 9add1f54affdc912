//! Continuous-time systems that an [`Integrator`](crate::Integrator) can step.

use ps_core::Real;

use crate::error::SimResult;

/// A system `dx/dt = f(t, x)` with its own state representation.
///
/// The state arithmetic lives on the model so integrators stay generic over
/// scalar and vector states.
pub trait TransientModel {
    type State: Clone;

    /// State at `t = 0`. Plants start at rest.
    fn initial_state(&self) -> Self::State;

    /// Time derivative of `x` at `t`.
    fn rhs(&mut self, t: Real, x: &Self::State) -> SimResult<Self::State>;

    /// `a + b`
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// `factor · a`
    fn scale(&self, a: &Self::State, factor: Real) -> Self::State;
}
