//! Unit-step simulation driver.
//!
//! `integrate` is the single stepping loop. What differs between the
//! open-loop and closed-loop runs is only where the plant input comes from,
//! captured by the [`ControlSource`] trait.

use ps_controls::{PidController, PidGains};
use ps_core::Real;
use ps_plant::{PlantParameters, PlantState};

use crate::config::{OpenLoopDrive, SimulationConfig};
use crate::error::SimResult;
use crate::integrator::{ForwardEuler, Integrator};
use crate::model::TransientModel;
use crate::trajectory::{Sample, Trajectory};

/// Unit step reference: 1 for all `t >= 0`.
pub fn unit_step(t: Real) -> Real {
    if t >= 0.0 { 1.0 } else { 0.0 }
}

/// Supplies the plant input for each step.
pub trait ControlSource {
    /// Plant input for the step starting at `t`.
    fn control(&mut self, t: Real, reference: Real, error: Real, dt: Real) -> Real;
}

/// Uncontrolled run: the PID is bypassed.
#[derive(Debug, Clone, Copy)]
pub struct OpenLoop {
    pub drive: OpenLoopDrive,
}

impl ControlSource for OpenLoop {
    fn control(&mut self, _t: Real, reference: Real, _error: Real, _dt: Real) -> Real {
        match self.drive {
            OpenLoopDrive::Reference => reference,
            OpenLoopDrive::Zero => 0.0,
        }
    }
}

/// Feedback run: the plant input is the PID output.
#[derive(Debug, Clone)]
pub struct ClosedLoop {
    pub controller: PidController,
}

impl ClosedLoop {
    pub fn new(gains: PidGains) -> Self {
        Self {
            controller: PidController::new(gains),
        }
    }
}

impl ControlSource for ClosedLoop {
    fn control(&mut self, _t: Real, _reference: Real, error: Real, dt: Real) -> Real {
        self.controller.step(error, dt)
    }
}

/// Plant with its input held constant over one step (zero-order hold).
#[derive(Debug, Clone)]
pub struct DrivenPlant<'a> {
    pub params: &'a PlantParameters,
    pub input: Real,
}

impl TransientModel for DrivenPlant<'_> {
    type State = PlantState;

    fn initial_state(&self) -> PlantState {
        PlantState::zeros_for(self.params)
    }

    fn rhs(&mut self, _t: Real, x: &PlantState) -> SimResult<PlantState> {
        Ok(ps_plant::derivative(self.params, x, self.input)?)
    }

    fn add(&self, a: &PlantState, b: &PlantState) -> PlantState {
        a.add(b)
    }

    fn scale(&self, a: &PlantState, factor: Real) -> PlantState {
        a.scale(factor)
    }
}

/// Integrate the plant from rest under a unit step, taking the input from
/// `source`, and record every step.
pub fn integrate<C: ControlSource>(
    params: &PlantParameters,
    config: &SimulationConfig,
    source: &mut C,
) -> SimResult<Trajectory> {
    let steps = config.step_count()?;
    let dt = config.step_size;

    let mut plant = DrivenPlant { params, input: 0.0 };
    let mut state = plant.initial_state();
    let mut samples = Vec::with_capacity(steps);
    let mut warned = false;

    for i in 0..steps {
        let t = i as Real * dt;
        let reference = unit_step(t);
        let output = ps_plant::output(params, &state)?;
        let error = reference - output;

        if !output.is_finite() && !warned {
            tracing::warn!(t, output, "plant output is no longer finite");
            warned = true;
        }

        let control = source.control(t, reference, error, dt);
        plant.input = control;
        state = ForwardEuler.step(&mut plant, t, &state, dt)?;

        samples.push(Sample {
            t,
            reference,
            output,
            error,
            control,
        });
    }

    Ok(Trajectory::from_samples(samples))
}

/// Simulate the open-loop and closed-loop step responses.
///
/// Returns `(open_loop, closed_loop)`. Each run owns its own plant state and
/// the closed-loop run owns a fresh controller. With all gains zero the
/// controller is bypassed and the closed-loop run repeats the open-loop one.
pub fn run(
    params: &PlantParameters,
    gains: &PidGains,
    config: &SimulationConfig,
) -> SimResult<(Trajectory, Trajectory)> {
    params.validate()?;
    gains.validate()?;
    let steps = config.step_count()?;

    tracing::debug!(
        plant = %params,
        controller = %gains,
        steps,
        dt = config.step_size,
        "starting step response runs"
    );

    let mut open = OpenLoop {
        drive: config.open_loop_drive,
    };
    let open_loop = integrate(params, config, &mut open)?;

    let closed_loop = if gains.is_disabled() {
        let mut bypass = OpenLoop {
            drive: config.open_loop_drive,
        };
        integrate(params, config, &mut bypass)?
    } else {
        let mut closed = ClosedLoop::new(*gains);
        integrate(params, config, &mut closed)?
    };

    tracing::debug!(
        open_final = ?open_loop.final_output(),
        closed_final = ?closed_loop.final_output(),
        "step response runs finished"
    );

    Ok((open_loop, closed_loop))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimError;

    fn config(horizon: Real, dt: Real) -> SimulationConfig {
        SimulationConfig::new(horizon, dt).unwrap()
    }

    #[test]
    fn unit_step_includes_zero() {
        assert_eq!(unit_step(0.0), 1.0);
        assert_eq!(unit_step(5.0), 1.0);
        assert_eq!(unit_step(-0.1), 0.0);
    }

    #[test]
    fn records_output_before_update() {
        let params = PlantParameters::FirstOrder { k: 1.0, tau: 1.0 };
        let traj = integrate(&params, &config(0.3, 0.1), &mut OpenLoop {
            drive: OpenLoopDrive::Reference,
        })
        .unwrap();
        assert_eq!(traj.len(), 3);
        let s = traj.samples();
        assert_eq!(s[0].output, 0.0);
        assert_eq!(s[0].error, 1.0);
        assert_eq!(s[0].control, 1.0);
        // y1 = 0 + 0.1 * (1 - 0) / 1
        assert!((s[1].output - 0.1).abs() < 1e-12);
        // y2 = 0.1 + 0.1 * (1 - 0.1)
        assert!((s[2].output - 0.19).abs() < 1e-12);
    }

    #[test]
    fn sample_times_are_uniform() {
        let params = PlantParameters::Integrator { k: 1.0 };
        let traj = integrate(&params, &config(1.0, 0.25), &mut OpenLoop {
            drive: OpenLoopDrive::Reference,
        })
        .unwrap();
        assert_eq!(traj.times().collect::<Vec<_>>(), vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn zero_drive_leaves_plant_at_rest() {
        let params = PlantParameters::SecondOrder {
            k: 1.0,
            wn: 1.0,
            zeta: 0.5,
        };
        let traj = integrate(&params, &config(1.0, 0.01), &mut OpenLoop {
            drive: OpenLoopDrive::Zero,
        })
        .unwrap();
        assert!(traj.outputs().all(|y| y == 0.0));
        assert!(traj.samples().iter().all(|s| s.error == 1.0 && s.control == 0.0));
    }

    #[test]
    fn closed_loop_records_pid_output() {
        let params = PlantParameters::FirstOrder { k: 1.0, tau: 1.0 };
        let gains = PidGains::proportional(2.0).unwrap();
        let (_, closed) = run(&params, &gains, &config(0.05, 0.01)).unwrap();
        for s in closed.samples() {
            assert!((s.control - 2.0 * s.error).abs() < 1e-12);
        }
    }

    #[test]
    fn invalid_parameters_fail_before_stepping() {
        let params = PlantParameters::FirstOrder { k: 1.0, tau: 0.0 };
        let err = run(&params, &PidGains::default(), &SimulationConfig::default()).unwrap_err();
        assert!(matches!(err, SimError::Plant(_)));

        let gains = PidGains {
            kp: 11.0,
            ki: 0.0,
            kd: 0.0,
        };
        let err = run(&PlantParameters::default(), &gains, &SimulationConfig::default())
            .unwrap_err();
        assert!(matches!(err, SimError::Control(_)));

        let bad = SimulationConfig {
            step_size: 0.0,
            ..SimulationConfig::default()
        };
        let err = run(&PlantParameters::default(), &PidGains::default(), &bad).unwrap_err();
        assert!(matches!(err, SimError::Core(_)));
    }

    #[test]
    fn runs_are_deterministic() {
        let params = PlantParameters::SecondOrder {
            k: 2.0,
            wn: 1.5,
            zeta: 0.3,
        };
        let gains = PidGains::new(3.0, 1.0, 0.2).unwrap();
        let cfg = config(5.0, 0.01);
        let a = run(&params, &gains, &cfg).unwrap();
        let b = run(&params, &gains, &cfg).unwrap();
        assert_eq!(a, b);
    }
}
