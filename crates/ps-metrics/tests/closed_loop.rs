//! Metrics extracted from simulated closed-loop responses.

use proptest::prelude::*;
use ps_controls::PidGains;
use ps_metrics::{MetricsConfig, extract};
use ps_plant::PlantParameters;
use ps_sim::{SimulationConfig, Trajectory, run};

fn closed_loop(params: PlantParameters, gains: PidGains, horizon: f64, dt: f64) -> Trajectory {
    let config = SimulationConfig::new(horizon, dt).unwrap();
    run(&params, &gains, &config).unwrap().1
}

#[test]
fn first_order_proportional_control() {
    let traj = closed_loop(
        PlantParameters::FirstOrder { k: 1.0, tau: 1.0 },
        PidGains::proportional(2.0).unwrap(),
        10.0,
        0.01,
    );
    let m = extract(&traj, 1.0);

    assert_eq!(m.overshoot_percent, 0.0);
    assert!(m.steady_state_error > 0.0);
    assert!((m.steady_state_error - 1.0 / 3.0).abs() < 1e-6);
    let settle = m.settling_time.expect("proportional response settles");
    assert!(settle < 10.0);
    assert!(!m.diverged);
}

#[test]
fn underdamped_second_order_open_loop() {
    let traj = closed_loop(
        PlantParameters::SecondOrder {
            k: 1.0,
            wn: 1.0,
            zeta: 0.2,
        },
        PidGains::disabled(),
        10.0,
        0.01,
    );
    let m = extract(&traj, 1.0);

    assert!(m.overshoot_percent > 0.0);
    assert!(m.rise_time.is_some());
}

#[test]
fn integral_action_removes_steady_state_error() {
    let params = PlantParameters::FirstOrder { k: 1.0, tau: 1.0 };
    let errors: Vec<f64> = [0.5, 2.0, 4.0]
        .iter()
        .map(|&ki| {
            let traj = closed_loop(params, PidGains::new(5.0, ki, 0.0).unwrap(), 20.0, 0.01);
            extract(&traj, 1.0).steady_state_error.abs()
        })
        .collect();

    assert!(errors[0] > errors[1], "{errors:?}");
    assert!(errors[1] > errors[2], "{errors:?}");
    assert!(errors[2] < 1e-4, "{errors:?}");

    let p_only = closed_loop(params, PidGains::proportional(5.0).unwrap(), 20.0, 0.01);
    assert!(extract(&p_only, 1.0).steady_state_error > errors[0]);
}

#[test]
fn unstable_gains_report_divergence() {
    // Derivative kick on a fast integrator makes the Euler loop explode
    let traj = closed_loop(
        PlantParameters::Integrator { k: 5.0 },
        PidGains::new(10.0, 5.0, 2.0).unwrap(),
        5.0,
        0.01,
    );
    let m = extract(&traj, 1.0);

    assert!(m.diverged);
    assert_eq!(m.settling_time, None);
    assert_eq!(m.rise_time, None);
    assert!(m.overshoot_percent > 100.0);
}

#[test]
fn integrator_with_proportional_control_has_no_offset() {
    let traj = closed_loop(
        PlantParameters::Integrator { k: 1.0 },
        PidGains::proportional(2.0).unwrap(),
        10.0,
        0.01,
    );
    let m = extract(&traj, 1.0);
    assert!(m.steady_state_error.abs() < 1e-6);
    assert_eq!(m.overshoot_percent, 0.0);
    assert!(m.settling_time.unwrap() < 3.0);
}

#[test]
fn slow_first_order_is_not_settled_mid_transient() {
    // tau = 5 is still 13% short of its final value at t = 10
    let traj = closed_loop(
        PlantParameters::FirstOrder { k: 1.0, tau: 5.0 },
        PidGains::disabled(),
        10.0,
        0.01,
    );
    let m = extract(&traj, 1.0);
    assert!(m.steady_state_error > 0.1);
    assert_eq!(m.settling_time, None);
    assert!(!m.diverged);
}

#[test]
fn settled_response_keeps_its_settling_time() {
    let traj = closed_loop(
        PlantParameters::FirstOrder { k: 1.0, tau: 5.0 },
        PidGains::disabled(),
        60.0,
        0.01,
    );
    // exp(-t/5) < 0.02 · (1 - exp(-12)) at t ≈ 19.6
    let settle = extract(&traj, 1.0).settling_time.unwrap();
    assert!(settle > 19.0 && settle < 20.0, "settle {settle}");
}

fn gains_strategy() -> impl Strategy<Value = PidGains> {
    (0.0_f64..=10.0, 0.0_f64..=5.0, 0.0_f64..=2.0)
        .prop_map(|(kp, ki, kd)| PidGains { kp, ki, kd })
}

fn plant_strategy() -> impl Strategy<Value = PlantParameters> {
    prop_oneof![
        (0.1_f64..=5.0, 0.1_f64..=5.0).prop_map(|(k, tau)| PlantParameters::FirstOrder { k, tau }),
        (0.1_f64..=5.0, 0.1_f64..=5.0, 0.1_f64..=2.0)
            .prop_map(|(k, wn, zeta)| PlantParameters::SecondOrder { k, wn, zeta }),
        (0.1_f64..=5.0).prop_map(|k| PlantParameters::Integrator { k }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rise_time_is_bounded_by_horizon(params in plant_strategy(), gains in gains_strategy()) {
        let horizon = 10.0;
        let traj = closed_loop(params, gains, horizon, 0.01);
        let m = extract(&traj, 1.0);
        if let Some(rise) = m.rise_time {
            // Every run starts at rest, below the 10% level
            prop_assert!(rise > 0.0);
            prop_assert!(rise <= horizon);

            let first_at = |level: f64| traj.samples().iter().position(|s| s.output >= level);
            let low = first_at(0.1);
            let high = first_at(0.9);
            prop_assert!(high.is_some());
            prop_assert!(low <= high, "10% reached at {low:?}, 90% at {high:?}");
        }
    }

    #[test]
    fn settled_suffix_stays_in_band(params in plant_strategy(), gains in gains_strategy()) {
        let traj = closed_loop(params, gains, 10.0, 0.01);
        let m = extract(&traj, 1.0);
        if let Some(settle) = m.settling_time {
            let y_final = traj.final_output().unwrap();
            let tol = MetricsConfig::default().settling_band * y_final.abs();
            for s in traj.samples().iter().filter(|s| s.t > settle) {
                prop_assert!((s.output - y_final).abs() <= tol);
            }
        }
    }

    #[test]
    fn late_spike_invalidates_earlier_settling(params in plant_strategy(), gains in gains_strategy()) {
        let traj = closed_loop(params, gains, 10.0, 0.01);
        let m = extract(&traj, 1.0);
        if let Some(settle) = m.settling_time {
            let y_final = traj.final_output().unwrap();
            let mut samples = traj.samples().to_vec();
            let n = samples.len();
            // Halfway between the settling time and the end
            let idx = samples
                .iter()
                .position(|s| s.t > settle)
                .map(|i| i + (n - 1 - i) / 2)
                .unwrap();
            prop_assume!(idx < n - 1);
            let spike_t = samples[idx].t;
            samples[idx].output = y_final + 0.5 * y_final.abs().max(1.0);

            let spiked = extract(&Trajectory::from_samples(samples), 1.0);
            if let Some(t) = spiked.settling_time {
                prop_assert!(t > spike_t);
            }
        }
    }
}
