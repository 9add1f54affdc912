//! The `simulate` operation: validate, run both loops, extract metrics.

use ps_controls::PidGains;
use ps_core::Real;
use ps_metrics::{MetricsConfig, PerformanceMetrics, extract_with};
use ps_plant::PlantParameters;
use ps_sim::{OpenLoopDrive, SimulationConfig, Trajectory};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::scenario::Scenario;

/// Final value of the unit-step reference.
pub const REFERENCE_FINAL_VALUE: Real = 1.0;

/// Everything needed for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub plant: PlantParameters,
    pub gains: PidGains,
    pub horizon: Real,
    pub step_size: Real,
    #[serde(default)]
    pub open_loop_drive: OpenLoopDrive,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        let config = SimulationConfig::default();
        Self {
            plant: PlantParameters::default(),
            gains: PidGains::default(),
            horizon: config.horizon,
            step_size: config.step_size,
            open_loop_drive: config.open_loop_drive,
        }
    }
}

impl SimulationRequest {
    pub fn new(plant: PlantParameters, gains: PidGains) -> Self {
        Self {
            plant,
            gains,
            ..Self::default()
        }
    }

    /// Simulation settings carried by this request.
    pub fn config(&self) -> SimulationConfig {
        SimulationConfig {
            horizon: self.horizon,
            step_size: self.step_size,
            open_loop_drive: self.open_loop_drive,
        }
    }
}

/// Output of [`simulate`]: both trajectories and the closed-loop metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub open_loop: Trajectory,
    pub closed_loop: Trajectory,
    pub metrics: PerformanceMetrics,
}

/// Run a request with the default metric thresholds.
///
/// Parameters, gains and step settings are validated before any step is
/// taken; a range violation comes back as [`AppError::Configuration`]
/// naming the field and its valid range.
///
/// [`AppError::Configuration`]: crate::AppError::Configuration
pub fn simulate(request: &SimulationRequest) -> AppResult<SimulationResult> {
    simulate_with(request, &MetricsConfig::default())
}

/// Run a request with explicit metric thresholds.
pub fn simulate_with(
    request: &SimulationRequest,
    metrics_config: &MetricsConfig,
) -> AppResult<SimulationResult> {
    let config = request.config();
    let (open_loop, closed_loop) = ps_sim::run(&request.plant, &request.gains, &config)?;
    let metrics = extract_with(&closed_loop, REFERENCE_FINAL_VALUE, metrics_config);

    if metrics.diverged {
        tracing::warn!(
            plant = %request.plant,
            controller = %request.gains,
            "closed-loop response diverged"
        );
    }
    tracing::info!(
        samples = closed_loop.len(),
        settling_time = ?metrics.settling_time,
        overshoot_percent = metrics.overshoot_percent,
        rise_time = ?metrics.rise_time,
        steady_state_error = metrics.steady_state_error,
        "simulation complete"
    );

    Ok(SimulationResult {
        open_loop,
        closed_loop,
        metrics,
    })
}

/// Run a loaded scenario with its own metric thresholds.
pub fn simulate_scenario(scenario: &Scenario) -> AppResult<SimulationResult> {
    tracing::debug!(name = %scenario.name, "running scenario");
    simulate_with(&scenario.request(), &scenario.metrics)
}
