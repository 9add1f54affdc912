//! Scenario files: a named plant, controller and simulation setup.
//!
//! Scenarios are stored as YAML or JSON. `gains`, `simulation` and
//! `metrics` are optional and fall back to their defaults. Loading always
//! validates, so a loaded scenario is ready to run.

use std::path::Path;

use ps_controls::PidGains;
use ps_metrics::MetricsConfig;
use ps_plant::PlantParameters;
use ps_sim::SimulationConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::service::SimulationRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub plant: PlantParameters,
    #[serde(default)]
    pub gains: PidGains,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Scenario {
    /// Scenario with default gains and simulation settings.
    pub fn new(name: impl Into<String>, plant: PlantParameters) -> Self {
        Self {
            name: name.into(),
            plant,
            gains: PidGains::default(),
            simulation: SimulationConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }

    pub fn with_gains(mut self, gains: PidGains) -> Self {
        self.gains = gains;
        self
    }

    pub fn request(&self) -> SimulationRequest {
        SimulationRequest {
            plant: self.plant,
            gains: self.gains,
            horizon: self.simulation.horizon,
            step_size: self.simulation.step_size,
            open_loop_drive: self.simulation.open_loop_drive,
        }
    }
}

/// Check every parameter of a scenario without running it.
pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    scenario.plant.validate()?;
    scenario.gains.validate()?;
    scenario.simulation.validate()?;
    validate_metrics(&scenario.metrics)
}

fn validate_metrics(config: &MetricsConfig) -> AppResult<()> {
    let open_unit = |field: &'static str, value: f64| {
        if value.is_finite() && value > 0.0 && value < 1.0 {
            Ok(())
        } else {
            Err(AppError::InvalidConfiguration {
                field,
                reason: format!("{value} must lie strictly between 0 and 1"),
            })
        }
    };
    open_unit("settling_band", config.settling_band)?;
    open_unit("rise_low", config.rise_low)?;
    open_unit("rise_high", config.rise_high)?;
    open_unit("min_settled_fraction", config.min_settled_fraction)?;

    if config.rise_low >= config.rise_high {
        return Err(AppError::InvalidConfiguration {
            field: "rise_low",
            reason: format!(
                "rise_low ({}) must be below rise_high ({})",
                config.rise_low, config.rise_high
            ),
        });
    }
    if !(config.divergence_limit.is_finite() && config.divergence_limit > 1.0) {
        return Err(AppError::InvalidConfiguration {
            field: "divergence_limit",
            reason: format!("{} must be finite and above 1", config.divergence_limit),
        });
    }
    Ok(())
}

fn read(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::ScenarioFileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: String) -> AppResult<()> {
    std::fs::write(path, content).map_err(|source| AppError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_yaml(path: &Path) -> AppResult<Scenario> {
    let scenario: Scenario = serde_yaml::from_str(&read(path)?)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_yaml(path: &Path, scenario: &Scenario) -> AppResult<()> {
    validate_scenario(scenario)?;
    write(path, serde_yaml::to_string(scenario)?)
}

pub fn load_json(path: &Path) -> AppResult<Scenario> {
    let scenario: Scenario = serde_json::from_str(&read(path)?)?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

pub fn save_json(path: &Path, scenario: &Scenario) -> AppResult<()> {
    validate_scenario(scenario)?;
    write(path, serde_json::to_string_pretty(scenario)?)
}

/// Load a scenario, picking the format from the file extension.
pub fn load(path: &Path) -> AppResult<Scenario> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => load_json(path),
        Some("yaml" | "yml") => load_yaml(path),
        _ => Err(AppError::InvalidInput(format!(
            "unrecognised scenario extension: {}",
            path.display()
        ))),
    }
}
