//! Error types for the ps-app service layer.

use std::path::PathBuf;

use ps_controls::ControlError;
use ps_core::CoreError;
use ps_plant::PlantError;
use ps_sim::SimError;

/// Application error type shared by every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A parameter lies outside its valid range. Raised before any step.
    #[error("Configuration error: {field} = {value} is outside [{min}, {max}]")]
    Configuration {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter is invalid for a reason other than its range.
    #[error("Configuration error: {field}: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for ps-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Field named by a configuration error, if this is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AppError::Configuration { field, .. } | AppError::InvalidConfiguration { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::OutOfRange(e) => AppError::Configuration {
                field: e.what,
                value: e.value,
                min: e.min,
                max: e.max,
            },
            CoreError::NonFinite { what, value } => AppError::InvalidConfiguration {
                field: what,
                reason: format!("non-finite value {value}"),
            },
            CoreError::NotPositive { what, value } => AppError::InvalidConfiguration {
                field: what,
                reason: format!("{value} must be positive"),
            },
        }
    }
}

impl From<PlantError> for AppError {
    fn from(err: PlantError) -> Self {
        match err {
            PlantError::OutOfRange {
                field,
                value,
                min,
                max,
            } => AppError::Configuration {
                field,
                value,
                min,
                max,
            },
            other @ PlantError::DimensionMismatch { .. } => {
                AppError::Simulation(other.to_string())
            }
        }
    }
}

impl From<ControlError> for AppError {
    fn from(err: ControlError) -> Self {
        let ControlError::OutOfRange {
            field,
            value,
            min,
            max,
        } = err;
        AppError::Configuration {
            field,
            value,
            min,
            max,
        }
    }
}

impl From<SimError> for AppError {
    fn from(err: SimError) -> Self {
        match err {
            SimError::Plant(e) => e.into(),
            SimError::Control(e) => e.into(),
            SimError::Core(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_range_error_becomes_configuration() {
        let err: AppError = SimError::Plant(PlantError::OutOfRange {
            field: "tau",
            value: 0.0,
            min: 0.1,
            max: 5.0,
        })
        .into();
        assert_eq!(err.field(), Some("tau"));
        let msg = err.to_string();
        assert!(msg.contains("tau"), "{msg}");
        assert!(msg.contains("[0.1, 5]"), "{msg}");
    }

    #[test]
    fn gain_range_error_becomes_configuration() {
        let err: AppError = SimError::Control(ControlError::OutOfRange {
            field: "kd",
            value: 3.0,
            min: 0.0,
            max: 2.0,
        })
        .into();
        assert!(matches!(err, AppError::Configuration { field: "kd", .. }));
    }

    #[test]
    fn non_positive_step_names_its_field() {
        let err: AppError = SimError::Core(CoreError::NotPositive {
            what: "step_size",
            value: -0.01,
        })
        .into();
        assert_eq!(err.field(), Some("step_size"));
        assert!(err.to_string().contains("-0.01 must be positive"));
    }

    #[test]
    fn step_limit_becomes_configuration() {
        let err: AppError = CoreError::from(ps_core::RangeError {
            what: "step_size",
            value: 1e-9,
            min: 1e-5,
            max: f64::INFINITY,
        })
        .into();
        assert!(matches!(err, AppError::Configuration { field: "step_size", .. }));
    }

    #[test]
    fn file_errors_are_not_configuration() {
        let err = AppError::ScenarioFileRead {
            path: PathBuf::from("missing.yaml"),
            source: std::io::Error::other("boom"),
        };
        assert_eq!(err.field(), None);
        assert!(err.to_string().contains("missing.yaml"));
    }
}
