//! Trajectory export for plotting elsewhere.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::service::SimulationResult;

pub const CSV_HEADER: &str = "t,reference,open_loop_output,closed_loop_output,error,control";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{other}' (expected csv or json)")),
        }
    }
}

/// One row per sample: time, reference, both outputs, and the closed-loop
/// error and control signal.
pub fn to_csv(result: &SimulationResult) -> AppResult<String> {
    let open = result.open_loop.samples();
    let closed = result.closed_loop.samples();
    if open.len() != closed.len() {
        return Err(AppError::InvalidInput(format!(
            "open-loop and closed-loop runs differ in length ({} vs {})",
            open.len(),
            closed.len()
        )));
    }

    let mut csv = String::with_capacity(64 * (closed.len() + 1));
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for (o, c) in open.iter().zip(closed) {
        // Writing into a String cannot fail
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{}",
            c.t, c.reference, o.output, c.output, c.error, c.control
        );
    }
    Ok(csv)
}

/// The whole result, trajectories and metrics, as pretty JSON.
pub fn to_json(result: &SimulationResult) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn export(result: &SimulationResult, format: ExportFormat) -> AppResult<String> {
    match format {
        ExportFormat::Csv => to_csv(result),
        ExportFormat::Json => to_json(result),
    }
}
