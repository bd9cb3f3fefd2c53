//! Outcome reporter: turns a run result into user-facing text, JSON and an
//! exit status.

use crate::error::{MigrateError, MigrateResult};
use crate::outcome::Outcome;
use dw_core::version::display_version;
use dw_core::{Direction, Version};
use serde::Serialize;
use std::fmt;

/// Terminal classification of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Applied,
    NoChange,
    Failed,
}

/// Presentable summary of one stepper run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub status: ReportStatus,
    pub direction: Direction,
    /// Version before the run, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Version>,
    /// Version after the run, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Version>,
    /// Version of the script that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_version: Option<Version>,
    pub steps: usize,
    pub message: String,
}

impl Report {
    /// Classify the result of `Stepper::run`.
    pub fn from_result(direction: Direction, result: &MigrateResult<Outcome>) -> Self {
        match result {
            Ok(Outcome::Applied { from, to, steps }) => Self {
                status: ReportStatus::Applied,
                direction,
                from: *from,
                to: *to,
                failed_version: None,
                steps: *steps,
                message: format!(
                    "Migration {direction} successful: {} -> {} ({steps} {} applied)",
                    display_version(*from),
                    display_version(*to),
                    if *steps == 1 { "step" } else { "steps" }
                ),
            },
            Ok(Outcome::NoChange) => Self {
                status: ReportStatus::NoChange,
                direction,
                from: None,
                to: None,
                failed_version: None,
                steps: 0,
                message: "No changes applied.".to_string(),
            },
            Ok(Outcome::Failed {
                version,
                from,
                reached,
                error,
            }) => Self {
                status: ReportStatus::Failed,
                direction,
                from: *from,
                to: *reached,
                failed_version: Some(*version),
                steps: 0,
                message: format!(
                    "Migration failed at version {version}: {error}; database left at version {} (dirty)",
                    display_version(*reached)
                ),
            },
            Err(error) => Self::from_error(direction, error),
        }
    }

    fn from_error(direction: Direction, error: &MigrateError) -> Self {
        Self {
            status: ReportStatus::Failed,
            direction,
            from: None,
            to: None,
            failed_version: None,
            steps: 0,
            message: format!("Migration failed: {error}"),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status != ReportStatus::Failed
    }

    /// Process exit status: 0 for applied or no change, 1 for any failure
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
