//! Step observers: progress notifications emitted while a run applies scripts.

use crate::error::MigrateError;
use dw_core::{Direction, Version};
use std::time::Duration;

/// Where a step is in its lifecycle.
#[derive(Debug)]
pub enum StepStatus<'a> {
    /// About to run the script
    Started,
    /// Script ran and the version was recorded
    Applied { elapsed: Duration },
    /// Script failed and was rolled back
    Failed { error: &'a MigrateError },
}

/// Notification about one step of a run.
#[derive(Debug)]
pub struct StepEvent<'a> {
    pub version: Version,
    pub name: &'a str,
    pub direction: Direction,
    pub status: StepStatus<'a>,
}

/// Receives step notifications from the stepper.
pub trait StepObserver: Send + Sync {
    fn on_step(&self, event: &StepEvent<'_>);
}

impl<F> StepObserver for F
where
    F: Fn(&StepEvent<'_>) + Send + Sync,
{
    fn on_step(&self, event: &StepEvent<'_>) {
        self(event)
    }
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&self, _event: &StepEvent<'_>) {}
}

/// Writes step progress through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl StepObserver for LogObserver {
    fn on_step(&self, event: &StepEvent<'_>) {
        let label = if event.name.is_empty() {
            event.version.to_string()
        } else {
            format!("{} ({})", event.version, event.name)
        };
        match &event.status {
            StepStatus::Started => {
                log::info!(target: "dw::migrate", "{} {}", event.direction.verb(), label)
            }
            StepStatus::Applied { elapsed } => log::info!(
                target: "dw::migrate",
                "{} {} done in {}ms",
                event.direction,
                label,
                elapsed.as_millis()
            ),
            StepStatus::Failed { error } => {
                log::error!(target: "dw::migrate", "{} {} failed: {}", event.direction, label, error)
            }
        }
    }
}
