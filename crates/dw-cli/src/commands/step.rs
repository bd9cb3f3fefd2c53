//! Up and down command implementation

use anyhow::Result;
use dw_core::Direction;
use dw_migrate::{LogObserver, Report, StepEvent, StepObserver, StepStatus, Stepper};
use std::sync::Arc;

use crate::cli::{GlobalArgs, OutputFormat, StepArgs};
use crate::commands::common::{print_json, ExitCode};
use crate::context::RuntimeContext;

/// Execute `dw up` or `dw down`
pub async fn execute(direction: Direction, args: &StepArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let catalog = ctx.catalog()?;
    ctx.verbose(&format!(
        "Loaded {} migration(s) from {}",
        catalog.len(),
        ctx.migrations_dir().display()
    ));

    let db = ctx.connect()?;
    let store = ctx.store(db.clone())?;

    // JSON output keeps stdout clean; progress goes to the log instead.
    let observer: Arc<dyn StepObserver> = match args.output {
        OutputFormat::Text => Arc::new(print_step),
        OutputFormat::Json => Arc::new(LogObserver),
    };
    let stepper = Stepper::new(&catalog, db, store).with_observer(observer);

    let result = stepper.run(direction, args.steps).await;
    let report = Report::from_result(direction, &result);

    match args.output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text if report.is_success() => println!("{report}"),
        OutputFormat::Text => eprintln!("{report}"),
    }

    if !report.is_success() {
        return Err(ExitCode(report.exit_code()).into());
    }
    Ok(())
}

fn print_step(event: &StepEvent<'_>) {
    match &event.status {
        StepStatus::Started => {}
        StepStatus::Applied { elapsed } => println!(
            "  \u{2713} {} {} ({}) [{}ms]",
            event.version,
            event.name,
            event.direction,
            elapsed.as_millis()
        ),
        StepStatus::Failed { .. } => {
            println!("  \u{2717} {} {} ({})", event.version, event.name, event.direction)
        }
    }
}

#[cfg(test)]
#[path = "step_test.rs"]
mod tests;
