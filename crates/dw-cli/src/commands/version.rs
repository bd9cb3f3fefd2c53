//! Version command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, OutputFormat, VersionArgs};
use crate::commands::common::print_json;
use crate::context::RuntimeContext;

/// Execute `dw version`
pub async fn execute(args: &VersionArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let db = ctx.connect()?;
    let store = ctx.store(db)?;

    let state = store
        .current()
        .await
        .context("Failed to read schema version")?;

    match args.output {
        OutputFormat::Text => println!("{state}"),
        OutputFormat::Json => print_json(&state)?,
    }

    if state.dirty {
        ctx.verbose("A previous migration did not complete; repair the schema, then run `dw force`");
    }
    Ok(())
}
