//! Force command implementation

use anyhow::{bail, Context, Result};
use dw_core::version::display_version;

use crate::cli::{ForceArgs, GlobalArgs};
use crate::commands::common::parse_version_arg;
use crate::context::RuntimeContext;

/// Execute `dw force`
pub async fn execute(args: &ForceArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let target = parse_version_arg(&args.version)?;

    let catalog = ctx.catalog()?;
    if let Some(version) = target {
        if !catalog.contains(version) {
            bail!(
                "Version {version} is not in the migration catalog ({})",
                ctx.migrations_dir().display()
            );
        }
    }

    let db = ctx.connect()?;
    let store = ctx.store(db)?;
    let before = store
        .current()
        .await
        .context("Failed to read schema version")?;
    store
        .force(target)
        .await
        .context("Failed to force schema version")?;

    log::warn!(
        "Forced schema version from {} to {} without running scripts",
        before,
        display_version(target)
    );
    println!("Version forced to {}", display_version(target));
    Ok(())
}
