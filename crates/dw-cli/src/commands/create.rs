//! Create command implementation

use anyhow::{bail, Context, Result};
use chrono::Utc;
use dw_core::Version;
use dw_migrate::{write_script_pair, Catalog};

use crate::cli::{CreateArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute `dw create`
pub async fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let dir = ctx.migrations_dir();

    let catalog = if dir.exists() {
        ctx.catalog()?
    } else {
        Catalog::default()
    };

    let version = if args.timestamp {
        timestamp_version()?
    } else {
        catalog.next_version()
    };
    if catalog.contains(version) {
        bail!("Migration {version} already exists");
    }

    let (up, down) = write_script_pair(&dir, version, &args.name)
        .context("Failed to create migration files")?;

    println!("Created migration {version}:");
    println!("  {}", up.display());
    println!("  {}", down.display());
    Ok(())
}

fn timestamp_version() -> Result<Version> {
    let stamp = Utc::now().format("%Y%m%d%H%M%S").to_string();
    stamp
        .parse()
        .with_context(|| format!("Invalid timestamp version '{stamp}'"))
}
