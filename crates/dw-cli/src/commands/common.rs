//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use dw_core::Version;
use serde::Serialize;
use std::fmt;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; the command already printed its own message.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Parse a version argument, where `none` means nothing applied.
pub(crate) fn parse_version_arg(raw: &str) -> Result<Option<Version>> {
    if raw.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    raw.parse::<Version>()
        .map(Some)
        .with_context(|| format!("Invalid version '{raw}': expected a positive integer or 'none'"))
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
