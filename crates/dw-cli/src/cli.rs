//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Driftwood - step a database schema through versioned migrations
#[derive(Parser, Debug)]
#[command(name = "dw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override database path (`:memory:` for an in-memory database)
    #[arg(short, long, global = true, env = "DRIFTWOOD_DATABASE")]
    pub database: Option<String>,

    /// Override migrations directory
    #[arg(short, long, global = true)]
    pub migrations: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply the next N pending migrations
    Up(StepArgs),

    /// Revert the last N applied migrations
    Down(StepArgs),

    /// Show the currently applied version
    Version(VersionArgs),

    /// Set the recorded version and clear the dirty flag without running scripts
    Force(ForceArgs),

    /// Create an empty up/down migration pair
    Create(CreateArgs),

    /// Serve HTML listings of the database's tables and columns
    Serve(ServeArgs),
}

/// Arguments for the up and down commands
#[derive(Args, Debug)]
pub struct StepArgs {
    /// Number of migrations to apply (at least 1)
    #[arg(
        default_value_t = 1,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub steps: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the force command
#[derive(Args, Debug)]
pub struct ForceArgs {
    /// Version to record, or `none` for nothing applied
    pub version: String,
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Migration title, e.g. "create users"
    pub name: String,

    /// Use a UTC timestamp (YYYYMMDDHHMMSS) instead of the next sequence number
    #[arg(long)]
    pub timestamp: bool,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Interface to bind (default from config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (default from config)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Output formats for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON document
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
