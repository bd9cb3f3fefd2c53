//! Driftwood CLI - step a database schema through versioned migrations

use anyhow::Result;
use clap::Parser;
use dw_core::Direction;

mod cli;
mod commands;
mod context;

use cli::{Cli, Commands};
use commands::common::ExitCode;
use commands::{create, force, step, version};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match run(&cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(ExitCode(code)) => std::process::ExitCode::from(u8::try_from(*code).unwrap_or(1)),
            None => {
                eprintln!("Error: {err:#}");
                std::process::ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Up(args) => step::execute(Direction::Up, args, &cli.global).await,
        Commands::Down(args) => step::execute(Direction::Down, args, &cli.global).await,
        Commands::Version(args) => version::execute(args, &cli.global).await,
        Commands::Force(args) => force::execute(args, &cli.global).await,
        Commands::Create(args) => create::execute(args, &cli.global).await,
        Commands::Serve(args) => serve(args, &cli.global).await,
    }
}

#[cfg(feature = "serve")]
async fn serve(args: &cli::ServeArgs, global: &cli::GlobalArgs) -> Result<()> {
    commands::serve::execute(args, global).await
}

#[cfg(not(feature = "serve"))]
async fn serve(args: &cli::ServeArgs, _global: &cli::GlobalArgs) -> Result<()> {
    let _ = args;
    anyhow::bail!(
        "The `serve` command requires the `serve` feature.\n\
         Rebuild with: cargo build -p dw-cli --features serve"
    );
}

/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
