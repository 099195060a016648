//! typesync CLI - keeps generated string-enum declarations in sync with a
//! scanned source checkout.
//!
//! This is the main entry point for the `typesync` command-line interface.
//! Command implementations live in separate modules under `commands`.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;
    execute_command(cli).await
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn execute_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan {
            root,
            target,
            dry_run,
            format,
        } => {
            commands::scan(&root, &target, dry_run, format).await?;
        },

        Commands::Bindings { root, target } => {
            commands::bindings(&root, &target).await?;
        },
    }

    Ok(())
}
