//! Stackwise CLI - Supplement stack recommendations
//!
//! Usage:
//!   stackwise recommend snapshot.json        Prioritized recommendations
//!   stackwise analyze snapshot.json          Full analysis bundle (JSON)
//!   stackwise check snapshot.json --id iron  Pre-check a new supplement
//!   stackwise config                         Show effective thresholds

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Recommend {
            snapshot,
            top,
            kind,
            json,
        } => commands::cmd_recommend(&snapshot, config, top, kind.as_deref(), json),
        Commands::Analyze { snapshot } => commands::cmd_analyze(&snapshot, config),
        Commands::Readiness { snapshot, json } => commands::cmd_readiness(&snapshot, config, json),
        Commands::Summary { snapshot } => commands::cmd_summary(&snapshot, config),
        Commands::Check {
            snapshot,
            id,
            name,
            dosage,
            time,
            json,
        } => commands::cmd_check(
            &snapshot,
            config,
            &commands::NewSupplement {
                id: &id,
                name: name.as_deref(),
                dosage: dosage.as_deref(),
                time: time.as_deref(),
            },
            json,
        ),
        Commands::Config => commands::cmd_config(&config),
    }
}
