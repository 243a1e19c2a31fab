//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Stackwise - Find out what your supplement stack is actually doing
#[derive(Parser)]
#[command(name = "stackwise")]
#[command(about = "Supplement stack recommendations from your journal and check-ins", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file
    ///
    /// Defaults to ~/.local/share/stackwise/config/engine.toml if present,
    /// otherwise the built-in thresholds.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate prioritized recommendations for a snapshot
    Recommend {
        /// Snapshot JSON file (journalHistory, checkInHistory, currentStack)
        snapshot: PathBuf,

        /// Only show the N most important recommendations
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Only show one type: timing, dosage, synergy, lifestyle, warning
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print every derived artifact (correlations, timing, dosage, ...) as JSON
    Analyze {
        /// Snapshot JSON file
        snapshot: PathBuf,
    },

    /// Check whether a snapshot has enough data for confident advice
    Readiness {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// One-sentence summary for chat surfaces
    Summary {
        /// Snapshot JSON file
        snapshot: PathBuf,
    },

    /// Check a supplement for warnings before adding it to the stack
    Check {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Supplement id (e.g. "iron" or "5-htp")
        #[arg(long)]
        id: String,

        /// Display name (defaults to the id)
        #[arg(long)]
        name: Option<String>,

        /// Planned dosage, e.g. "25mg"
        #[arg(long)]
        dosage: Option<String>,

        /// Planned time: morning, noon, evening, bedtime
        #[arg(long)]
        time: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective engine configuration as TOML
    Config,
}
