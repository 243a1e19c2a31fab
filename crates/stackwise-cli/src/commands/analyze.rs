//! Diagnostic command implementations (analyze, readiness)

use std::path::Path;

use anyhow::{Context, Result};
use stackwise_core::EngineConfig;

use super::open_service;

/// Print the full analysis bundle as JSON
pub fn cmd_analyze(snapshot: &Path, config: EngineConfig) -> Result<()> {
    let service = open_service(snapshot, config)?;
    let result = service
        .perform_full_analysis()
        .context("Failed to analyze snapshot")?;

    tracing::debug!(
        correlations = result.correlations.len(),
        timing = result.timing.len(),
        warnings = result.warnings.len(),
        "Analysis complete"
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub fn cmd_readiness(snapshot: &Path, config: EngineConfig, json: bool) -> Result<()> {
    let service = open_service(snapshot, config)?;
    let status = service.has_enough_data();

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let readiness = &service.config().readiness;

    println!();
    println!("📊 Data Readiness");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Journal days: {} / {}",
        status.journal_days, readiness.min_journal_days
    );
    println!(
        "   Check-ins:    {} / {}",
        status.check_ins, readiness.min_check_ins
    );
    println!();
    if status.ready {
        println!("   ✅ {}", status.recommendation);
    } else {
        println!("   ⏳ {}", status.recommendation);
    }
    println!();

    Ok(())
}
