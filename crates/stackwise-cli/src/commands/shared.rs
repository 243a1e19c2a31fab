//! Shared utilities for command implementations
//!
//! This module contains:
//! - `load_config` - Resolve the engine configuration
//! - `load_snapshot` - Read a snapshot JSON file
//! - `open_service` - Build a recommendation service for a snapshot

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use stackwise_core::{AnalysisContext, AnalysisSnapshot, EngineConfig, RecommendationService};

/// Explicit config file if given, otherwise the data-dir override or built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            EngineConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => EngineConfig::load().context("Failed to load engine config"),
    }
}

pub fn load_snapshot(path: &Path) -> Result<AnalysisSnapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot = AnalysisSnapshot::from_json(&content)
        .with_context(|| format!("Invalid snapshot JSON in {}", path.display()))?;

    tracing::debug!(
        journal = snapshot.journal_history.len(),
        check_ins = snapshot.check_in_history.len(),
        stack = snapshot.current_stack.len(),
        "Loaded snapshot"
    );
    Ok(snapshot)
}

pub fn open_service(snapshot_path: &Path, config: EngineConfig) -> Result<RecommendationService> {
    let snapshot = load_snapshot(snapshot_path)?;
    Ok(RecommendationService::with_config(
        AnalysisContext::from(snapshot),
        config,
    ))
}
