//! New-supplement pre-check command

use std::path::Path;

use anyhow::{Context, Result};
use stackwise_core::analysis::InteractionWarner;
use stackwise_core::knowledge::warnings::WarningSeverity;
use stackwise_core::{EngineConfig, StackItem, TimeSlot};

use super::open_service;

/// A supplement the user is about to add, as given on the command line
pub struct NewSupplement<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
    pub dosage: Option<&'a str>,
    pub time: Option<&'a str>,
}

impl NewSupplement<'_> {
    pub fn to_stack_item(&self) -> Result<StackItem> {
        let mut item = StackItem::new(self.id, self.name.unwrap_or(self.id));
        if let Some(dosage) = self.dosage {
            item = item.with_dosage(dosage);
        }
        if let Some(time) = self.time {
            let slot: TimeSlot = time.parse().map_err(anyhow::Error::msg)?;
            item = item.with_time(slot);
        }
        Ok(item)
    }
}

pub fn cmd_check(
    snapshot: &Path,
    config: EngineConfig,
    candidate: &NewSupplement<'_>,
    json: bool,
) -> Result<()> {
    let candidate = candidate.to_stack_item()?;
    let service = open_service(snapshot, config)?;

    let warner = InteractionWarner::new(service.config());
    let warnings = warner
        .check_new_supplement(&candidate, service.context())
        .context("Failed to check supplement")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&warnings)?);
        return Ok(());
    }

    println!();
    println!("🔍 Checking {}", candidate.supplement_name);
    println!("   ─────────────────────────────────────────────────────────────");

    if warnings.is_empty() {
        println!("   ✅ No known conflicts with your current stack.");
        println!();
        return Ok(());
    }

    for warning in &warnings {
        let icon = match warning.severity {
            WarningSeverity::Critical => "🚨",
            WarningSeverity::Warning => "⚠️ ",
            WarningSeverity::Info => "ℹ️ ",
        };
        println!(
            "   {} [{}] {}: {}",
            icon, warning.severity, warning.warning_type, warning.message
        );
    }
    println!();

    Ok(())
}
