//! Recommendation command implementations (recommend, summary)

use std::path::Path;

use anyhow::{Context, Result};
use stackwise_core::{EngineConfig, Priority, Recommendation, RecommendationType};

use super::{open_service, truncate};

pub fn cmd_recommend(
    snapshot: &Path,
    config: EngineConfig,
    top: Option<usize>,
    kind: Option<&str>,
    json: bool,
) -> Result<()> {
    let service = open_service(snapshot, config)?;

    let kind = kind
        .map(|k| k.parse::<RecommendationType>().map_err(anyhow::Error::msg))
        .transpose()?;

    let mut recommendations = match kind {
        Some(kind) => service.get_by_type(kind),
        None => service.generate_all(),
    }
    .context("Failed to generate recommendations")?;

    if let Some(n) = top {
        recommendations.truncate(n);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    let readiness = service.has_enough_data();

    println!();
    println!("📋 Recommendations ({})", recommendations.len());
    println!("   ─────────────────────────────────────────────────────────────");

    if !readiness.ready {
        println!("   💡 {}", readiness.recommendation);
        println!();
    }

    if recommendations.is_empty() {
        println!("   ✅ Nothing to change right now.");
        println!();
        return Ok(());
    }

    for recommendation in &recommendations {
        print_recommendation(recommendation);
    }
    println!();

    Ok(())
}

pub fn cmd_summary(snapshot: &Path, config: EngineConfig) -> Result<()> {
    let service = open_service(snapshot, config)?;
    let summary = service
        .generate_chat_summary()
        .context("Failed to generate summary")?;
    println!("{}", summary);
    Ok(())
}

fn print_recommendation(recommendation: &Recommendation) {
    println!(
        "   {} [{}] {} ({}, {:.0}% confidence)",
        priority_icon(recommendation.priority),
        recommendation.priority,
        truncate(&recommendation.title, 60),
        recommendation.recommendation_type,
        recommendation.confidence * 100.0
    );
    println!("      {}", recommendation.message);
    if recommendation.data_points > 0 {
        println!("      Based on {} data points", recommendation.data_points);
    }
}

pub fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "🚨",
        Priority::High => "⚠️ ",
        Priority::Medium => "💡",
        Priority::Low => "ℹ️ ",
    }
}
