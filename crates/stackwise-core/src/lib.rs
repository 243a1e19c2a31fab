//! Stackwise Core Library
//!
//! Recommendation engine for supplement stacks:
//! - Domain models for journal entries, check-ins and stack items
//! - Static knowledge tables (dosage ranges, timing defaults, synergies, warnings)
//! - Pattern analysis over journal and check-in history
//! - Analyzers that turn patterns and rules into prioritized recommendations
//! - TOML engine configuration with embedded defaults

pub mod analysis;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod models;

/// Builders for journal entries, check-ins and contexts
#[cfg(test)]
pub mod test_utils;

pub use analysis::{
    AnalysisContext, AnalysisResult, AnalysisSnapshot, Analyzer, InteractionWarner,
    ReadinessStatus, RecommendationService, SupplementWarning,
};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use models::{
    CheckInData, JournalEntry, Metric, Priority, Recommendation, RecommendationType, StackItem,
    SupplementRef, TimeSlot, UserProfile,
};
