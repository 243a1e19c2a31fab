//! Recommendation engine
//!
//! Turns a user's journal, check-in history and current stack into a
//! prioritized list of recommendations. Every analyzer reads the same
//! immutable [`AnalysisContext`] and nothing is persisted.
//!
//! ## Analyzers
//!
//! - **Interaction Warner** - safety rules and stack-wide heuristics (safety-critical)
//! - **Synergy Checker** - synergistic and antagonistic pairs, missing partners
//! - **Timing Optimizer** - best time of day from the user's data or known defaults
//! - **Dosage Advisor** - current dosage vs the recommended range
//! - **Lifestyle Coach** - sleep, exercise and trend patterns from the journal
//!
//! The [`PatternAnalyzer`] supplies the statistics the timing and lifestyle
//! analyzers build on.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stackwise_core::analysis::{AnalysisContext, RecommendationService};
//!
//! let ctx = AnalysisContext::from(snapshot);
//! let service = RecommendationService::new(ctx);
//! if service.has_enough_data().ready {
//!     let top = service.get_top(5)?;
//! }
//! ```

pub mod context;
pub mod dosage;
pub mod engine;
pub mod lifestyle;
pub mod pattern;
pub mod stats;
pub mod synergy;
pub mod timing;
pub mod types;
pub mod warnings;

pub use context::{AnalysisContext, AnalysisSnapshot, Stack};
pub use dosage::{parse_dosage, DosageAdvisor};
pub use engine::{Analyzer, RecommendationService};
pub use lifestyle::LifestyleCoach;
pub use pattern::PatternAnalyzer;
pub use synergy::SynergyChecker;
pub use timing::{TimingOptimizer, TimingSource, TimingSuggestion};
pub use types::{
    AnalysisPeriod, AnalysisResult, Correlation, CorrelationDirection, DosageAnalysis,
    DosageStatus, LifestylePattern, LifestylePatternType, MissingPartner, ParsedDosage,
    ReadinessStatus, SlotScore, StackSynergy, SupplementWarning, TimingAnalysis,
};
pub use warnings::InteractionWarner;
