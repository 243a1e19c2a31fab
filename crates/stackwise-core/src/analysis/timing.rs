//! Timing Optimizer
//!
//! Suggests a better time of day per stack item. The user's own check-in data
//! wins when it is confident enough and shows a real improvement over the
//! current slot; otherwise the established default for the supplement class
//! is used.

use crate::config::{EngineConfig, TimingConfig};
use crate::error::Result;
use crate::knowledge::{self, timing as timing_table};
use crate::models::{Priority, Recommendation, RecommendationType, StackItem, TimeSlot};

use super::context::AnalysisContext;
use super::engine::Analyzer;
use super::pattern::{index_timing, PatternAnalyzer};
use super::stats::relative_change;
use super::types::TimingAnalysis;

/// Where a timing suggestion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingSource {
    /// The user's own check-ins and journal
    UserData,
    /// The static knowledge table
    Knowledge,
}

/// A suggested slot for one stack item
#[derive(Debug, Clone, PartialEq)]
pub struct TimingSuggestion {
    pub slot: TimeSlot,
    pub source: TimingSource,
    pub reason: String,
    /// Relative improvement over the current slot (0 for knowledge-based suggestions)
    pub improvement: f64,
    pub confidence: f64,
    pub data_points: usize,
}

pub struct TimingOptimizer {
    config: TimingConfig,
    patterns: PatternAnalyzer,
}

impl Default for TimingOptimizer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl TimingOptimizer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.timing.clone(),
            patterns: PatternAnalyzer::new(config),
        }
    }

    /// Best slot for an item, from data if trustworthy, else from the knowledge table
    pub fn suggest(
        &self,
        item: &StackItem,
        analysis: Option<&TimingAnalysis>,
    ) -> Option<TimingSuggestion> {
        if let Some(suggestion) = analysis.and_then(|a| self.suggest_from_data(item, a)) {
            return Some(suggestion);
        }

        let class = knowledge::resolve_class(item)?;
        let default = timing_table::default_for(class)?;
        Some(TimingSuggestion {
            slot: default.slot,
            source: TimingSource::Knowledge,
            reason: default.reason.to_string(),
            improvement: 0.0,
            confidence: default.confidence,
            data_points: 0,
        })
    }

    fn suggest_from_data(
        &self,
        item: &StackItem,
        analysis: &TimingAnalysis,
    ) -> Option<TimingSuggestion> {
        if analysis.confidence <= self.config.min_confidence {
            return None;
        }

        let best = analysis.optimal()?;
        // Compare against the current slot, or the overall average if it was never observed
        let baseline = item
            .time
            .and_then(|slot| analysis.score_for(slot))
            .map(|s| s.average_score)
            .or_else(|| analysis.overall_average())?;
        let improvement = relative_change(best.average_score, baseline)?;

        if improvement <= self.config.min_improvement {
            tracing::debug!(
                supplement = item.supplement_id.as_str(),
                improvement,
                "Timing data below improvement threshold, using defaults"
            );
            return None;
        }

        Some(TimingSuggestion {
            slot: best.slot,
            source: TimingSource::UserData,
            reason: format!(
                "On days you took {} {} your overall score averaged {:.1}, {:.0}% higher than {}.",
                item.supplement_name,
                best.slot.label(),
                best.average_score,
                improvement * 100.0,
                match item.time {
                    Some(slot) => format!("when you take it {}", slot.label()),
                    None => "your average".to_string(),
                }
            ),
            improvement,
            confidence: analysis.confidence,
            data_points: analysis.total_samples,
        })
    }

    /// Turn a suggestion into a recommendation if it differs from the current slot
    fn to_recommendation(
        &self,
        item: &StackItem,
        suggestion: TimingSuggestion,
    ) -> Option<Recommendation> {
        if item.time == Some(suggestion.slot) {
            return None;
        }

        let priority = if suggestion.improvement > self.config.high_priority_improvement {
            Priority::High
        } else {
            Priority::Medium
        };

        let message = match item.time {
            Some(current) => format!(
                "{} Try taking it {} instead of {}.",
                suggestion.reason,
                suggestion.slot.label(),
                current.label()
            ),
            None => format!(
                "{} Try taking it {}.",
                suggestion.reason,
                suggestion.slot.label()
            ),
        };

        Some(
            Recommendation::new(
                RecommendationType::Timing,
                format!("timing:{}", item.supplement_id),
                priority,
                format!(
                    "Take {} {}",
                    item.supplement_name,
                    suggestion.slot.label()
                ),
                message,
            )
            .with_supplement(item.to_ref())
            .with_confidence(suggestion.confidence)
            .with_data_points(suggestion.data_points),
        )
    }
}

impl Analyzer for TimingOptimizer {
    fn id(&self) -> RecommendationType {
        RecommendationType::Timing
    }

    fn name(&self) -> &'static str {
        "Timing Optimizer"
    }

    fn recommend(&self, ctx: &AnalysisContext) -> Result<Vec<Recommendation>> {
        let analyses = self.patterns.timing_analyses(ctx);
        let by_id = index_timing(&analyses);

        let recommendations = ctx
            .stack
            .iter()
            .filter_map(|item| {
                let analysis = by_id.get(item.supplement_id.as_str()).copied();
                let suggestion = self.suggest(item, analysis)?;
                self.to_recommendation(item, suggestion)
            })
            .collect();

        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{check_in, flat_journal, item, stack_context};

    /// Bedtime days score `bedtime`, morning days score `morning`
    fn magnesium_history(
        bedtime_days: i64,
        morning_days: i64,
        bedtime: f64,
        morning: f64,
        current: TimeSlot,
    ) -> AnalysisContext {
        let mut entries = Vec::new();
        let mut check_ins = Vec::new();
        for n in 0..bedtime_days {
            entries.push(flat_journal(n, bedtime));
            check_ins.push(check_in("magnesium", n, TimeSlot::Bedtime));
        }
        for n in bedtime_days..bedtime_days + morning_days {
            entries.push(flat_journal(n, morning));
            check_ins.push(check_in("magnesium", n, TimeSlot::Morning));
        }
        AnalysisContext::new(
            entries,
            check_ins,
            vec![StackItem::new("magnesium", "Magnesium").with_time(current)],
        )
    }

    #[test]
    fn test_data_driven_suggestion_with_high_priority() {
        // 12 samples -> confidence 0.4; 8.0 vs 6.0 is +33%
        let ctx = magnesium_history(6, 6, 8.0, 6.0, TimeSlot::Morning);
        let recs = TimingOptimizer::default().recommend(&ctx).unwrap();

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].data_points, 12);
        assert!(recs[0].title.contains("before bed"));
    }

    #[test]
    fn test_data_driven_suggestion_with_medium_priority() {
        // 12 samples -> confidence 0.4; 6.6 vs 6.0 is +10%
        let ctx = magnesium_history(6, 6, 6.6, 6.0, TimeSlot::Morning);
        let optimizer = TimingOptimizer::default();
        let analysis = optimizer.patterns.timing_for(&ctx, "magnesium").unwrap();
        let suggestion = optimizer
            .suggest(ctx.stack.get("magnesium").unwrap(), Some(&analysis))
            .unwrap();
        assert_eq!(suggestion.source, TimingSource::UserData);
        assert!((suggestion.improvement - 0.1).abs() < 1e-9);

        let recs = optimizer.recommend(&ctx).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert_eq!(recs[0].data_points, 12);
    }

    #[test]
    fn test_low_confidence_falls_back_to_knowledge() {
        // 6 samples -> confidence 0.2, so the table decides (caffeine -> morning)
        let mut entries = Vec::new();
        let mut check_ins = Vec::new();
        for n in 0..3 {
            entries.push(flat_journal(n, 9.0));
            check_ins.push(check_in("caffeine", n, TimeSlot::Evening));
        }
        for n in 3..6 {
            entries.push(flat_journal(n, 5.0));
            check_ins.push(check_in("caffeine", n, TimeSlot::Noon));
        }
        let ctx = AnalysisContext::new(
            entries,
            check_ins,
            vec![item("caffeine").with_time(TimeSlot::Noon)],
        );
        let optimizer = TimingOptimizer::default();
        let analysis = optimizer.patterns.timing_for(&ctx, "caffeine").unwrap();
        let suggestion = optimizer
            .suggest(ctx.stack.get("caffeine").unwrap(), Some(&analysis))
            .unwrap();

        assert_eq!(suggestion.source, TimingSource::Knowledge);
        assert_eq!(suggestion.slot, TimeSlot::Morning);

        let recs = optimizer.recommend(&ctx).unwrap();
        assert_eq!(recs[0].priority, Priority::Medium);
    }

    #[test]
    fn test_small_improvement_falls_back_to_knowledge() {
        // +4% is below the 5% bar
        let ctx = magnesium_history(8, 8, 6.24, 6.0, TimeSlot::Morning);
        let optimizer = TimingOptimizer::default();
        let analysis = optimizer.patterns.timing_for(&ctx, "magnesium").unwrap();
        let suggestion = optimizer
            .suggest(ctx.stack.get("magnesium").unwrap(), Some(&analysis))
            .unwrap();
        assert_eq!(suggestion.source, TimingSource::Knowledge);
        assert_eq!(suggestion.slot, TimeSlot::Bedtime);
    }

    #[test]
    fn test_no_recommendation_when_already_optimal() {
        let ctx = stack_context(vec![item("melatonin").with_time(TimeSlot::Bedtime)]);
        assert!(TimingOptimizer::default().recommend(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_unscheduled_item_gets_default_slot() {
        let ctx = stack_context(vec![item("vitamin-d")]);
        let recs = TimingOptimizer::default().recommend(&ctx).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, "timing:vitamin-d");
        assert_eq!(recs[0].priority, Priority::Medium);
        assert_eq!(recs[0].confidence, 0.7);
    }

    #[test]
    fn test_unknown_supplement_is_skipped() {
        let ctx = stack_context(vec![item("mystery-blend").with_time(TimeSlot::Noon)]);
        assert!(TimingOptimizer::default().recommend(&ctx).unwrap().is_empty());
    }
}
