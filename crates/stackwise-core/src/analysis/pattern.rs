//! Pattern Analyzer
//!
//! Computes group-comparison statistics from raw history:
//!
//! - **Supplement vs metric** - journal days with a check-in vs days without,
//!   compared by mean. The mean difference divided by the normalization
//!   divisor and clamped to [-1, 1] stands in for a correlation coefficient.
//! - **Timing vs score** - average combined wellness score per time slot on
//!   days a supplement was taken in that slot.
//! - **Lifestyle vs metric** - good vs bad sleep, exercise vs rest days,
//!   first vs last week trends, and the best sleep duration.
//!
//! Pairs below the sample minimums produce no record at all.

use std::collections::{BTreeMap, HashMap};

use chrono::Duration;

use crate::config::{CorrelationConfig, EngineConfig, LifestyleConfig, TimingConfig};
use crate::models::{JournalEntry, Metric, StackItem, TimeSlot};

use super::context::AnalysisContext;
use super::stats::{mean, sample_confidence};
use super::types::{
    Correlation, CorrelationDirection, LifestylePattern, LifestylePatternType, SlotScore,
    TimingAnalysis,
};

/// Statistics over one user's journal and check-in history
#[derive(Debug, Clone)]
pub struct PatternAnalyzer {
    correlation: CorrelationConfig,
    timing: TimingConfig,
    lifestyle: LifestyleConfig,
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl PatternAnalyzer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            correlation: config.correlation.clone(),
            timing: config.timing.clone(),
            lifestyle: config.lifestyle.clone(),
        }
    }

    // ========== Supplement vs metric ==========

    /// Correlations for every (stack item, metric) pair with enough samples
    pub fn supplement_correlations(&self, ctx: &AnalysisContext) -> Vec<Correlation> {
        let correlations: Vec<Correlation> = ctx
            .stack
            .iter()
            .flat_map(|item| {
                Metric::all()
                    .iter()
                    .filter_map(move |&metric| self.correlation_for(ctx, item, metric))
            })
            .collect();

        tracing::debug!(
            count = correlations.len(),
            "Supplement correlation analysis complete"
        );
        correlations
    }

    /// Compare a metric on days the supplement was taken vs days it was not
    pub fn correlation_for(
        &self,
        ctx: &AnalysisContext,
        item: &StackItem,
        metric: Metric,
    ) -> Option<Correlation> {
        let taken_on = ctx.check_in_dates(&item.supplement_id);

        let mut with = Vec::new();
        let mut without = Vec::new();
        for entry in &ctx.journal {
            let Some(value) = entry.metric(metric) else {
                continue;
            };
            if taken_on.contains(&entry.date) {
                with.push(value);
            } else {
                without.push(value);
            }
        }

        if with.len() < self.correlation.min_days_with
            || without.len() < self.correlation.min_days_without
        {
            return None;
        }

        let avg_with = mean(&with)?;
        let avg_without = mean(&without)?;
        let correlation = normalize_difference(
            avg_with - avg_without,
            self.correlation.normalization_divisor,
        );

        let threshold = self.correlation.direction_threshold;
        let direction = if correlation > threshold {
            CorrelationDirection::Positive
        } else if correlation < -threshold {
            CorrelationDirection::Negative
        } else {
            CorrelationDirection::Neutral
        };

        Some(Correlation {
            supplement_id: item.supplement_id.clone(),
            supplement_name: item.supplement_name.clone(),
            metric,
            correlation,
            direction,
            avg_with,
            avg_without,
            days_with: with.len(),
            days_without: without.len(),
            confidence: sample_confidence(
                with.len() + without.len(),
                self.correlation.full_confidence_samples,
            ),
        })
    }

    // ========== Timing vs score ==========

    /// Timing analysis for every supplement that appears in the check-ins
    pub fn timing_analyses(&self, ctx: &AnalysisContext) -> Vec<TimingAnalysis> {
        let mut seen: Vec<&str> = Vec::new();
        for check_in in &ctx.check_ins {
            if !seen.contains(&check_in.supplement_id.as_str()) {
                seen.push(&check_in.supplement_id);
            }
        }

        seen.into_iter()
            .filter_map(|id| self.timing_for(ctx, id))
            .collect()
    }

    /// Average combined score per observed slot for one supplement
    ///
    /// Each check-in counts as its own sample. Returns `None` if no check-in
    /// falls on a journaled day.
    pub fn timing_for(&self, ctx: &AnalysisContext, supplement_id: &str) -> Option<TimingAnalysis> {
        let mut name = None;
        let mut by_slot: BTreeMap<TimeSlot, Vec<f64>> = BTreeMap::new();

        for check_in in ctx
            .check_ins
            .iter()
            .filter(|c| c.supplement_id == supplement_id)
        {
            name.get_or_insert_with(|| check_in.supplement_name.clone());
            if let Some(entry) = ctx.journal_on(check_in.date()) {
                by_slot
                    .entry(check_in.time)
                    .or_default()
                    .push(entry.combined_score());
            }
        }

        let slots: Vec<SlotScore> = by_slot
            .into_iter()
            .filter_map(|(slot, scores)| {
                mean(&scores).map(|average_score| SlotScore {
                    slot,
                    average_score,
                    samples: scores.len(),
                })
            })
            .collect();

        let total_samples: usize = slots.iter().map(|s| s.samples).sum();
        if total_samples == 0 {
            return None;
        }

        // Ties keep the earlier slot
        let optimal_time = slots
            .iter()
            .fold(None::<&SlotScore>, |best, s| match best {
                Some(b) if b.average_score >= s.average_score => Some(b),
                _ => Some(s),
            })
            .map(|s| s.slot);

        let supplement_name = ctx
            .stack
            .get(supplement_id)
            .map(|item| item.supplement_name.clone())
            .or(name)
            .unwrap_or_else(|| supplement_id.to_string());

        Some(TimingAnalysis {
            supplement_id: supplement_id.to_string(),
            supplement_name,
            slots,
            optimal_time,
            confidence: sample_confidence(total_samples, self.timing.full_confidence_samples),
            total_samples,
        })
    }

    // ========== Lifestyle vs metric ==========

    /// All journal-only patterns
    pub fn lifestyle_patterns(&self, ctx: &AnalysisContext) -> Vec<LifestylePattern> {
        let mut patterns = Vec::new();
        patterns.extend(self.sleep_patterns(&ctx.journal));
        patterns.extend(self.exercise_patterns(&ctx.journal));
        patterns.extend(self.trend_patterns(&ctx.journal));
        patterns.extend(self.optimal_sleep(&ctx.journal));

        tracing::debug!(count = patterns.len(), "Lifestyle pattern analysis complete");
        patterns
    }

    /// Energy and focus after good vs bad nights
    fn sleep_patterns(&self, journal: &[JournalEntry]) -> Vec<LifestylePattern> {
        let good: Vec<&JournalEntry> = journal
            .iter()
            .filter(|e| e.sleep >= self.lifestyle.good_sleep_hours)
            .collect();
        let bad: Vec<&JournalEntry> = journal
            .iter()
            .filter(|e| e.sleep <= self.lifestyle.bad_sleep_hours)
            .collect();

        if good.len() < self.lifestyle.min_bucket_size || bad.len() < self.lifestyle.min_bucket_size
        {
            return Vec::new();
        }

        [
            (LifestylePatternType::SleepEnergy, Metric::Energy),
            (LifestylePatternType::SleepFocus, Metric::Focus),
        ]
        .into_iter()
        .filter_map(|(pattern_type, metric)| {
            let (avg_good, avg_bad) = compare_groups(&good, &bad, metric)?;
            let impact = avg_good - avg_bad;
            if impact.abs() < self.lifestyle.min_difference {
                return None;
            }
            let data_points = good.len() + bad.len();
            Some(LifestylePattern {
                pattern_type,
                metric: Some(metric),
                description: format!(
                    "After {}+ hours of sleep your {} averages {:.1}, compared to {:.1} after nights of {} hours or less.",
                    self.lifestyle.good_sleep_hours,
                    metric,
                    avg_good,
                    avg_bad,
                    self.lifestyle.bad_sleep_hours
                ),
                impact,
                confidence: sample_confidence(data_points, self.lifestyle.full_confidence_samples),
                data_points,
                optimal_value: None,
            })
        })
        .collect()
    }

    /// Mood and energy on exercise vs rest days
    fn exercise_patterns(&self, journal: &[JournalEntry]) -> Vec<LifestylePattern> {
        let active: Vec<&JournalEntry> = journal
            .iter()
            .filter(|e| e.exercise == Some(true))
            .collect();
        let rest: Vec<&JournalEntry> = journal
            .iter()
            .filter(|e| e.exercise == Some(false))
            .collect();

        if active.len() < self.lifestyle.min_bucket_size
            || rest.len() < self.lifestyle.min_bucket_size
        {
            return Vec::new();
        }

        [
            (LifestylePatternType::ExerciseMood, Metric::Mood),
            (LifestylePatternType::ExerciseEnergy, Metric::Energy),
        ]
        .into_iter()
        .filter_map(|(pattern_type, metric)| {
            let (avg_active, avg_rest) = compare_groups(&active, &rest, metric)?;
            let impact = avg_active - avg_rest;
            if impact.abs() < self.lifestyle.min_difference {
                return None;
            }
            let data_points = active.len() + rest.len();
            Some(LifestylePattern {
                pattern_type,
                metric: Some(metric),
                description: format!(
                    "On days you exercise your {} averages {:.1}, compared to {:.1} on rest days.",
                    metric, avg_active, avg_rest
                ),
                impact,
                confidence: sample_confidence(data_points, self.lifestyle.full_confidence_samples),
                data_points,
                optimal_value: None,
            })
        })
        .collect()
    }

    /// First week vs last week for each metric (journal is date-sorted)
    ///
    /// Windows are calendar days from each end of the journal, so gaps in
    /// logging shrink a window instead of stretching it.
    fn trend_patterns(&self, journal: &[JournalEntry]) -> Vec<LifestylePattern> {
        let window = self.lifestyle.trend_window_days as i64;
        let (Some(start), Some(end)) = (journal.first(), journal.last()) else {
            return Vec::new();
        };
        // Both windows must fit without overlapping
        if journal.len() < self.lifestyle.trend_min_days
            || window == 0
            || (end.date - start.date).num_days() < window * 2 - 1
        {
            return Vec::new();
        }

        let first_end = start.date + Duration::days(window);
        let last_start = end.date - Duration::days(window);
        let first: Vec<&JournalEntry> = journal.iter().filter(|e| e.date < first_end).collect();
        let last: Vec<&JournalEntry> = journal.iter().filter(|e| e.date > last_start).collect();

        if first.len() < self.lifestyle.min_bucket_size
            || last.len() < self.lifestyle.min_bucket_size
        {
            return Vec::new();
        }
        let data_points = first.len() + last.len();

        Metric::all()
            .iter()
            .filter_map(|&metric| {
                let (avg_last, avg_first) = compare_groups(&last, &first, metric)?;
                let change = avg_last - avg_first;
                if change.abs() < self.lifestyle.min_difference {
                    return None;
                }
                let direction = if change > 0.0 { "risen" } else { "dropped" };
                Some(LifestylePattern {
                    pattern_type: LifestylePatternType::MetricTrend,
                    metric: Some(metric),
                    description: format!(
                        "Your {} has {} from {:.1} to {:.1} between your first and most recent week.",
                        metric, direction, avg_first, avg_last
                    ),
                    impact: change,
                    confidence: sample_confidence(
                        data_points,
                        self.lifestyle.full_confidence_samples,
                    ),
                    data_points,
                    optimal_value: None,
                })
            })
            .collect()
    }

    /// The sleep duration (rounded to the hour) after which the day goes best
    fn optimal_sleep(&self, journal: &[JournalEntry]) -> Option<LifestylePattern> {
        let mut buckets: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
        for entry in journal {
            buckets
                .entry(entry.sleep.round() as i64)
                .or_default()
                .push(entry.daytime_score());
        }

        let averages: Vec<(i64, f64, usize)> = buckets
            .into_iter()
            .filter(|(_, scores)| scores.len() >= self.lifestyle.min_bucket_size)
            .filter_map(|(hours, scores)| mean(&scores).map(|avg| (hours, avg, scores.len())))
            .collect();

        // A single bucket gives nothing to compare against
        if averages.len() < 2 {
            return None;
        }

        let (best_hours, best_avg, _) = averages
            .iter()
            .copied()
            .fold(None::<(i64, f64, usize)>, |best, current| match best {
                Some(b) if b.1 >= current.1 => Some(b),
                _ => Some(current),
            })?;
        let worst_avg = averages
            .iter()
            .map(|(_, avg, _)| *avg)
            .fold(f64::INFINITY, f64::min);
        let data_points: usize = averages.iter().map(|(_, _, n)| n).sum();

        Some(LifestylePattern {
            pattern_type: LifestylePatternType::OptimalSleep,
            metric: Some(Metric::Sleep),
            description: format!(
                "You feel best after about {} hours of sleep (average energy, focus and mood {:.1}).",
                best_hours, best_avg
            ),
            impact: best_avg - worst_avg,
            confidence: sample_confidence(data_points, self.lifestyle.full_confidence_samples),
            data_points,
            optimal_value: Some(best_hours as f64),
        })
    }
}

/// Map a mean difference onto [-1, 1]
pub fn normalize_difference(diff: f64, divisor: f64) -> f64 {
    if divisor <= 0.0 || diff.is_nan() {
        return 0.0;
    }
    (diff / divisor).clamp(-1.0, 1.0)
}

/// Means of a metric in two groups, `None` if either group lacks values
fn compare_groups(a: &[&JournalEntry], b: &[&JournalEntry], metric: Metric) -> Option<(f64, f64)> {
    Some((
        mean(&metric_values(a, metric))?,
        mean(&metric_values(b, metric))?,
    ))
}

fn metric_values(group: &[&JournalEntry], metric: Metric) -> Vec<f64> {
    group.iter().filter_map(|e| e.metric(metric)).collect()
}

/// Group timing analyses by supplement id for quick lookup
pub fn index_timing(analyses: &[TimingAnalysis]) -> HashMap<&str, &TimingAnalysis> {
    analyses
        .iter()
        .map(|a| (a.supplement_id.as_str(), a))
        .collect()
}
