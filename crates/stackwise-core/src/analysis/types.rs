//! Derived analysis artifacts
//!
//! Intermediate records produced by the analyzers. They are turned into
//! [`Recommendation`](crate::models::Recommendation)s or returned verbatim in an
//! [`AnalysisResult`] bundle; none of them are persisted by the engine.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::knowledge::synergy::SynergyKind;
use crate::knowledge::warnings::{WarningSeverity, WarningType};
use crate::models::{Metric, SupplementRef, TimeSlot};

/// Direction of a supplement/metric association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationDirection {
    Positive,
    Negative,
    Neutral,
}

/// Association between taking a supplement and a metric's value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correlation {
    pub supplement_id: String,
    pub supplement_name: String,
    pub metric: Metric,
    /// Normalized mean difference in [-1, 1]
    pub correlation: f64,
    pub direction: CorrelationDirection,
    pub avg_with: f64,
    pub avg_without: f64,
    pub days_with: usize,
    pub days_without: usize,
    pub confidence: f64,
}

/// Average combined wellness score on days a supplement was taken in one slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotScore {
    pub slot: TimeSlot,
    pub average_score: f64,
    pub samples: usize,
}

/// Per-supplement comparison of time-of-day slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingAnalysis {
    pub supplement_id: String,
    pub supplement_name: String,
    /// Observed slots in [`TimeSlot`] order
    pub slots: Vec<SlotScore>,
    pub optimal_time: Option<TimeSlot>,
    pub confidence: f64,
    pub total_samples: usize,
}

impl TimingAnalysis {
    pub fn score_for(&self, slot: TimeSlot) -> Option<&SlotScore> {
        self.slots.iter().find(|s| s.slot == slot)
    }

    pub fn optimal(&self) -> Option<&SlotScore> {
        self.optimal_time.and_then(|slot| self.score_for(slot))
    }

    /// Sample-weighted mean over all slots
    pub fn overall_average(&self) -> Option<f64> {
        if self.total_samples == 0 {
            return None;
        }
        let sum: f64 = self
            .slots
            .iter()
            .map(|s| s.average_score * s.samples as f64)
            .sum();
        Some(sum / self.total_samples as f64)
    }
}

/// A dosage parsed from free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDosage {
    pub value: f64,
    pub unit: String,
}

/// Where the current dosage sits relative to the recommended range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DosageStatus {
    /// No dosage given, or it could not be parsed or converted
    Unspecified,
    BelowMinimum,
    BelowOptimal,
    Optimal,
    AboveOptimal,
    AboveMaximum,
}

/// Current dosage checked against the knowledge table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DosageAnalysis {
    pub supplement_id: String,
    pub supplement_name: String,
    pub class: String,
    /// Parsed dosage converted to the table unit
    pub current: Option<ParsedDosage>,
    pub min: f64,
    pub max: f64,
    pub unit: String,
    pub optimal_low: f64,
    pub optimal_high: f64,
    pub status: DosageStatus,
}

/// A synergy or antagonism between two items in the stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSynergy {
    pub supplement_a: SupplementRef,
    pub supplement_b: SupplementRef,
    pub kind: SynergyKind,
    pub mechanism: String,
    pub action: String,
}

/// A supplement whose important partner is missing from the stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPartner {
    pub supplement: SupplementRef,
    pub missing_class: String,
    pub missing_name: String,
    pub reason: String,
}

/// Kind of lifestyle pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestylePatternType {
    SleepEnergy,
    SleepFocus,
    ExerciseMood,
    ExerciseEnergy,
    MetricTrend,
    OptimalSleep,
}

impl LifestylePatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SleepEnergy => "sleep_energy",
            Self::SleepFocus => "sleep_focus",
            Self::ExerciseMood => "exercise_mood",
            Self::ExerciseEnergy => "exercise_energy",
            Self::MetricTrend => "metric_trend",
            Self::OptimalSleep => "optimal_sleep",
        }
    }
}

/// A pattern found in the journal alone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestylePattern {
    pub pattern_type: LifestylePatternType,
    /// Metric affected (for trends, the metric that changed)
    pub metric: Option<Metric>,
    pub description: String,
    /// Difference in scale points; positive means the favourable condition helps
    /// (for trends, positive means the metric rose)
    pub impact: f64,
    pub confidence: f64,
    pub data_points: usize,
    /// For `optimal_sleep`, the best sleep duration in hours
    pub optimal_value: Option<f64>,
}

/// A safety warning about one supplement or the whole stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementWarning {
    /// "stack" for stack-wide warnings
    pub supplement_id: String,
    pub supplement_name: String,
    pub warning_type: WarningType,
    pub severity: WarningSeverity,
    pub message: String,
    pub rule_id: String,
}

impl SupplementWarning {
    /// Key used to drop duplicate warnings: id + type + first 20 characters of the message
    pub fn dedup_key(&self) -> String {
        let prefix: String = self.message.chars().take(20).collect();
        format!("{}:{}:{}", self.supplement_id, self.warning_type, prefix)
    }
}

/// Date range covered by the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: usize,
}

/// Every derived artifact for one user, for dashboards and diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub user_id: Option<String>,
    pub analyzed_at: DateTime<Utc>,
    pub period: Option<AnalysisPeriod>,
    pub correlations: Vec<Correlation>,
    pub timing: Vec<TimingAnalysis>,
    pub dosage: Vec<DosageAnalysis>,
    pub synergies: Vec<StackSynergy>,
    pub missing_partners: Vec<MissingPartner>,
    pub lifestyle_patterns: Vec<LifestylePattern>,
    pub warnings: Vec<SupplementWarning>,
}

/// Whether there is enough history for recommendations to count as confident advice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessStatus {
    pub ready: bool,
    pub journal_days: usize,
    pub check_ins: usize,
    pub recommendation: String,
}
