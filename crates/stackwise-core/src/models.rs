//! Domain models for Stackwise
//!
//! Input records (journal entries, check-ins, stack items) are produced by the
//! journaling and stack-management layers and arrive already validated. The
//! engine only reads them. [`Recommendation`] is the engine's output.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Coarse time of day a supplement is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Noon,
    Evening,
    Bedtime,
}

impl TimeSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Noon => "noon",
            Self::Evening => "evening",
            Self::Bedtime => "bedtime",
        }
    }

    /// Human-readable label used in recommendation text
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "in the morning",
            Self::Noon => "at noon",
            Self::Evening => "in the evening",
            Self::Bedtime => "before bed",
        }
    }

    pub fn all() -> &'static [TimeSlot] {
        &[Self::Morning, Self::Noon, Self::Evening, Self::Bedtime]
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "noon" | "midday" => Ok(Self::Noon),
            "evening" => Ok(Self::Evening),
            "bedtime" | "night" => Ok(Self::Bedtime),
            _ => Err(format!("Unknown time slot: {}", s)),
        }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A subjective wellness metric recorded in the journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Sleep,
    Energy,
    Focus,
    Mood,
    Stress,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Energy => "energy",
            Self::Focus => "focus",
            Self::Mood => "mood",
            Self::Stress => "stress",
        }
    }

    pub fn all() -> &'static [Metric] {
        &[
            Self::Sleep,
            Self::Energy,
            Self::Focus,
            Self::Mood,
            Self::Stress,
        ]
    }

    /// Metrics every journal entry carries
    pub fn core() -> &'static [Metric] {
        &[Self::Sleep, Self::Energy, Self::Focus, Self::Mood]
    }

    /// Whether a higher value is the desirable direction
    pub fn higher_is_better(&self) -> bool {
        !matches!(self, Self::Stress)
    }

    /// Whether a change of `delta` is for the better
    pub fn is_improvement(&self, delta: f64) -> bool {
        (delta > 0.0) == self.higher_is_better()
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One day of self-reported wellness metrics (0-10 scale)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub sleep: f64,
    pub energy: f64,
    pub focus: f64,
    pub mood: f64,
    #[serde(default)]
    pub stress: Option<f64>,
    #[serde(default)]
    pub exercise: Option<bool>,
    #[serde(default)]
    pub meditation: Option<bool>,
}

impl JournalEntry {
    /// Value of a metric, `None` when the optional metric was not recorded
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Sleep => Some(self.sleep),
            Metric::Energy => Some(self.energy),
            Metric::Focus => Some(self.focus),
            Metric::Mood => Some(self.mood),
            Metric::Stress => self.stress,
        }
    }

    /// Combined wellness score: mean of sleep, energy, focus and mood
    pub fn combined_score(&self) -> f64 {
        (self.sleep + self.energy + self.focus + self.mood) / 4.0
    }

    /// Daytime wellbeing: mean of energy, focus and mood
    pub fn daytime_score(&self) -> f64 {
        (self.energy + self.focus + self.mood) / 3.0
    }
}

/// A single "I took this supplement" event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInData {
    pub supplement_id: String,
    pub supplement_name: String,
    pub checked_at: DateTime<Utc>,
    pub time: TimeSlot,
    #[serde(default)]
    pub dosage: Option<String>,
}

impl CheckInData {
    /// Calendar date of the check-in, used to join against journal entries
    pub fn date(&self) -> NaiveDate {
        self.checked_at.date_naive()
    }
}

/// A supplement in the user's current regimen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackItem {
    pub supplement_id: String,
    pub supplement_name: String,
    /// Free text as entered by the user, e.g. "500mg"
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub time: Option<TimeSlot>,
}

impl StackItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            supplement_id: id.into(),
            supplement_name: name.into(),
            dosage: None,
            time: None,
        }
    }

    pub fn with_dosage(mut self, dosage: impl Into<String>) -> Self {
        self.dosage = Some(dosage.into());
        self
    }

    pub fn with_time(mut self, time: TimeSlot) -> Self {
        self.time = Some(time);
        self
    }

    pub fn to_ref(&self) -> SupplementRef {
        SupplementRef {
            id: self.supplement_id.clone(),
            name: self.supplement_name.clone(),
        }
    }
}

/// Opaque user attributes consulted by profile-aware warning rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
}

impl UserProfile {
    /// Case-insensitive check whether any medication or condition mentions a keyword
    pub fn mentions(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.medications
            .iter()
            .chain(self.conditions.iter())
            .any(|entry| entry.to_lowercase().contains(&keyword))
    }
}

/// Kind of recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Timing,
    Dosage,
    Synergy,
    Lifestyle,
    Warning,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timing => "timing",
            Self::Dosage => "dosage",
            Self::Synergy => "synergy",
            Self::Lifestyle => "lifestyle",
            Self::Warning => "warning",
        }
    }
}

impl std::str::FromStr for RecommendationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "timing" => Ok(Self::Timing),
            "dosage" => Ok(Self::Dosage),
            "synergy" => Ok(Self::Synergy),
            "lifestyle" => Ok(Self::Lifestyle),
            "warning" => Ok(Self::Warning),
            _ => Err(format!("Unknown recommendation type: {}", s)),
        }
    }
}

impl std::fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Urgency of a recommendation. Declaration order is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference to the supplement a recommendation is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementRef {
    pub id: String,
    pub name: String,
}

/// An actionable recommendation or safety warning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Deterministic key, e.g. "synergy:iron+zinc"
    pub id: String,
    #[serde(rename = "type")]
    pub recommendation_type: RecommendationType,
    pub priority: Priority,
    pub title: String,
    pub message: String,
    pub supplement: Option<SupplementRef>,
    /// Always within [0, 1]
    pub confidence: f64,
    /// Number of samples backing this recommendation
    pub data_points: usize,
    pub created_at: DateTime<Utc>,
}

impl Recommendation {
    /// Create a new recommendation with the current timestamp
    pub fn new(
        recommendation_type: RecommendationType,
        id: impl Into<String>,
        priority: Priority,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            recommendation_type,
            priority,
            title: title.into(),
            message: message.into(),
            supplement: None,
            confidence: 0.5,
            data_points: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_supplement(mut self, supplement: SupplementRef) -> Self {
        self.supplement = Some(supplement);
        self
    }

    /// Set confidence, clamped to [0, 1]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = clamp_unit(confidence);
        self
    }

    pub fn with_data_points(mut self, data_points: usize) -> Self {
        self.data_points = data_points;
        self
    }
}

/// Clamp to [0, 1], mapping NaN to 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
