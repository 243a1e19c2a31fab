//! Analysis context - the immutable snapshot every analyzer reads

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::knowledge;
use crate::models::{CheckInData, JournalEntry, Metric, StackItem, UserProfile};

/// The user's current regimen, indexed by `supplement_id`
///
/// Items keep their insertion order for deterministic output; lookups by id
/// go through the index.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    items: Vec<StackItem>,
    index: HashMap<String, usize>,
}

impl Stack {
    /// Build a stack, keeping the first item for any duplicated id
    pub fn new(items: Vec<StackItem>) -> Self {
        let mut stack = Self::default();
        for item in items {
            if stack.index.contains_key(&item.supplement_id) {
                tracing::debug!(
                    supplement = item.supplement_id.as_str(),
                    "Duplicate stack item ignored"
                );
                continue;
            }
            stack
                .index
                .insert(item.supplement_id.clone(), stack.items.len());
            stack.items.push(item);
        }
        stack
    }

    pub fn get(&self, supplement_id: &str) -> Option<&StackItem> {
        self.index.get(supplement_id).map(|&i| &self.items[i])
    }

    pub fn contains(&self, supplement_id: &str) -> bool {
        self.index.contains_key(supplement_id)
    }

    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &StackItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every unordered pair of items, each pair once, in stack order
    pub fn pairs(&self) -> impl Iterator<Item = (&StackItem, &StackItem)> {
        self.items
            .iter()
            .enumerate()
            .flat_map(move |(i, a)| self.items[i + 1..].iter().map(move |b| (a, b)))
    }

    /// Items resolved to their supplement class (unresolvable items are skipped)
    pub fn classified(&self) -> impl Iterator<Item = (&StackItem, &'static str)> {
        self.items
            .iter()
            .filter_map(|item| knowledge::resolve_class(item).map(|class| (item, class)))
    }

    /// Whether any item resolves to the given class
    pub fn has_class(&self, class: &str) -> bool {
        self.classified().any(|(_, c)| c == class)
    }
}

/// Serializable form of the context, as produced by the persistence layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSnapshot {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub journal_history: Vec<JournalEntry>,
    #[serde(default)]
    pub check_in_history: Vec<CheckInData>,
    #[serde(default)]
    pub current_stack: Vec<StackItem>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

impl AnalysisSnapshot {
    /// Parse a snapshot and reject journal scores outside the 0-10 scale
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: AnalysisSnapshot = serde_json::from_str(content)?;
        for entry in &snapshot.journal_history {
            for metric in Metric::all() {
                if let Some(value) = entry.metric(*metric) {
                    if !(0.0..=10.0).contains(&value) {
                        return Err(Error::InvalidData(format!(
                            "{} on {} is {}, expected 0-10",
                            metric, entry.date, value
                        )));
                    }
                }
            }
        }
        Ok(snapshot)
    }
}

/// Context provided to analyzers
///
/// Built once per request and never mutated. Journal entries are sorted by
/// date; check-ins keep their original order.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub user_id: Option<String>,
    pub journal: Vec<JournalEntry>,
    pub check_ins: Vec<CheckInData>,
    pub stack: Stack,
    pub profile: Option<UserProfile>,
}

impl AnalysisContext {
    /// Create a new analysis context
    pub fn new(
        journal: Vec<JournalEntry>,
        check_ins: Vec<CheckInData>,
        stack: Vec<StackItem>,
    ) -> Self {
        let mut journal = journal;
        journal.sort_by_key(|e| e.date);
        Self {
            user_id: None,
            journal,
            check_ins,
            stack: Stack::new(stack),
            profile: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Journal entry for a date (entries are date-unique; the first wins otherwise)
    pub fn journal_on(&self, date: NaiveDate) -> Option<&JournalEntry> {
        let i = self.journal.partition_point(|e| e.date < date);
        self.journal.get(i).filter(|e| e.date == date)
    }

    /// Dates on which a supplement was checked in
    pub fn check_in_dates(&self, supplement_id: &str) -> HashSet<NaiveDate> {
        self.check_ins
            .iter()
            .filter(|c| c.supplement_id == supplement_id)
            .map(CheckInData::date)
            .collect()
    }

    /// First and last journal date
    pub fn journal_period(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.journal.first(), self.journal.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

impl From<AnalysisSnapshot> for AnalysisContext {
    fn from(snapshot: AnalysisSnapshot) -> Self {
        let mut ctx = Self::new(
            snapshot.journal_history,
            snapshot.check_in_history,
            snapshot.current_stack,
        );
        ctx.user_id = snapshot.user_id;
        ctx.profile = snapshot.profile;
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;
    use crate::test_utils::{check_in, day, journal};

    #[test]
    fn test_stack_dedupes_by_id() {
        let stack = Stack::new(vec![
            StackItem::new("zinc", "Zinc"),
            StackItem::new("iron", "Iron"),
            StackItem::new("zinc", "Zinc again"),
        ]);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.get("zinc").unwrap().supplement_name, "Zinc");
        assert!(stack.contains("iron"));
        assert!(!stack.contains("copper"));
    }

    #[test]
    fn test_stack_pairs_visits_each_pair_once() {
        let stack = Stack::new(vec![
            StackItem::new("a", "A"),
            StackItem::new("b", "B"),
            StackItem::new("c", "C"),
        ]);
        let pairs: Vec<_> = stack
            .pairs()
            .map(|(x, y)| (x.supplement_id.as_str(), y.supplement_id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "b"), ("a", "c"), ("b", "c")]);
    }

    #[test]
    fn test_journal_lookup_after_sorting() {
        let ctx = AnalysisContext::new(
            vec![journal(3, 7.0, 6.0, 6.0, 6.0), journal(1, 5.0, 4.0, 4.0, 4.0)],
            vec![],
            vec![],
        );
        assert_eq!(ctx.journal[0].date, day(1));
        assert_eq!(ctx.journal_on(day(3)).unwrap().sleep, 7.0);
        assert!(ctx.journal_on(day(2)).is_none());
        assert_eq!(ctx.journal_period(), Some((day(1), day(3))));
    }

    #[test]
    fn test_check_in_dates() {
        let ctx = AnalysisContext::new(
            vec![],
            vec![
                check_in("zinc", 1, TimeSlot::Morning),
                check_in("zinc", 1, TimeSlot::Evening),
                check_in("zinc", 2, TimeSlot::Morning),
                check_in("iron", 3, TimeSlot::Morning),
            ],
            vec![],
        );
        let dates = ctx.check_in_dates("zinc");
        assert_eq!(dates.len(), 2);
        assert!(dates.contains(&day(1)) && dates.contains(&day(2)));
    }

    #[test]
    fn test_snapshot_deserializes_wire_names() {
        let json = r#"{
            "userId": "u1",
            "journalHistory": [
                {"date": "2026-03-01", "sleep": 7, "energy": 6, "focus": 5, "mood": 7}
            ],
            "checkInHistory": [
                {"supplementId": "zinc", "supplementName": "Zinc",
                 "checkedAt": "2026-03-01T08:00:00Z", "time": "morning"}
            ],
            "currentStack": [
                {"supplementId": "zinc", "supplementName": "Zinc", "dosage": "25mg", "time": "evening"}
            ]
        }"#;
        let snapshot: AnalysisSnapshot = serde_json::from_str(json).unwrap();
        let ctx = AnalysisContext::from(snapshot);
        assert_eq!(ctx.user_id.as_deref(), Some("u1"));
        assert_eq!(ctx.journal.len(), 1);
        assert_eq!(ctx.check_ins[0].time, TimeSlot::Morning);
        assert_eq!(ctx.stack.get("zinc").unwrap().time, Some(TimeSlot::Evening));
        assert!(ctx.profile.is_none());
    }

    #[test]
    fn test_from_json_parses_snapshot() {
        let snapshot = AnalysisSnapshot::from_json(
            r#"{"journalHistory": [
                {"date": "2026-03-01", "sleep": 7, "energy": 6, "focus": 5, "mood": 7, "stress": 3}
            ]}"#,
        )
        .unwrap();
        assert_eq!(snapshot.journal_history.len(), 1);
        assert!(snapshot.current_stack.is_empty());
    }

    #[test]
    fn test_from_json_malformed_is_json_error() {
        let err = AnalysisSnapshot::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_json_rejects_out_of_scale_scores() {
        let err = AnalysisSnapshot::from_json(
            r#"{"journalHistory": [
                {"date": "2026-03-01", "sleep": 7, "energy": 14, "focus": 5, "mood": 7}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("energy"));
    }
}
