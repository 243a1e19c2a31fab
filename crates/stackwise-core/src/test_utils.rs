//! Test utilities for stackwise-core
//!
//! Small builders for journal entries, check-ins and contexts so tests can
//! describe a history in a few lines.

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};

use crate::analysis::AnalysisContext;
use crate::models::{CheckInData, JournalEntry, StackItem, TimeSlot};

/// Day `n` of the test calendar (day 0 is 2026-01-01)
pub fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + Duration::days(n)
}

/// Journal entry on day `n` with the four core metrics
pub fn journal(n: i64, sleep: f64, energy: f64, focus: f64, mood: f64) -> JournalEntry {
    JournalEntry {
        date: day(n),
        sleep,
        energy,
        focus,
        mood,
        stress: None,
        exercise: None,
        meditation: None,
    }
}

/// Journal entry on day `n` with every metric at `value`
pub fn flat_journal(n: i64, value: f64) -> JournalEntry {
    journal(n, value, value, value, value)
}

/// Check-in for a supplement on day `n`
pub fn check_in(supplement_id: &str, n: i64, time: TimeSlot) -> CheckInData {
    let date = day(n);
    let hour = match time {
        TimeSlot::Morning => 8,
        TimeSlot::Noon => 12,
        TimeSlot::Evening => 18,
        TimeSlot::Bedtime => 22,
    };
    CheckInData {
        supplement_id: supplement_id.to_string(),
        supplement_name: supplement_id.to_string(),
        checked_at: Utc
            .with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0)
            .unwrap(),
        time,
        dosage: None,
    }
}

/// Stack item whose name equals its id
pub fn item(id: &str) -> StackItem {
    StackItem::new(id, id)
}

/// Context with only a stack
pub fn stack_context(items: Vec<StackItem>) -> AnalysisContext {
    AnalysisContext::new(vec![], vec![], items)
}
