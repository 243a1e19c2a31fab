//! Dosage Advisor
//!
//! Checks each stack item's free-text dosage against the recommended range
//! for its supplement class. Text that cannot be parsed, or a unit that cannot
//! be converted to the table unit, counts as "unspecified" and yields a
//! suggestion of the optimal range instead of a directional correction.

use regex::Regex;

use crate::error::Result;
use crate::knowledge::{self, dosage::DosageRange};
use crate::models::{Priority, Recommendation, RecommendationType, StackItem};

use super::context::AnalysisContext;
use super::engine::Analyzer;
use super::types::{DosageAnalysis, DosageStatus, ParsedDosage};

/// Leading number (with optional thousands separators or decimal comma) followed by a unit word
const DOSAGE_PATTERN: &str = r"^\s*(\d{1,3}(?:,\d{3})+|\d+(?:[.,]\d+)?)\s*(\p{L}+)";

/// Parse free text like "500mg", "1,000 IU" or "2.5 g" into a value and unit.
///
/// Known units are normalized to "mg", "mcg", "g" or "iu"; anything else is
/// kept lowercased. Returns `Ok(None)` when the text has no number + unit prefix.
pub fn parse_dosage(text: &str) -> Result<Option<ParsedDosage>> {
    let re = Regex::new(DOSAGE_PATTERN)?;
    let Some(caps) = re.captures(text) else {
        return Ok(None);
    };

    let number = &caps[1];
    let thousands = number.contains(',') && number.split(',').skip(1).all(|g| g.len() == 3);
    let number = if thousands {
        number.replace(',', "")
    } else {
        number.replace(',', ".")
    };
    let Ok(value) = number.parse::<f64>() else {
        return Ok(None);
    };

    let raw_unit = caps[2].to_lowercase();
    let unit = normalize_unit(&raw_unit)
        .map(str::to_string)
        .unwrap_or(raw_unit);

    Ok(Some(ParsedDosage { value, unit }))
}

/// Canonical name for a known unit
pub fn normalize_unit(unit: &str) -> Option<&'static str> {
    match unit.to_lowercase().as_str() {
        "mg" | "milligram" | "milligrams" => Some("mg"),
        "mcg" | "µg" | "μg" | "ug" | "microgram" | "micrograms" => Some("mcg"),
        "g" | "gr" | "gram" | "grams" => Some("g"),
        "iu" | "ie" => Some("iu"),
        _ => None,
    }
}

/// Micrograms per unit for mass units
fn micrograms_per(unit: &str) -> Option<f64> {
    match unit {
        "g" => Some(1_000_000.0),
        "mg" => Some(1_000.0),
        "mcg" => Some(1.0),
        _ => None,
    }
}

/// Convert between canonical units; `None` when they are not compatible
pub fn convert(value: f64, from: &str, to: &str) -> Option<f64> {
    if from == to {
        return Some(value);
    }
    let from = micrograms_per(from)?;
    let to = micrograms_per(to)?;
    Some(value * from / to)
}

/// Where `value` (already in the table unit) sits relative to the range
pub fn classify(value: f64, range: &DosageRange) -> DosageStatus {
    if value < range.min {
        DosageStatus::BelowMinimum
    } else if value > range.max {
        DosageStatus::AboveMaximum
    } else if value < range.optimal_low {
        DosageStatus::BelowOptimal
    } else if value > range.optimal_high {
        DosageStatus::AboveOptimal
    } else {
        DosageStatus::Optimal
    }
}

#[derive(Default)]
pub struct DosageAdvisor;

impl DosageAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Analyze one item; `None` when its class has no dosage range
    pub fn analyze_item(&self, item: &StackItem) -> Result<Option<DosageAnalysis>> {
        let Some(range) = knowledge::resolve_class(item).and_then(knowledge::dosage::range_for)
        else {
            return Ok(None);
        };

        let parsed = match item.dosage.as_deref() {
            Some(text) => parse_dosage(text)?,
            None => None,
        };
        let current = parsed.and_then(|p| {
            convert(p.value, &p.unit, range.unit).map(|value| ParsedDosage {
                value,
                unit: range.unit.to_string(),
            })
        });
        let status = current
            .as_ref()
            .map(|c| classify(c.value, range))
            .unwrap_or(DosageStatus::Unspecified);

        Ok(Some(DosageAnalysis {
            supplement_id: item.supplement_id.clone(),
            supplement_name: item.supplement_name.clone(),
            class: range.class.to_string(),
            current,
            min: range.min,
            max: range.max,
            unit: range.unit.to_string(),
            optimal_low: range.optimal_low,
            optimal_high: range.optimal_high,
            status,
        }))
    }

    pub fn analyses(&self, ctx: &AnalysisContext) -> Result<Vec<DosageAnalysis>> {
        let mut analyses = Vec::new();
        for item in ctx.stack.iter() {
            if let Some(analysis) = self.analyze_item(item)? {
                analyses.push(analysis);
            }
        }
        Ok(analyses)
    }

    fn to_recommendation(
        &self,
        item: &StackItem,
        analysis: &DosageAnalysis,
    ) -> Option<Recommendation> {
        let unit = display_unit(&analysis.unit);
        let name = &analysis.supplement_name;
        let optimal = format!(
            "{}-{} {}",
            format_amount(analysis.optimal_low),
            format_amount(analysis.optimal_high),
            unit
        );

        let (priority, title, message, confidence) = match (analysis.status, &analysis.current) {
            (DosageStatus::Optimal, _) => return None,
            (DosageStatus::BelowMinimum, Some(current)) => {
                let priority = if current.value < analysis.min / 2.0 {
                    Priority::High
                } else {
                    Priority::Medium
                };
                (
                    priority,
                    format!("Increase {} dosage", name),
                    format!(
                        "Your {} {} of {} is below the effective minimum. Increase to at least {} {} (optimal {}).",
                        format_amount(current.value),
                        unit,
                        name,
                        format_amount(analysis.min),
                        unit,
                        optimal
                    ),
                    0.8,
                )
            }
            (DosageStatus::AboveMaximum, Some(current)) => (
                Priority::High,
                format!("Reduce {} dosage", name),
                format!(
                    "Your {} {} of {} is above the safe upper range. Reduce to at most {} {} (optimal {}).",
                    format_amount(current.value),
                    unit,
                    name,
                    format_amount(analysis.max),
                    unit,
                    optimal
                ),
                0.85,
            ),
            (DosageStatus::BelowOptimal, Some(current)) => (
                Priority::Medium,
                format!("Slightly increase {}", name),
                format!(
                    "{} {} of {} is effective but below the optimal {}. A slight increase is suggested.",
                    format_amount(current.value),
                    unit,
                    name,
                    optimal
                ),
                0.7,
            ),
            (DosageStatus::AboveOptimal, Some(current)) => (
                Priority::Medium,
                format!("Slightly reduce {}", name),
                format!(
                    "{} {} of {} is above the optimal {}. A slight reduction is suggested and is usually equally effective.",
                    format_amount(current.value),
                    unit,
                    name,
                    optimal
                ),
                0.7,
            ),
            _ => {
                let message = match item.dosage.as_deref() {
                    Some(text) if !text.trim().is_empty() => format!(
                        "Could not read the dosage \"{}\" for {}. The usual optimal range is {}.",
                        text.trim(),
                        name,
                        optimal
                    ),
                    _ => format!(
                        "No dosage recorded for {}. The usual optimal range is {}.",
                        name, optimal
                    ),
                };
                (
                    Priority::Low,
                    format!("Set a dosage for {}", name),
                    message,
                    0.6,
                )
            }
        };

        Some(
            Recommendation::new(
                RecommendationType::Dosage,
                format!("dosage:{}", item.supplement_id),
                priority,
                title,
                message,
            )
            .with_supplement(item.to_ref())
            .with_confidence(confidence),
        )
    }
}

impl Analyzer for DosageAdvisor {
    fn id(&self) -> RecommendationType {
        RecommendationType::Dosage
    }

    fn name(&self) -> &'static str {
        "Dosage Advisor"
    }

    fn recommend(&self, ctx: &AnalysisContext) -> Result<Vec<Recommendation>> {
        let mut recommendations = Vec::new();
        for item in ctx.stack.iter() {
            if let Some(analysis) = self.analyze_item(item)? {
                recommendations.extend(self.to_recommendation(item, &analysis));
            }
        }
        Ok(recommendations)
    }
}

fn display_unit(unit: &str) -> &str {
    if unit == "iu" {
        "IU"
    } else {
        unit
    }
}

/// Up to two decimals, trailing zeros dropped
fn format_amount(value: f64) -> String {
    let text = format!("{:.2}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{item, stack_context};

    fn status_of(id: &str, dosage: &str) -> DosageStatus {
        DosageAdvisor::new()
            .analyze_item(&item(id).with_dosage(dosage))
            .unwrap()
            .unwrap()
            .status
    }

    #[test]
    fn test_parse_dosage() {
        assert_eq!(
            parse_dosage("500mg").unwrap(),
            Some(ParsedDosage {
                value: 500.0,
                unit: "mg".to_string()
            })
        );
        assert_eq!(parse_dosage("plenty").unwrap(), None);
        assert_eq!(parse_dosage("").unwrap(), None);
    }

    #[test]
    fn test_parse_dosage_separators_and_units() {
        let parsed = parse_dosage("1,000 IE daily").unwrap().unwrap();
        assert_eq!(parsed.value, 1000.0);
        assert_eq!(parsed.unit, "iu");

        let parsed = parse_dosage("2,5 g").unwrap().unwrap();
        assert_eq!(parsed.value, 2.5);
        assert_eq!(parsed.unit, "g");

        let parsed = parse_dosage("200 µg").unwrap().unwrap();
        assert_eq!(parsed.unit, "mcg");

        let parsed = parse_dosage("2 capsules").unwrap().unwrap();
        assert_eq!(parsed.unit, "capsules");
    }

    #[test]
    fn test_convert() {
        assert_eq!(convert(0.5, "g", "mg"), Some(500.0));
        assert_eq!(convert(1000.0, "mcg", "mg"), Some(1.0));
        assert_eq!(convert(1000.0, "iu", "iu"), Some(1000.0));
        assert_eq!(convert(1000.0, "iu", "mcg"), None);
    }

    #[test]
    fn test_classification() {
        assert_eq!(status_of("magnesium", "300mg"), DosageStatus::Optimal);
        assert_eq!(status_of("vitamin-d", "500 IU"), DosageStatus::BelowMinimum);
        assert_eq!(status_of("vitamin-d", "10000 IU"), DosageStatus::AboveMaximum);
        assert_eq!(status_of("vitamin-d", "900 IU"), DosageStatus::BelowOptimal);
        assert_eq!(status_of("vitamin-d", "4500 IU"), DosageStatus::AboveOptimal);
        assert_eq!(status_of("vitamin-d", "a lot"), DosageStatus::Unspecified);
        assert_eq!(status_of("vitamin-d", "25 mcg"), DosageStatus::Unspecified);
    }

    #[test]
    fn test_grams_are_converted_before_classification() {
        let analysis = DosageAdvisor::new()
            .analyze_item(&item("magnesium").with_dosage("0.3 g"))
            .unwrap()
            .unwrap();
        assert_eq!(analysis.current.unwrap().value, 300.0);
        assert_eq!(analysis.status, DosageStatus::Optimal);
    }

    #[test]
    fn test_recommendation_priorities() {
        let ctx = stack_context(vec![
            item("vitamin-d").with_dosage("300 IU"),
            item("magnesium").with_dosage("300mg"),
            item("zinc").with_dosage("60mg"),
            item("melatonin"),
        ]);
        let recs = DosageAdvisor::new().recommend(&ctx).unwrap();

        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].id, "dosage:vitamin-d");
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].message.contains("at least 800 IU"));
        assert_eq!(recs[1].id, "dosage:zinc");
        assert_eq!(recs[1].priority, Priority::High);
        assert_eq!(recs[2].id, "dosage:melatonin");
        assert_eq!(recs[2].priority, Priority::Low);
        assert!(recs[2].message.contains("optimal range"));
    }

    #[test]
    fn test_near_optimal_dosages_are_medium() {
        let advisor = DosageAdvisor::new();

        let ctx = stack_context(vec![item("vitamin-d").with_dosage("900 IU")]);
        let recs = advisor.recommend(&ctx).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert_eq!(recs[0].confidence, 0.7);
        assert!(recs[0].message.contains("slight increase"));

        let ctx = stack_context(vec![item("vitamin-d").with_dosage("4500 IU")]);
        let recs = advisor.recommend(&ctx).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].message.contains("slight reduction"));
        assert!(recs[0].message.contains("usually equally effective"));
    }

    #[test]
    fn test_unknown_class_is_skipped() {
        let ctx = stack_context(vec![item("mystery-blend").with_dosage("1g")]);
        assert!(DosageAdvisor::new().recommend(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1000.0), "1000");
        assert_eq!(format_amount(0.5), "0.5");
        assert_eq!(format_amount(2.25), "2.25");
    }
}
