//! Safety warning rules
//!
//! Each rule fires on keywords found in a supplement's id or name. Rules with a
//! [`RuleCondition`] only fire when the condition holds for the analysis
//! context; conditions are plain data so they can be inspected and tested
//! without running the warner.

use serde::{Deserialize, Serialize};

use crate::models::TimeSlot;

/// Category of a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningType {
    Interaction,
    Timing,
    Dosage,
    Contraindication,
}

impl WarningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interaction => "interaction",
            Self::Timing => "timing",
            Self::Dosage => "dosage",
            Self::Contraindication => "contraindication",
        }
    }
}

impl std::fmt::Display for WarningType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How serious a warning is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    Info,
    Warning,
    Critical,
}

impl WarningSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Predicate a rule needs before it fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleCondition {
    /// The matched item is scheduled in one of these slots
    ScheduledAt(&'static [TimeSlot]),
    /// Another item of this class is in the stack
    StackContains(&'static str),
    /// The user profile mentions any of these keywords (medications or conditions)
    ProfileMentions(&'static [&'static str]),
    /// The matched item's parsed dosage exceeds this amount
    DosageAbove { value: f64, unit: &'static str },
}

/// A keyword-triggered warning rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarningRule {
    pub id: &'static str,
    /// Lowercase keywords matched against supplement id and name
    pub keywords: &'static [&'static str],
    pub warning_type: WarningType,
    pub severity: WarningSeverity,
    pub message: &'static str,
    pub condition: Option<RuleCondition>,
}

impl WarningRule {
    /// Case-insensitive keyword match against an id and a display name
    pub fn matches(&self, id: &str, name: &str) -> bool {
        let id = id.to_lowercase();
        let name = name.to_lowercase();
        self.keywords
            .iter()
            .any(|k| id.contains(k) || name.contains(k))
    }
}

const ANTIDEPRESSANTS: &[&str] = &[
    "ssri",
    "snri",
    "maoi",
    "antidepressant",
    "sertraline",
    "fluoxetine",
    "citalopram",
    "escitalopram",
    "paroxetine",
    "venlafaxine",
    "tramadol",
];

const ANTICOAGULANTS: &[&str] = &[
    "warfarin",
    "coumadin",
    "phenprocoumon",
    "marcumar",
    "anticoagulant",
    "blood thinner",
];

const ST_JOHNS_WORT: &[&str] = &["st-john", "st. john", "st john", "johanniskraut", "hypericum"];

pub const WARNING_RULES: &[WarningRule] = &[
    WarningRule {
        id: "caffeine-late",
        keywords: &["caffeine", "koffein", "coffee", "guarana"],
        warning_type: WarningType::Timing,
        severity: WarningSeverity::Warning,
        message: "Caffeine in the evening or before bed delays sleep onset and reduces deep sleep. Move it to the morning.",
        condition: Some(RuleCondition::ScheduledAt(&[TimeSlot::Evening, TimeSlot::Bedtime])),
    },
    WarningRule {
        id: "melatonin-daytime",
        keywords: &["melatonin"],
        warning_type: WarningType::Timing,
        severity: WarningSeverity::Warning,
        message: "Melatonin during the day causes drowsiness and shifts your sleep rhythm. Take it 30-60 minutes before bed.",
        condition: Some(RuleCondition::ScheduledAt(&[TimeSlot::Morning, TimeSlot::Noon])),
    },
    WarningRule {
        id: "stimulant-bedtime",
        keywords: &["tyrosine", "mucuna", "rhodiola"],
        warning_type: WarningType::Timing,
        severity: WarningSeverity::Info,
        message: "Stimulating supplements right before bed can make it harder to fall asleep.",
        condition: Some(RuleCondition::ScheduledAt(&[TimeSlot::Bedtime])),
    },
    WarningRule {
        id: "st-johns-wort-enzymes",
        keywords: ST_JOHNS_WORT,
        warning_type: WarningType::Interaction,
        severity: WarningSeverity::Warning,
        message: "St. John's Wort speeds up liver enzymes and weakens many medications, including oral contraceptives and blood thinners.",
        condition: None,
    },
    WarningRule {
        id: "st-johns-wort-antidepressants",
        keywords: ST_JOHNS_WORT,
        warning_type: WarningType::Contraindication,
        severity: WarningSeverity::Critical,
        message: "St. John's Wort together with antidepressants can cause serotonin syndrome. Do not combine without medical supervision.",
        condition: Some(RuleCondition::ProfileMentions(ANTIDEPRESSANTS)),
    },
    WarningRule {
        id: "serotonin-precursor-antidepressants",
        keywords: &["5-htp", "5htp", "griffonia", "tryptophan"],
        warning_type: WarningType::Contraindication,
        severity: WarningSeverity::Critical,
        message: "Serotonin precursors together with antidepressants can cause serotonin syndrome. Talk to your doctor before combining them.",
        condition: Some(RuleCondition::ProfileMentions(ANTIDEPRESSANTS)),
    },
    WarningRule {
        id: "vitamin-k-anticoagulants",
        keywords: &["vitamin-k", "vitamin k", "k2", "mk-7", "mk7"],
        warning_type: WarningType::Interaction,
        severity: WarningSeverity::Critical,
        message: "Vitamin K directly counteracts vitamin-K-antagonist blood thinners such as warfarin. Only take it with your doctor's approval.",
        condition: Some(RuleCondition::ProfileMentions(ANTICOAGULANTS)),
    },
    WarningRule {
        id: "ginkgo-bleeding",
        keywords: &["ginkgo"],
        warning_type: WarningType::Interaction,
        severity: WarningSeverity::Warning,
        message: "Ginkgo thins the blood and raises bleeding risk together with anticoagulants or aspirin.",
        condition: Some(RuleCondition::ProfileMentions(&[
            "warfarin",
            "aspirin",
            "clopidogrel",
            "anticoagulant",
            "blood thinner",
        ])),
    },
    WarningRule {
        id: "ashwagandha-thyroid",
        keywords: &["ashwagandha"],
        warning_type: WarningType::Contraindication,
        severity: WarningSeverity::Warning,
        message: "Ashwagandha can raise thyroid hormone levels and is not recommended during pregnancy.",
        condition: Some(RuleCondition::ProfileMentions(&[
            "thyroid",
            "levothyroxine",
            "pregnan",
        ])),
    },
    WarningRule {
        id: "iron-caffeine",
        keywords: &["iron", "eisen", "ferrous"],
        warning_type: WarningType::Interaction,
        severity: WarningSeverity::Info,
        message: "Coffee and caffeine reduce iron absorption. Keep at least an hour between them.",
        condition: Some(RuleCondition::StackContains("caffeine")),
    },
    WarningRule {
        id: "zinc-high-dose",
        keywords: &["zinc", "zink"],
        warning_type: WarningType::Dosage,
        severity: WarningSeverity::Warning,
        message: "More than 40 mg zinc per day over longer periods can cause copper deficiency.",
        condition: Some(RuleCondition::DosageAbove {
            value: 40.0,
            unit: "mg",
        }),
    },
    WarningRule {
        id: "vitamin-d-high-dose",
        keywords: &["vitamin-d", "vitamin d", "d3"],
        warning_type: WarningType::Dosage,
        severity: WarningSeverity::Warning,
        message: "More than 4000 IU vitamin D per day should be backed by a blood test (25-OH-D) to rule out hypercalcemia.",
        condition: Some(RuleCondition::DosageAbove {
            value: 4000.0,
            unit: "iu",
        }),
    },
    WarningRule {
        id: "melatonin-long-term",
        keywords: &["melatonin"],
        warning_type: WarningType::Dosage,
        severity: WarningSeverity::Info,
        message: "Melatonin works best in low doses (0.5-1 mg); higher doses often cause grogginess the next morning.",
        condition: Some(RuleCondition::DosageAbove {
            value: 3.0,
            unit: "mg",
        }),
    },
];

/// A pair of classes that compete for absorption, used by the new-item pre-check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsorptionConflict {
    pub a: &'static str,
    pub b: &'static str,
    pub message: &'static str,
}

pub const ABSORPTION_CONFLICTS: &[AbsorptionConflict] = &[
    AbsorptionConflict {
        a: "zinc",
        b: "iron",
        message: "Zinc and iron compete for absorption. Take them at least two hours apart.",
    },
    AbsorptionConflict {
        a: "zinc",
        b: "copper",
        message: "Zinc blocks copper absorption. Take them at different times of day.",
    },
    AbsorptionConflict {
        a: "calcium",
        b: "iron",
        message: "Calcium reduces iron absorption. Keep at least two hours between them.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_ids_are_unique() {
        for (i, rule) in WARNING_RULES.iter().enumerate() {
            assert!(WARNING_RULES[i + 1..].iter().all(|r| r.id != rule.id));
        }
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for rule in WARNING_RULES {
            for keyword in rule.keywords {
                assert_eq!(keyword.to_lowercase(), *keyword, "{}", rule.id);
            }
        }
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let rule = WARNING_RULES
            .iter()
            .find(|r| r.id == "st-johns-wort-enzymes")
            .unwrap();
        assert!(rule.matches("hypericum-300", ""));
        assert!(rule.matches("custom", "St. John's Wort Extract"));
        assert!(!rule.matches("magnesium", "Magnesium"));
    }

    #[test]
    fn test_severity_order() {
        assert!(WarningSeverity::Critical > WarningSeverity::Warning);
        assert!(WarningSeverity::Warning > WarningSeverity::Info);
    }
}
