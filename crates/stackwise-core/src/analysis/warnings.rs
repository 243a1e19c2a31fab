//! Interaction Warner
//!
//! Safety checks over the stack: keyword rules per item (optionally gated by a
//! [`RuleCondition`]), stack-wide heuristics, and a pre-check for a supplement
//! the user is about to add.
//!
//! This analyzer is safety-critical. If it fails, the recommendation service
//! fails the whole call rather than returning results without warnings.

use std::collections::HashSet;

use crate::config::{EngineConfig, WarningConfig};
use crate::error::Result;
use crate::knowledge::warnings::{
    RuleCondition, WarningRule, WarningSeverity, WarningType, ABSORPTION_CONFLICTS, WARNING_RULES,
};
use crate::knowledge::{self, DOPAMINERGIC, SEROTONERGIC};
use crate::models::{Priority, Recommendation, RecommendationType, StackItem, SupplementRef};

use super::context::AnalysisContext;
use super::dosage::{convert, parse_dosage};
use super::engine::Analyzer;
use super::types::SupplementWarning;

/// Subject id used for warnings about the stack as a whole
pub const STACK_SUBJECT: &str = "stack";

pub struct InteractionWarner {
    config: WarningConfig,
}

impl Default for InteractionWarner {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl InteractionWarner {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.warnings.clone(),
        }
    }

    /// All warnings for the current stack, deduplicated, per-item rules first
    pub fn warnings(&self, ctx: &AnalysisContext) -> Result<Vec<SupplementWarning>> {
        let mut collector = WarningCollector::default();

        for item in ctx.stack.iter() {
            for rule in WARNING_RULES
                .iter()
                .filter(|r| r.matches(&item.supplement_id, &item.supplement_name))
            {
                let fires = match &rule.condition {
                    Some(condition) => evaluate_condition(condition, item, ctx)?,
                    None => true,
                };
                if fires {
                    collector.push(rule_warning(rule, item));
                }
            }
        }

        for warning in self.stack_warnings(ctx) {
            collector.push(warning);
        }

        let warnings = collector.into_inner();
        tracing::debug!(count = warnings.len(), "Interaction warnings evaluated");
        Ok(warnings)
    }

    /// Heuristics over the whole stack, independent of per-item rules
    pub fn stack_warnings(&self, ctx: &AnalysisContext) -> Vec<SupplementWarning> {
        let mut warnings = Vec::new();

        if ctx.stack.len() > self.config.max_stack_size {
            warnings.push(stack_warning(
                "stack-size",
                WarningType::Interaction,
                WarningSeverity::Warning,
                format!(
                    "Your stack has {} supplements. Beyond {} it becomes hard to tell what works, and absorption competition increases.",
                    ctx.stack.len(),
                    self.config.max_stack_size
                ),
            ));
        }

        let dopaminergic = names_in(ctx, DOPAMINERGIC);
        if dopaminergic.len() >= self.config.dopaminergic_limit {
            warnings.push(stack_warning(
                "stack-dopaminergic",
                WarningType::Interaction,
                WarningSeverity::Warning,
                format!(
                    "{} dopaminergic supplements together ({}) raise the risk of tolerance and receptor downregulation. Consider cycling them or dropping one.",
                    dopaminergic.len(),
                    dopaminergic.join(", ")
                ),
            ));
        }

        let serotonergic = names_in(ctx, SEROTONERGIC);
        if serotonergic.len() >= self.config.serotonergic_limit {
            warnings.push(serotonergic_warning(&serotonergic));
        }

        warnings
    }

    /// Warnings for a supplement the user is about to add.
    ///
    /// Only unconditional rules apply, plus absorption conflicts and serotonergic
    /// overlap with the existing stack.
    pub fn check_new_supplement(
        &self,
        candidate: &StackItem,
        ctx: &AnalysisContext,
    ) -> Result<Vec<SupplementWarning>> {
        let mut collector = WarningCollector::default();

        for rule in WARNING_RULES.iter().filter(|r| {
            r.condition.is_none() && r.matches(&candidate.supplement_id, &candidate.supplement_name)
        }) {
            collector.push(rule_warning(rule, candidate));
        }

        let Some(class) = knowledge::resolve_class(candidate) else {
            return Ok(collector.into_inner());
        };

        for (existing, existing_class) in ctx.stack.classified() {
            if existing.supplement_id == candidate.supplement_id {
                continue;
            }
            for conflict in ABSORPTION_CONFLICTS {
                let hit = (conflict.a == class && conflict.b == existing_class)
                    || (conflict.a == existing_class && conflict.b == class);
                if hit {
                    collector.push(SupplementWarning {
                        supplement_id: candidate.supplement_id.clone(),
                        supplement_name: candidate.supplement_name.clone(),
                        warning_type: WarningType::Interaction,
                        severity: WarningSeverity::Warning,
                        message: format!(
                            "{} (already in your stack: {})",
                            conflict.message, existing.supplement_name
                        ),
                        rule_id: format!("absorption:{}+{}", conflict.a, conflict.b),
                    });
                }
            }
        }

        if SEROTONERGIC.contains(&class) {
            let mut names: Vec<String> = ctx
                .stack
                .classified()
                .filter(|(item, c)| {
                    SEROTONERGIC.contains(c) && item.supplement_id != candidate.supplement_id
                })
                .map(|(item, _)| item.supplement_name.clone())
                .collect();
            if !names.is_empty() {
                names.push(candidate.supplement_name.clone());
                let mut warning = serotonergic_warning(&names);
                warning.supplement_id = candidate.supplement_id.clone();
                warning.supplement_name = candidate.supplement_name.clone();
                collector.push(warning);
            }
        }

        Ok(collector.into_inner())
    }
}

/// Whether a rule's condition holds for one item in this context
pub fn evaluate_condition(
    condition: &RuleCondition,
    item: &StackItem,
    ctx: &AnalysisContext,
) -> Result<bool> {
    let holds = match condition {
        RuleCondition::ScheduledAt(slots) => item.time.is_some_and(|t| slots.contains(&t)),
        RuleCondition::StackContains(class) => ctx
            .stack
            .classified()
            .any(|(other, c)| c == *class && other.supplement_id != item.supplement_id),
        RuleCondition::ProfileMentions(keywords) => ctx
            .profile
            .as_ref()
            .is_some_and(|p| keywords.iter().any(|k| p.mentions(k))),
        RuleCondition::DosageAbove { value, unit } => {
            let parsed = match item.dosage.as_deref() {
                Some(text) => parse_dosage(text)?,
                None => None,
            };
            parsed
                .and_then(|p| convert(p.value, &p.unit, unit))
                .is_some_and(|amount| amount > *value)
        }
    };
    Ok(holds)
}

/// Keeps the first warning per dedup key, in insertion order
#[derive(Default)]
struct WarningCollector {
    seen: HashSet<String>,
    warnings: Vec<SupplementWarning>,
}

impl WarningCollector {
    fn push(&mut self, warning: SupplementWarning) {
        if self.seen.insert(warning.dedup_key()) {
            self.warnings.push(warning);
        }
    }

    fn into_inner(self) -> Vec<SupplementWarning> {
        self.warnings
    }
}

fn rule_warning(rule: &WarningRule, item: &StackItem) -> SupplementWarning {
    SupplementWarning {
        supplement_id: item.supplement_id.clone(),
        supplement_name: item.supplement_name.clone(),
        warning_type: rule.warning_type,
        severity: rule.severity,
        message: rule.message.to_string(),
        rule_id: rule.id.to_string(),
    }
}

fn stack_warning(
    rule_id: &str,
    warning_type: WarningType,
    severity: WarningSeverity,
    message: String,
) -> SupplementWarning {
    SupplementWarning {
        supplement_id: STACK_SUBJECT.to_string(),
        supplement_name: "Your stack".to_string(),
        warning_type,
        severity,
        message,
        rule_id: rule_id.to_string(),
    }
}

fn serotonergic_warning(names: &[String]) -> SupplementWarning {
    stack_warning(
        "stack-serotonergic",
        WarningType::Contraindication,
        WarningSeverity::Critical,
        format!(
            "Combining serotonergic supplements ({}) can cause serotonin syndrome. Do not take them together without medical supervision.",
            names.join(", ")
        ),
    )
}

/// Display names of stack items whose class is in `classes`
fn names_in(ctx: &AnalysisContext, classes: &[&str]) -> Vec<String> {
    ctx.stack
        .classified()
        .filter(|(_, class)| classes.contains(class))
        .map(|(item, _)| item.supplement_name.clone())
        .collect()
}

fn severity_to_priority(severity: WarningSeverity) -> (Priority, f64) {
    match severity {
        WarningSeverity::Critical => (Priority::Critical, 0.95),
        WarningSeverity::Warning => (Priority::High, 0.9),
        WarningSeverity::Info => (Priority::Low, 0.8),
    }
}

fn warning_recommendation(warning: &SupplementWarning) -> Recommendation {
    let (priority, confidence) = severity_to_priority(warning.severity);
    let kind = match warning.warning_type {
        WarningType::Interaction => "Interaction",
        WarningType::Timing => "Timing",
        WarningType::Dosage => "Dosage",
        WarningType::Contraindication => "Contraindication",
    };

    let mut recommendation = Recommendation::new(
        RecommendationType::Warning,
        format!("warning:{}:{}", warning.supplement_id, warning.rule_id),
        priority,
        format!("{}: {}", kind, warning.supplement_name),
        warning.message.clone(),
    )
    .with_confidence(confidence);

    if warning.supplement_id != STACK_SUBJECT {
        recommendation = recommendation.with_supplement(SupplementRef {
            id: warning.supplement_id.clone(),
            name: warning.supplement_name.clone(),
        });
    }
    recommendation
}

impl Analyzer for InteractionWarner {
    fn id(&self) -> RecommendationType {
        RecommendationType::Warning
    }

    fn name(&self) -> &'static str {
        "Interaction Warner"
    }

    fn is_safety_critical(&self) -> bool {
        true
    }

    fn recommend(&self, ctx: &AnalysisContext) -> Result<Vec<Recommendation>> {
        Ok(self
            .warnings(ctx)?
            .iter()
            .map(warning_recommendation)
            .collect())
    }
}
