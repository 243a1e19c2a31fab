//! Synergy Checker
//!
//! Matches every pair of stack items against the class-level synergy table and
//! flags supplements whose important partner is missing from the stack.

use std::collections::HashSet;

use crate::error::Result;
use crate::knowledge;
use crate::knowledge::synergy::{self as table, SynergyKind};
use crate::models::{Priority, Recommendation, RecommendationType};

use super::context::AnalysisContext;
use super::engine::Analyzer;
use super::types::{MissingPartner, StackSynergy};

#[derive(Default)]
pub struct SynergyChecker;

impl SynergyChecker {
    pub fn new() -> Self {
        Self
    }

    /// One record per stack pair covered by a rule.
    ///
    /// Records are oriented the way the rule declares them, so the output does
    /// not depend on the order of the stack.
    pub fn find_synergies(&self, ctx: &AnalysisContext) -> Vec<StackSynergy> {
        let mut synergies = Vec::new();

        for (x, y) in ctx.stack.pairs() {
            let (Some(x_class), Some(y_class)) =
                (knowledge::resolve_class(x), knowledge::resolve_class(y))
            else {
                continue;
            };
            if x_class == y_class {
                continue;
            }
            let Some(rule) = table::rule_for(x_class, y_class) else {
                continue;
            };
            let (a, b) = if rule.a == x_class { (x, y) } else { (y, x) };
            synergies.push(StackSynergy {
                supplement_a: a.to_ref(),
                supplement_b: b.to_ref(),
                kind: rule.kind,
                mechanism: rule.mechanism.to_string(),
                action: rule.action.to_string(),
            });
        }

        tracing::debug!(pairs = synergies.len(), "Synergy rules matched");
        synergies
    }

    /// Supplements in the stack whose curated partner class is absent
    pub fn find_missing_synergy_partners(&self, ctx: &AnalysisContext) -> Vec<MissingPartner> {
        let mut seen = HashSet::new();
        let mut missing = Vec::new();

        for (item, class) in ctx.stack.classified() {
            for pair in table::IMPORTANT_PAIRS.iter().filter(|p| p.present == class) {
                if ctx.stack.has_class(pair.missing) || !seen.insert((pair.present, pair.missing)) {
                    continue;
                }
                missing.push(MissingPartner {
                    supplement: item.to_ref(),
                    missing_class: pair.missing.to_string(),
                    missing_name: pair.missing_name.to_string(),
                    reason: pair.reason.to_string(),
                });
            }
        }

        missing
    }
}

fn synergy_recommendation(synergy: &StackSynergy) -> Recommendation {
    let mut ids = [
        synergy.supplement_a.id.as_str(),
        synergy.supplement_b.id.as_str(),
    ];
    ids.sort_unstable();
    let names = format!(
        "{} + {}",
        synergy.supplement_a.name, synergy.supplement_b.name
    );

    let (priority, title, confidence) = match synergy.kind {
        SynergyKind::Antagonistic => (Priority::High, format!("Separate {}", names), 0.85),
        SynergyKind::Synergistic => (Priority::Low, format!("Good combination: {}", names), 0.8),
    };

    Recommendation::new(
        RecommendationType::Synergy,
        format!("synergy:{}+{}", ids[0], ids[1]),
        priority,
        title,
        format!("{} {}", synergy.mechanism, synergy.action),
    )
    .with_supplement(synergy.supplement_a.clone())
    .with_confidence(confidence)
}

fn missing_partner_recommendation(missing: &MissingPartner) -> Recommendation {
    Recommendation::new(
        RecommendationType::Synergy,
        format!(
            "synergy:{}:needs-{}",
            missing.supplement.id, missing.missing_class
        ),
        Priority::Low,
        format!("Consider adding {}", missing.missing_name),
        format!(
            "You take {} without {}. {}",
            missing.supplement.name, missing.missing_name, missing.reason
        ),
    )
    .with_supplement(missing.supplement.clone())
    .with_confidence(0.7)
}

impl Analyzer for SynergyChecker {
    fn id(&self) -> RecommendationType {
        RecommendationType::Synergy
    }

    fn name(&self) -> &'static str {
        "Synergy Checker"
    }

    fn recommend(&self, ctx: &AnalysisContext) -> Result<Vec<Recommendation>> {
        let mut recommendations: Vec<_> = self
            .find_synergies(ctx)
            .iter()
            .map(synergy_recommendation)
            .collect();
        recommendations.extend(
            self.find_missing_synergy_partners(ctx)
                .iter()
                .map(missing_partner_recommendation),
        );
        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StackItem;
    use crate::test_utils::{item, stack_context};

    #[test]
    fn test_antagonistic_pair_is_high_priority() {
        let ctx = stack_context(vec![item("zinc"), item("iron")]);
        let checker = SynergyChecker::new();

        let synergies = checker.find_synergies(&ctx);
        assert_eq!(synergies.len(), 1);
        assert_eq!(synergies[0].kind, SynergyKind::Antagonistic);

        let recs = checker.recommend(&ctx).unwrap();
        assert_eq!(recs[0].id, "synergy:iron+zinc");
        assert_eq!(recs[0].priority, Priority::High);
    }

    #[test]
    fn test_result_does_not_depend_on_stack_order() {
        let checker = SynergyChecker::new();
        let forward = checker.find_synergies(&stack_context(vec![item("zinc"), item("iron")]));
        let backward = checker.find_synergies(&stack_context(vec![item("iron"), item("zinc")]));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_aliases_resolve_before_matching() {
        let ctx = stack_context(vec![
            StackItem::new("sup-1", "Vitamin D3"),
            StackItem::new("sup-2", "Vitamin K2 MK-7"),
        ]);
        let recs = SynergyChecker::new().recommend(&ctx).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Low);
        assert_eq!(recs[0].id, "synergy:sup-1+sup-2");
    }

    #[test]
    fn test_missing_partner() {
        let ctx = stack_context(vec![item("curcumin"), item("magnesium")]);
        let missing = SynergyChecker::new().find_missing_synergy_partners(&ctx);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].missing_class, "piperine");

        let recs = SynergyChecker::new().recommend(&ctx).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, "synergy:curcumin:needs-piperine");
        assert_eq!(recs[0].priority, Priority::Low);
    }

    #[test]
    fn test_no_missing_partner_when_present() {
        let ctx = stack_context(vec![item("vitamin-d"), item("vitamin-k2")]);
        assert!(SynergyChecker::new()
            .find_missing_synergy_partners(&ctx)
            .is_empty());
    }

    #[test]
    fn test_unrelated_items_yield_nothing() {
        let ctx = stack_context(vec![item("creatine"), item("mystery-blend")]);
        assert!(SynergyChecker::new().recommend(&ctx).unwrap().is_empty());
    }
}
