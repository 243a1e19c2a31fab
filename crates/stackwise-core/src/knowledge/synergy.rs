//! Synergy and antagonism rules between supplement classes

use serde::{Deserialize, Serialize};

/// Whether a pair works together or against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynergyKind {
    Synergistic,
    Antagonistic,
}

impl SynergyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Synergistic => "synergistic",
            Self::Antagonistic => "antagonistic",
        }
    }
}

impl std::fmt::Display for SynergyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A known interaction between two classes. Order of `a`/`b` carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynergyRule {
    pub a: &'static str,
    pub b: &'static str,
    pub kind: SynergyKind,
    pub mechanism: &'static str,
    pub action: &'static str,
}

impl SynergyRule {
    /// True if this rule covers the two classes, in either order
    pub fn covers(&self, x: &str, y: &str) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

pub const SYNERGY_RULES: &[SynergyRule] = &[
    SynergyRule {
        a: "vitamin-d",
        b: "vitamin-k2",
        kind: SynergyKind::Synergistic,
        mechanism: "Vitamin D raises calcium uptake and K2 directs that calcium into bones instead of arteries.",
        action: "Keep taking them together, ideally with a fat-containing breakfast.",
    },
    SynergyRule {
        a: "vitamin-d",
        b: "magnesium",
        kind: SynergyKind::Synergistic,
        mechanism: "Magnesium is required to convert vitamin D into its active form.",
        action: "A good combination; no change needed.",
    },
    SynergyRule {
        a: "curcumin",
        b: "piperine",
        kind: SynergyKind::Synergistic,
        mechanism: "Piperine inhibits curcumin breakdown and raises its bioavailability many times over.",
        action: "Take them in the same meal.",
    },
    SynergyRule {
        a: "iron",
        b: "vitamin-c",
        kind: SynergyKind::Synergistic,
        mechanism: "Vitamin C converts iron into a form that absorbs far better.",
        action: "Take them together on an empty stomach.",
    },
    SynergyRule {
        a: "caffeine",
        b: "l-theanine",
        kind: SynergyKind::Synergistic,
        mechanism: "L-Theanine softens caffeine's jitters while keeping the focus boost.",
        action: "A 2:1 theanine-to-caffeine ratio works well for most people.",
    },
    SynergyRule {
        a: "omega-3",
        b: "vitamin-d",
        kind: SynergyKind::Synergistic,
        mechanism: "The fat in omega-3 capsules improves absorption of fat-soluble vitamin D.",
        action: "Take them in the same meal.",
    },
    SynergyRule {
        a: "zinc",
        b: "iron",
        kind: SynergyKind::Antagonistic,
        mechanism: "Zinc and iron compete for the same absorption pathway in the gut (absorption competition).",
        action: "Separate them by at least two hours, e.g. iron in the morning and zinc in the evening.",
    },
    SynergyRule {
        a: "zinc",
        b: "copper",
        kind: SynergyKind::Antagonistic,
        mechanism: "High zinc intake blocks copper absorption and can cause copper deficiency over time.",
        action: "Take them at different times or use a combined product with a 10:1 zinc-to-copper ratio.",
    },
    SynergyRule {
        a: "calcium",
        b: "iron",
        kind: SynergyKind::Antagonistic,
        mechanism: "Calcium strongly reduces iron absorption when taken at the same time (absorption competition).",
        action: "Keep at least two hours between calcium and iron.",
    },
    SynergyRule {
        a: "calcium",
        b: "zinc",
        kind: SynergyKind::Antagonistic,
        mechanism: "Large calcium doses reduce zinc absorption.",
        action: "Take zinc away from calcium-rich meals and supplements.",
    },
    SynergyRule {
        a: "calcium",
        b: "magnesium",
        kind: SynergyKind::Antagonistic,
        mechanism: "High-dose calcium and magnesium compete for absorption.",
        action: "Split them across the day if either dose is large.",
    },
];

/// A curated "this works much better with a partner" entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportantPair {
    pub present: &'static str,
    pub missing: &'static str,
    pub missing_name: &'static str,
    pub reason: &'static str,
}

pub const IMPORTANT_PAIRS: &[ImportantPair] = &[
    ImportantPair {
        present: "vitamin-d",
        missing: "vitamin-k2",
        missing_name: "Vitamin K2",
        reason: "Without K2, calcium mobilized by vitamin D can deposit in arteries rather than bones.",
    },
    ImportantPair {
        present: "curcumin",
        missing: "piperine",
        missing_name: "Piperine (black pepper extract)",
        reason: "Curcumin alone is barely absorbed; piperine raises its bioavailability dramatically.",
    },
    ImportantPair {
        present: "iron",
        missing: "vitamin-c",
        missing_name: "Vitamin C",
        reason: "Vitamin C markedly improves iron absorption.",
    },
    ImportantPair {
        present: "zinc",
        missing: "copper",
        missing_name: "Copper",
        reason: "Long-term zinc use depletes copper; a small copper dose keeps the balance.",
    },
];

/// Find the rule covering two classes, if any
pub fn rule_for(x: &str, y: &str) -> Option<&'static SynergyRule> {
    SYNERGY_RULES.iter().find(|r| r.covers(x, y))
}
