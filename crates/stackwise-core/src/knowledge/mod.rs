//! Static knowledge tables
//!
//! Read-only, process-wide registries consulted by the analyzers:
//!
//! - **Classes & aliases** (this module) - canonical supplement class keys
//!   and the colloquial names that resolve to them
//! - **Dosage ranges** - per-class minimum, maximum and optimal range
//! - **Timing defaults** - per-class optimal time of day with rationale
//! - **Synergy rules** - order-agnostic synergistic/antagonistic pairs
//! - **Warning rules** - keyword-triggered safety rules with tagged conditions
//!
//! All tables are `static` slices of plain data, so they need no
//! initialization and can be shared across threads freely.

pub mod dosage;
pub mod synergy;
pub mod timing;
pub mod warnings;

use crate::models::StackItem;

/// Canonical supplement class keys
pub const CLASSES: &[&str] = &[
    "vitamin-d",
    "vitamin-k2",
    "vitamin-c",
    "vitamin-b12",
    "magnesium",
    "zinc",
    "iron",
    "copper",
    "calcium",
    "omega-3",
    "curcumin",
    "piperine",
    "caffeine",
    "l-theanine",
    "l-tyrosine",
    "mucuna",
    "rhodiola",
    "melatonin",
    "ashwagandha",
    "5-htp",
    "tryptophan",
    "st-johns-wort",
    "creatine",
    "ginkgo",
];

/// Colloquial / foreign-language names mapped to canonical class keys.
/// Aliases are stored pre-normalized (see [`normalize`]).
pub const ALIASES: &[(&str, &str)] = &[
    ("d3", "vitamin-d"),
    ("vitamin-d3", "vitamin-d"),
    ("vit-d", "vitamin-d"),
    ("vit-d3", "vitamin-d"),
    ("cholecalciferol", "vitamin-d"),
    ("k2", "vitamin-k2"),
    ("vitamin-k", "vitamin-k2"),
    ("mk-7", "vitamin-k2"),
    ("mk7", "vitamin-k2"),
    ("ascorbic-acid", "vitamin-c"),
    ("vit-c", "vitamin-c"),
    ("b12", "vitamin-b12"),
    ("cobalamin", "vitamin-b12"),
    ("methylcobalamin", "vitamin-b12"),
    ("zink", "zinc"),
    ("eisen", "iron"),
    ("ferrous", "iron"),
    ("kupfer", "copper"),
    ("kalzium", "calcium"),
    ("fish-oil", "omega-3"),
    ("fischöl", "omega-3"),
    ("omega3", "omega-3"),
    ("krill-oil", "omega-3"),
    ("turmeric", "curcumin"),
    ("kurkuma", "curcumin"),
    ("kurkumin", "curcumin"),
    ("black-pepper", "piperine"),
    ("bioperine", "piperine"),
    ("piperin", "piperine"),
    ("coffee", "caffeine"),
    ("koffein", "caffeine"),
    ("theanine", "l-theanine"),
    ("tyrosine", "l-tyrosine"),
    ("n-acetyl-l-tyrosine", "l-tyrosine"),
    ("mucuna-pruriens", "mucuna"),
    ("rosenwurz", "rhodiola"),
    ("ksm-66", "ashwagandha"),
    ("5htp", "5-htp"),
    ("griffonia", "5-htp"),
    ("l-tryptophan", "tryptophan"),
    ("st-john-s-wort", "st-johns-wort"),
    ("johanniskraut", "st-johns-wort"),
    ("hypericum", "st-johns-wort"),
    ("ginkgo-biloba", "ginkgo"),
];

/// Classes acting on dopamine signalling
pub const DOPAMINERGIC: &[&str] = &["caffeine", "l-tyrosine", "mucuna", "rhodiola"];

/// Classes raising serotonin
pub const SEROTONERGIC: &[&str] = &["5-htp", "tryptophan", "st-johns-wort"];

/// Lowercase and collapse every run of non-alphanumeric characters into a single `-`
///
/// "St. John's Wort" becomes "st-john-s-wort", "Vitamin D3" becomes "vitamin-d3".
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.trim().chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

/// Resolve free text (an id or a product name) to a canonical class key
///
/// Tries an exact class key, then an exact alias, then looks for a class key
/// or alias appearing as whole dash-delimited tokens inside the text.
pub fn resolve_text(text: &str) -> Option<&'static str> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }

    if let Some(class) = CLASSES.iter().find(|c| **c == normalized) {
        return Some(*class);
    }
    if let Some((_, class)) = ALIASES.iter().find(|(alias, _)| *alias == normalized) {
        return Some(*class);
    }

    let padded = format!("-{}-", normalized);
    let contains = |needle: &str| padded.contains(&format!("-{}-", needle));

    CLASSES
        .iter()
        .copied()
        .find(|&c| contains(c))
        .or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| contains(*alias))
                .map(|(_, class)| *class)
        })
}

/// Resolve a stack item to its class, trying the id before the display name
pub fn resolve_class(item: &StackItem) -> Option<&'static str> {
    resolve_text(&item.supplement_id).or_else(|| resolve_text(&item.supplement_name))
}
