//! Established optimal time of day per supplement class

use crate::models::TimeSlot;

/// Default timing for a supplement class, used when the user's own data is too thin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingDefault {
    pub class: &'static str,
    pub slot: TimeSlot,
    pub reason: &'static str,
    pub confidence: f64,
}

pub const TIMING_DEFAULTS: &[TimingDefault] = &[
    TimingDefault {
        class: "vitamin-d",
        slot: TimeSlot::Morning,
        reason: "Vitamin D is fat-soluble and absorbs best with breakfast; taken late it may suppress melatonin.",
        confidence: 0.7,
    },
    TimingDefault {
        class: "vitamin-k2",
        slot: TimeSlot::Morning,
        reason: "K2 is fat-soluble and pairs with vitamin D at breakfast.",
        confidence: 0.65,
    },
    TimingDefault {
        class: "vitamin-c",
        slot: TimeSlot::Morning,
        reason: "Vitamin C is water-soluble and fits well into the morning routine.",
        confidence: 0.55,
    },
    TimingDefault {
        class: "vitamin-b12",
        slot: TimeSlot::Morning,
        reason: "B12 supports energy metabolism and can feel stimulating later in the day.",
        confidence: 0.65,
    },
    TimingDefault {
        class: "magnesium",
        slot: TimeSlot::Bedtime,
        reason: "Magnesium relaxes muscles and the nervous system and can improve sleep quality.",
        confidence: 0.75,
    },
    TimingDefault {
        class: "zinc",
        slot: TimeSlot::Evening,
        reason: "Zinc is best taken apart from iron and calcium; the evening keeps it away from a morning iron dose.",
        confidence: 0.6,
    },
    TimingDefault {
        class: "iron",
        slot: TimeSlot::Morning,
        reason: "Iron absorbs best on an empty stomach in the morning, ideally with vitamin C and away from coffee.",
        confidence: 0.7,
    },
    TimingDefault {
        class: "calcium",
        slot: TimeSlot::Evening,
        reason: "Calcium competes with iron and zinc; an evening dose avoids the morning iron window.",
        confidence: 0.55,
    },
    TimingDefault {
        class: "omega-3",
        slot: TimeSlot::Noon,
        reason: "Omega-3 absorbs best with the largest, fat-containing meal of the day.",
        confidence: 0.6,
    },
    TimingDefault {
        class: "curcumin",
        slot: TimeSlot::Noon,
        reason: "Curcumin is poorly absorbed on its own; take it with a fat-containing meal.",
        confidence: 0.55,
    },
    TimingDefault {
        class: "caffeine",
        slot: TimeSlot::Morning,
        reason: "Caffeine has a half-life of about five hours; a morning dose protects your sleep.",
        confidence: 0.85,
    },
    TimingDefault {
        class: "l-theanine",
        slot: TimeSlot::Morning,
        reason: "L-Theanine smooths out caffeine's jitters and is usually taken together with it.",
        confidence: 0.55,
    },
    TimingDefault {
        class: "l-tyrosine",
        slot: TimeSlot::Morning,
        reason: "Tyrosine supports focus under stress and is best taken early on an empty stomach.",
        confidence: 0.65,
    },
    TimingDefault {
        class: "mucuna",
        slot: TimeSlot::Morning,
        reason: "Mucuna is stimulating and can disturb sleep when taken late.",
        confidence: 0.6,
    },
    TimingDefault {
        class: "rhodiola",
        slot: TimeSlot::Morning,
        reason: "Rhodiola is mildly stimulating; a morning dose avoids sleep disruption.",
        confidence: 0.7,
    },
    TimingDefault {
        class: "melatonin",
        slot: TimeSlot::Bedtime,
        reason: "Melatonin signals night to your body and should be taken 30-60 minutes before bed.",
        confidence: 0.9,
    },
    TimingDefault {
        class: "ashwagandha",
        slot: TimeSlot::Evening,
        reason: "Ashwagandha lowers cortisol and supports winding down in the evening.",
        confidence: 0.6,
    },
    TimingDefault {
        class: "5-htp",
        slot: TimeSlot::Evening,
        reason: "5-HTP is a serotonin and melatonin precursor and fits an evening routine.",
        confidence: 0.6,
    },
    TimingDefault {
        class: "tryptophan",
        slot: TimeSlot::Bedtime,
        reason: "Tryptophan is converted to serotonin and melatonin and supports sleep onset.",
        confidence: 0.6,
    },
];

/// Look up the default timing for a class
pub fn default_for(class: &str) -> Option<&'static TimingDefault> {
    TIMING_DEFAULTS.iter().find(|t| t.class == class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reference_known_classes() {
        for default in TIMING_DEFAULTS {
            assert!(crate::knowledge::CLASSES.contains(&default.class));
            assert!((0.0..=1.0).contains(&default.confidence));
        }
    }

    #[test]
    fn test_default_lookup() {
        assert_eq!(default_for("melatonin").unwrap().slot, TimeSlot::Bedtime);
        assert!(default_for("creatine").is_none());
    }
}
