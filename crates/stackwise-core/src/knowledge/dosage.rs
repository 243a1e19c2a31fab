//! Dosage ranges per supplement class

/// Recommended daily dosage range for a supplement class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DosageRange {
    pub class: &'static str,
    pub min: f64,
    pub max: f64,
    /// Canonical unit: "mg", "mcg", "g" or "iu"
    pub unit: &'static str,
    pub optimal_low: f64,
    pub optimal_high: f64,
}

pub const DOSAGE_RANGES: &[DosageRange] = &[
    DosageRange {
        class: "vitamin-d",
        min: 800.0,
        max: 5000.0,
        unit: "iu",
        optimal_low: 1000.0,
        optimal_high: 4000.0,
    },
    DosageRange {
        class: "vitamin-k2",
        min: 45.0,
        max: 360.0,
        unit: "mcg",
        optimal_low: 90.0,
        optimal_high: 200.0,
    },
    DosageRange {
        class: "vitamin-c",
        min: 100.0,
        max: 2000.0,
        unit: "mg",
        optimal_low: 250.0,
        optimal_high: 1000.0,
    },
    DosageRange {
        class: "vitamin-b12",
        min: 25.0,
        max: 1000.0,
        unit: "mcg",
        optimal_low: 250.0,
        optimal_high: 500.0,
    },
    DosageRange {
        class: "magnesium",
        min: 100.0,
        max: 500.0,
        unit: "mg",
        optimal_low: 200.0,
        optimal_high: 400.0,
    },
    DosageRange {
        class: "zinc",
        min: 5.0,
        max: 40.0,
        unit: "mg",
        optimal_low: 10.0,
        optimal_high: 25.0,
    },
    DosageRange {
        class: "iron",
        min: 8.0,
        max: 45.0,
        unit: "mg",
        optimal_low: 14.0,
        optimal_high: 28.0,
    },
    DosageRange {
        class: "calcium",
        min: 300.0,
        max: 1200.0,
        unit: "mg",
        optimal_low: 500.0,
        optimal_high: 1000.0,
    },
    DosageRange {
        class: "omega-3",
        min: 250.0,
        max: 3000.0,
        unit: "mg",
        optimal_low: 1000.0,
        optimal_high: 2000.0,
    },
    DosageRange {
        class: "curcumin",
        min: 250.0,
        max: 2000.0,
        unit: "mg",
        optimal_low: 500.0,
        optimal_high: 1000.0,
    },
    DosageRange {
        class: "caffeine",
        min: 50.0,
        max: 400.0,
        unit: "mg",
        optimal_low: 100.0,
        optimal_high: 200.0,
    },
    DosageRange {
        class: "l-theanine",
        min: 100.0,
        max: 600.0,
        unit: "mg",
        optimal_low: 200.0,
        optimal_high: 400.0,
    },
    DosageRange {
        class: "l-tyrosine",
        min: 300.0,
        max: 2000.0,
        unit: "mg",
        optimal_low: 500.0,
        optimal_high: 1000.0,
    },
    DosageRange {
        class: "rhodiola",
        min: 100.0,
        max: 680.0,
        unit: "mg",
        optimal_low: 200.0,
        optimal_high: 400.0,
    },
    DosageRange {
        class: "melatonin",
        min: 0.3,
        max: 5.0,
        unit: "mg",
        optimal_low: 0.5,
        optimal_high: 1.0,
    },
    DosageRange {
        class: "ashwagandha",
        min: 250.0,
        max: 1000.0,
        unit: "mg",
        optimal_low: 300.0,
        optimal_high: 600.0,
    },
    DosageRange {
        class: "5-htp",
        min: 50.0,
        max: 300.0,
        unit: "mg",
        optimal_low: 100.0,
        optimal_high: 200.0,
    },
    DosageRange {
        class: "creatine",
        min: 3.0,
        max: 10.0,
        unit: "g",
        optimal_low: 3.0,
        optimal_high: 5.0,
    },
];

/// Look up the dosage range for a class
pub fn range_for(class: &str) -> Option<&'static DosageRange> {
    DOSAGE_RANGES.iter().find(|r| r.class == class)
}
