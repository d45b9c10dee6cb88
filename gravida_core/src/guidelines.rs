//! Static weight-gain guideline table, keyed by BMI category.
//!
//! Values follow the IOM recommendations: a total-gain range for the whole
//! pregnancy and a weekly range for the post-first-trimester phase.

use crate::{BmiCategory, GuidelineRange};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cached guideline table - built once and reused across all operations
static GUIDELINES: Lazy<HashMap<BmiCategory, GuidelineRange>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        BmiCategory::Underweight,
        GuidelineRange {
            total_gain_kg: [12.5, 18.0],
            weekly_gain_kg: [0.44, 0.58],
        },
    );

    table.insert(
        BmiCategory::Normal,
        GuidelineRange {
            total_gain_kg: [11.5, 16.0],
            weekly_gain_kg: [0.35, 0.50],
        },
    );

    table.insert(
        BmiCategory::Overweight,
        GuidelineRange {
            total_gain_kg: [7.0, 11.5],
            weekly_gain_kg: [0.23, 0.33],
        },
    );

    // Present for completeness; the classifier's threshold ladder never
    // reaches this category.
    table.insert(
        BmiCategory::Obese,
        GuidelineRange {
            total_gain_kg: [5.0, 9.0],
            weekly_gain_kg: [0.17, 0.27],
        },
    );

    table
});

/// Look up the guideline range for a BMI category
pub fn guideline_for(category: BmiCategory) -> &'static GuidelineRange {
    &GUIDELINES[&category]
}
