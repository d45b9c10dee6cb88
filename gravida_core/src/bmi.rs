//! Pre-pregnancy BMI computation and category classification.

use crate::BmiCategory;

/// BMI = weight(kg) / height(m)^2
pub fn bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Map a BMI value to its guideline category.
///
/// Thresholds: `< 18.5` underweight, `< 25` normal, `>= 25` overweight.
/// The ladder never selects `Obese`; that table row exists for completeness
/// and is a known gap in the classification rules.
pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else {
        BmiCategory::Overweight
    }
}

/// BMI rounded to one decimal for display
pub fn display_bmi(bmi: f64) -> f64 {
    (bmi * 10.0).round() / 10.0
}
