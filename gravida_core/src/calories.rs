//! Daily calorie target estimation.
//!
//! Harris-Benedict BMR with a fixed activity factor and a fixed
//! second-trimester surplus. No per-user age input exists, so the age term
//! uses a fixed assumed age; this is a known simplification.

use crate::{summary, TrackerState};

/// Assumed age for the BMR age term (no age field in the profile)
pub const ASSUMED_AGE_YEARS: f64 = 30.0;

/// Sedentary-to-light activity multiplier
pub const ACTIVITY_FACTOR: f64 = 1.2;

/// Fixed pregnancy surplus, in kcal/day
pub const PREGNANCY_SURPLUS_KCAL: f64 = 340.0;

/// Harris-Benedict basal metabolic rate (female equation)
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64) -> f64 {
    655.0 + 9.6 * weight_kg + 1.8 * height_cm - 4.7 * ASSUMED_AGE_YEARS
}

/// Daily calorie target = round(BMR * activity + surplus)
pub fn daily_target(weight_kg: f64, height_cm: f64) -> u32 {
    let bmr = basal_metabolic_rate(weight_kg, height_cm);
    (bmr * ACTIVITY_FACTOR + PREGNANCY_SURPLUS_KCAL).round() as u32
}

/// Target for the tracker's current weight: the most recent home
/// measurement, or the start weight when no home entries exist.
pub fn target_for(state: &TrackerState) -> u32 {
    daily_target(summary::current_weight_kg(state), state.profile.height_cm)
}
