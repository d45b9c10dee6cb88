//! Gain-envelope generator: per-week min/max recommended weight curves.
//!
//! The envelope encodes the IOM two-phase pattern: near-flat gain through
//! the first trimester, then a linear steady-state rate taken from the BMI
//! category's weekly bounds. The second phase always uses the category's
//! bounds, never the individual's observed trend.

use crate::{bmi, guidelines, Error, Profile, Result};
use chrono::{Duration, NaiveDate};

/// Total gain allowed by the end of the first trimester, in kg
pub const FIRST_TRIMESTER_CEILING_KG: f64 = 2.0;

/// Last week of the first-trimester phase
pub const FIRST_TRIMESTER_WEEKS: u32 = 13;

/// Full-term week; curves cover weeks 0..=40 inclusive (41 points)
pub const TERM_WEEKS: u32 = 40;

/// One point on a guideline curve: an absolute date and absolute weight
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint {
    pub date: NaiveDate,
    pub weight_kg: f64,
}

/// The min/max recommended-weight curves across weeks 0..=40
#[derive(Clone, Debug, PartialEq)]
pub struct GainEnvelope {
    pub min: Vec<CurvePoint>,
    pub max: Vec<CurvePoint>,
}

/// Cumulative (min, max) gain in kg at a given gestational week.
///
/// Piecewise-linear and continuous at the week-13 boundary: both branches
/// give max = FIRST_TRIMESTER_CEILING_KG there.
pub fn gain_bounds_at(week: u32, weekly_gain_kg: [f64; 2]) -> (f64, f64) {
    if week <= FIRST_TRIMESTER_WEEKS {
        let max = (week as f64 / FIRST_TRIMESTER_WEEKS as f64) * FIRST_TRIMESTER_CEILING_KG;
        (0.0, max)
    } else {
        let steady_weeks = (week - FIRST_TRIMESTER_WEEKS) as f64;
        let min = steady_weeks * weekly_gain_kg[0];
        let max = FIRST_TRIMESTER_CEILING_KG + steady_weeks * weekly_gain_kg[1];
        (min, max)
    }
}

/// Generate the full envelope for a profile.
///
/// Fails with [`Error::InvalidDate`] when the LMP is missing; callers must
/// then omit the guideline curves.
pub fn generate(profile: &Profile) -> Result<GainEnvelope> {
    let lmp = profile
        .lmp_date
        .ok_or_else(|| Error::InvalidDate("LMP date required for guideline curves".into()))?;

    let value = bmi::bmi(profile.height_cm, profile.start_weight_kg);
    let range = guidelines::guideline_for(bmi::classify(value));

    let mut min = Vec::with_capacity(TERM_WEEKS as usize + 1);
    let mut max = Vec::with_capacity(TERM_WEEKS as usize + 1);

    for week in 0..=TERM_WEEKS {
        let date = lmp + Duration::days(i64::from(week) * 7);
        let (min_gain, max_gain) = gain_bounds_at(week, range.weekly_gain_kg);

        min.push(CurvePoint {
            date,
            weight_kg: profile.start_weight_kg + min_gain,
        });
        max.push(CurvePoint {
            date,
            weight_kg: profile.start_weight_kg + max_gain,
        });
    }

    tracing::debug!(
        "Generated gain envelope: {} points per curve from {}",
        min.len(),
        lmp
    );

    Ok(GainEnvelope { min, max })
}
