//! Gestational clock: elapsed days/weeks from the LMP reference date.
//!
//! All functions take the reference date ("today") as an explicit parameter
//! so callers control the clock and results stay reproducible.

use chrono::{Duration, NaiveDate};

/// Full term is 40 weeks = 280 days from LMP
pub const GESTATION_DAYS: i64 = 280;

/// Gestational age at a given reference date
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestationalAge {
    /// Whole calendar days since LMP (negative before LMP)
    pub days: i64,
    /// floor(days / 7)
    pub week: i64,
    /// days mod 7, in 0..7
    pub day_of_week: i64,
}

/// Compute gestational age from LMP to the reference date.
///
/// Returns all-zero when the LMP is absent.
pub fn gestational_age(lmp: Option<NaiveDate>, on: NaiveDate) -> GestationalAge {
    let days = days_elapsed(lmp, on);
    GestationalAge {
        days,
        week: days.div_euclid(7),
        day_of_week: days.rem_euclid(7),
    }
}

/// Whole calendar days from LMP to the reference date; 0 when LMP is absent
pub fn days_elapsed(lmp: Option<NaiveDate>, on: NaiveDate) -> i64 {
    match lmp {
        Some(l) => (on - l).num_days(),
        None => 0,
    }
}

/// Week count used for per-entry labels and chart tooltips.
///
/// Unlike [`gestational_age`], this figure takes the absolute day
/// difference, so a date before LMP still yields a non-negative week
/// count. The asymmetry is intentional and must not be "fixed": it
/// matches the established display behavior.
pub fn weeks_elapsed(lmp: Option<NaiveDate>, on: NaiveDate) -> i64 {
    match lmp {
        Some(l) => (on - l).num_days().abs() / 7,
        None => 0,
    }
}

/// Due date = LMP + 280 days
pub fn due_date_from_lmp(lmp: NaiveDate) -> NaiveDate {
    lmp + Duration::days(GESTATION_DAYS)
}

/// LMP = due date - 280 days
pub fn lmp_from_due_date(due: NaiveDate) -> NaiveDate {
    due - Duration::days(GESTATION_DAYS)
}
