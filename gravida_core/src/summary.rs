//! Progress summarizer: the dashboard figures derived from recorded state.
//!
//! Everything here is a pure function of the tracker state and an explicit
//! "today"; the UI recomputes the whole view after every mutation rather
//! than updating incrementally.

use crate::{
    bmi, calories, clock, guidelines, BmiCategory, GuidelineRange, MealEntry, TrackerState,
    WeightEntry, WeightSource,
};
use chrono::NaiveDate;

/// All dashboard figures for one point in time. Not persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub age: clock::GestationalAge,
    pub bmi: f64,
    pub category: BmiCategory,
    pub guideline: GuidelineRange,
    pub current_weight_kg: f64,
    pub last_weigh_date: Option<NaiveDate>,
    pub total_gain_kg: f64,
    pub todays_calories: u32,
    pub calorie_target: u32,
    pub analysis: Option<String>,
}

impl Dashboard {
    /// Build the full dashboard view for `today`
    pub fn build(state: &TrackerState, today: NaiveDate) -> Dashboard {
        let profile = &state.profile;
        let bmi_value = bmi::bmi(profile.height_cm, profile.start_weight_kg);
        let category = bmi::classify(bmi_value);
        let current = latest_home_entry(&state.weights);
        let current_weight_kg = current
            .map(|w| w.weight_kg)
            .unwrap_or(profile.start_weight_kg);

        Dashboard {
            age: clock::gestational_age(profile.lmp_date, today),
            bmi: bmi_value,
            category,
            guideline: *guidelines::guideline_for(category),
            current_weight_kg,
            last_weigh_date: current.map(|w| w.date),
            total_gain_kg: current_weight_kg - profile.start_weight_kg,
            todays_calories: calories_on(&state.meals, today),
            calorie_target: calories::target_for(state),
            analysis: analysis(state),
        }
    }
}

/// Most recent home-sourced entry (collection is kept date-ascending)
pub fn latest_home_entry(weights: &[WeightEntry]) -> Option<&WeightEntry> {
    weights
        .iter()
        .filter(|w| w.source == WeightSource::Home)
        .next_back()
}

/// Current weight: latest home measurement, else the start weight
pub fn current_weight_kg(state: &TrackerState) -> f64 {
    latest_home_entry(&state.weights)
        .map(|w| w.weight_kg)
        .unwrap_or(state.profile.start_weight_kg)
}

/// Sum of calories for meals recorded on the given date
pub fn calories_on(meals: &[MealEntry], date: NaiveDate) -> u32 {
    meals
        .iter()
        .filter(|m| m.date == date)
        .map(|m| m.calories)
        .sum()
}

/// Format a gain figure with an explicit sign when positive
pub fn format_gain(gain_kg: f64) -> String {
    if gain_kg > 0.0 {
        format!("+{:.1}", gain_kg)
    } else {
        format!("{:.1}", gain_kg)
    }
}

/// Short status line restating the week estimate and the latest weight.
///
/// Requires at least two home measurements; no trend-slope analysis is
/// attempted beyond restating the latest point.
pub fn analysis(state: &TrackerState) -> Option<String> {
    let home: Vec<&WeightEntry> = state
        .weights
        .iter()
        .filter(|w| w.source == WeightSource::Home)
        .collect();
    if home.len() < 2 {
        return None;
    }

    let last = home.last()?;
    let week = clock::weeks_elapsed(state.profile.lmp_date, last.date);
    Some(format!(
        "Around week {}: latest weight {} kg. Keep logging so the gain rate can be read more accurately.",
        week, last.weight_kg
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MealSlot;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn home(id: i64, d: &str, kg: f64) -> WeightEntry {
        WeightEntry {
            id,
            date: date(d),
            weight_kg: kg,
            source: WeightSource::Home,
            note: None,
        }
    }

    fn meal(id: i64, d: &str, cals: u32) -> MealEntry {
        MealEntry {
            id,
            date: date(d),
            slot: MealSlot::Lunch,
            name: "test".into(),
            calories: cals,
        }
    }

    fn reference_state() -> TrackerState {
        let mut state = TrackerState::default();
        state.profile.lmp_date = Some(date("2025-09-13"));
        state.add_weight(home(1, "2025-09-13", 64.0));
        state.add_weight(home(2, "2026-01-27", 70.1));
        state
    }

    #[test]
    fn test_dashboard_reference_figures() {
        let dash = Dashboard::build(&reference_state(), date("2026-01-27"));

        assert_eq!(dash.age.week, 19);
        assert_eq!(dash.age.day_of_week, 3);
        assert_eq!(bmi::display_bmi(dash.bmi), 23.5);
        assert_eq!(dash.category, BmiCategory::Normal);
        assert_eq!(dash.guideline.total_gain_kg, [11.5, 16.0]);
        assert_eq!(dash.current_weight_kg, 70.1);
        assert_eq!(dash.last_weigh_date, Some(date("2026-01-27")));
        assert!((dash.total_gain_kg - 6.1).abs() < 1e-9);
        assert_eq!(dash.calorie_target, 2037);
    }

    #[test]
    fn test_todays_calories_filters_by_date() {
        let mut state = reference_state();
        state.add_meal(meal(10, "2026-01-27", 350));
        state.add_meal(meal(11, "2026-01-27", 550));
        state.add_meal(meal(12, "2026-01-26", 900));

        assert_eq!(calories_on(&state.meals, date("2026-01-27")), 900);
        let dash = Dashboard::build(&state, date("2026-01-27"));
        assert_eq!(dash.todays_calories, 900);
    }

    #[test]
    fn test_clinic_entries_do_not_drive_current_weight() {
        let mut state = TrackerState::default();
        state.add_weight(WeightEntry {
            id: 1,
            date: date("2026-01-27"),
            weight_kg: 71.0,
            source: WeightSource::Clinic,
            note: None,
        });

        assert_eq!(current_weight_kg(&state), 64.0);
        let dash = Dashboard::build(&state, date("2026-01-27"));
        assert_eq!(dash.last_weigh_date, None);
    }

    #[test]
    fn test_gain_formatting_keeps_sign() {
        assert_eq!(format_gain(6.1), "+6.1");
        assert_eq!(format_gain(-0.4), "-0.4");
        assert_eq!(format_gain(0.0), "0.0");
    }

    #[test]
    fn test_analysis_needs_two_home_points() {
        let mut state = TrackerState::default();
        state.profile.lmp_date = Some(date("2025-09-13"));
        assert_eq!(analysis(&state), None);

        state.add_weight(home(1, "2025-09-13", 64.0));
        assert_eq!(analysis(&state), None);

        state.add_weight(home(2, "2026-01-27", 70.1));
        let text = analysis(&state).unwrap();
        assert!(text.contains("week 19"));
        assert!(text.contains("70.1 kg"));
    }
}
