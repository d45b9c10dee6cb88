//! Core domain types for the Gravida pregnancy tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - The user profile (height, pre-pregnancy weight, reference dates)
//! - Weight and meal log entries
//! - The persisted tracker state and its mutation operations
//! - BMI categories and guideline ranges

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Profile
// ============================================================================

/// User profile holding the inputs every computation depends on.
///
/// `lmp_date` is the reference epoch for gestational-age math. It may be
/// absent; computations then return zero/empty rather than failing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(rename = "height")]
    pub height_cm: f64,

    #[serde(rename = "startWeight")]
    pub start_weight_kg: f64,

    #[serde(rename = "lmpDate", default)]
    pub lmp_date: Option<NaiveDate>,

    #[serde(rename = "dueDate", default)]
    pub due_date: Option<NaiveDate>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            height_cm: 165.0,
            start_weight_kg: 64.0,
            lmp_date: None,
            due_date: None,
        }
    }
}

// ============================================================================
// Log Entries
// ============================================================================

/// Provenance of a weight measurement.
///
/// Home and clinic readings are rendered differently and fed to the chart
/// as distinct series.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    Home,
    Clinic,
}

/// A recorded weight measurement
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    #[serde(rename = "type")]
    pub source: WeightSource,
    #[serde(default)]
    pub note: Option<String>,
}

/// Meal slot within a day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// A recorded meal with its calorie count
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MealEntry {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "meal")]
    pub slot: MealSlot,
    pub name: String,
    #[serde(rename = "cals")]
    pub calories: u32,
}

// ============================================================================
// Guideline Types
// ============================================================================

/// Pre-pregnancy BMI category used to select a guideline range
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

/// Recommended gain ranges for one BMI category.
///
/// `weekly_gain_kg` applies to the post-first-trimester phase only.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GuidelineRange {
    pub total_gain_kg: [f64; 2],
    pub weekly_gain_kg: [f64; 2],
}

// ============================================================================
// Persisted State
// ============================================================================

/// The entire persisted application state.
///
/// Owned exclusively by the client; any remote copy is a replica
/// reconciled at session start.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct TrackerState {
    #[serde(default)]
    pub profile: Profile,

    #[serde(default)]
    pub weights: Vec<WeightEntry>,

    #[serde(default)]
    pub meals: Vec<MealEntry>,
}

impl TrackerState {
    /// Allocate a unique entry id derived from the creation timestamp.
    ///
    /// Ids are millisecond timestamps, bumped past the current maximum so
    /// that two entries created within the same millisecond stay distinct.
    pub fn next_entry_id(&self, now_ms: i64) -> i64 {
        let max_existing = self
            .weights
            .iter()
            .map(|w| w.id)
            .chain(self.meals.iter().map(|m| m.id))
            .max()
            .unwrap_or(0);
        now_ms.max(max_existing + 1)
    }

    /// Insert a weight entry, keeping the collection sorted ascending by date
    pub fn add_weight(&mut self, entry: WeightEntry) {
        self.weights.push(entry);
        self.weights.sort_by_key(|w| w.date);
    }

    /// Remove a weight entry by id.
    ///
    /// Removing an absent id leaves the collection unchanged.
    pub fn remove_weight(&mut self, id: i64) -> bool {
        let before = self.weights.len();
        self.weights.retain(|w| w.id != id);
        self.weights.len() != before
    }

    /// Append a meal entry (insertion order retained)
    pub fn add_meal(&mut self, entry: MealEntry) {
        self.meals.push(entry);
    }

    /// Remove a meal entry by id.
    ///
    /// Removing an absent id leaves the collection unchanged.
    pub fn remove_meal(&mut self, id: i64) -> bool {
        let before = self.meals.len();
        self.meals.retain(|m| m.id != id);
        self.meals.len() != before
    }

    /// Full data reset: profile back to defaults, both logs cleared
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
