#![forbid(unsafe_code)]

//! Core domain model and business logic for the Gravida pregnancy tracker.
//!
//! This crate provides:
//! - Domain types (profile, weight/meal entries, tracker state)
//! - Gestational clock and BMI classification
//! - Gain-envelope and calorie-target computation
//! - Progress summarizer (dashboard figures)
//! - Persistence (local JSON document, atomic saves)
//! - Chart-series generation and optional cloud sync

pub mod types;
pub mod error;
pub mod guidelines;
pub mod config;
pub mod logging;
pub mod clock;
pub mod bmi;
pub mod envelope;
pub mod calories;
pub mod summary;
pub mod state;
pub mod chart;
pub mod sync;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use guidelines::guideline_for;
pub use config::Config;
pub use clock::{gestational_age, GestationalAge};
pub use envelope::{generate as generate_envelope, GainEnvelope};
pub use summary::Dashboard;
pub use chart::{build_chart, ChartBundle};
pub use sync::{reconcile, HttpIdentityProvider, HttpRemoteStore, RemoteStore, SyncOutcome};
pub use state::STATE_FILE;
