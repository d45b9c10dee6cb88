//! Chart-series generation for the external chart renderer.
//!
//! The renderer consumes four labeled series of (date, weight) pairs: the
//! max/min guideline curves and the home/clinic measurement points. Each
//! point also carries its gestational week for tooltip labels.

use crate::{clock, envelope, Result, TrackerState, WeightSource};
use chrono::NaiveDate;
use serde::Serialize;
use std::io;

/// One chart point: absolute date, absolute weight, week label for tooltips
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    #[serde(rename = "weight")]
    pub weight_kg: f64,
    pub week: i64,
}

/// An ordered, labeled series of points
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

/// The four series the renderer expects.
///
/// Guideline curves are absent when the profile has no LMP date; the
/// measurement series are always present (possibly empty).
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChartBundle {
    pub max_guideline: Option<ChartSeries>,
    pub min_guideline: Option<ChartSeries>,
    pub home: ChartSeries,
    pub clinic: ChartSeries,
}

/// Build all chart series from the tracker state
pub fn build_chart(state: &TrackerState) -> ChartBundle {
    let lmp = state.profile.lmp_date;

    let (max_guideline, min_guideline) = match envelope::generate(&state.profile) {
        Ok(env) => (
            Some(curve_series("Recommended max", &env.max, lmp)),
            Some(curve_series("Recommended min", &env.min, lmp)),
        ),
        Err(e) => {
            tracing::warn!("Omitting guideline curves: {}", e);
            (None, None)
        }
    };

    ChartBundle {
        max_guideline,
        min_guideline,
        home: measurement_series("Home", state, WeightSource::Home),
        clinic: measurement_series("Clinic", state, WeightSource::Clinic),
    }
}

fn curve_series(
    label: &str,
    points: &[envelope::CurvePoint],
    lmp: Option<NaiveDate>,
) -> ChartSeries {
    ChartSeries {
        label: label.into(),
        points: points
            .iter()
            .map(|p| SeriesPoint {
                date: p.date,
                weight_kg: p.weight_kg,
                week: clock::weeks_elapsed(lmp, p.date),
            })
            .collect(),
    }
}

fn measurement_series(label: &str, state: &TrackerState, source: WeightSource) -> ChartSeries {
    ChartSeries {
        label: label.into(),
        points: state
            .weights
            .iter()
            .filter(|w| w.source == source)
            .map(|w| SeriesPoint {
                date: w.date,
                weight_kg: w.weight_kg,
                week: clock::weeks_elapsed(state.profile.lmp_date, w.date),
            })
            .collect(),
    }
}

/// Write the bundle as flat CSV rows (series, date, week, weight)
pub fn write_csv<W: io::Write>(bundle: &ChartBundle, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["series", "date", "week", "weight"])?;

    let all = [
        bundle.max_guideline.as_ref(),
        bundle.min_guideline.as_ref(),
        Some(&bundle.home),
        Some(&bundle.clinic),
    ];
    for series in all.into_iter().flatten() {
        for p in &series.points {
            out.write_record([
                series.label.clone(),
                p.date.to_string(),
                p.week.to_string(),
                p.weight_kg.to_string(),
            ])?;
        }
    }

    out.flush()?;
    Ok(())
}
