use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::PpfdColorMap;
use crate::data::filter::{filter_range, FilterError};
use crate::data::metrics::{compute, Metrics};
use crate::data::model::{DateRange, ForecastSeries};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything derived from one date-range selection.  Rebuilt from scratch
/// on every filter change; nothing survives across interactions.
pub struct FilteredView {
    pub series: ForecastSeries,
    pub metrics: Metrics,
    pub color_map: PpfdColorMap,
}

/// The full UI state, independent of rendering.
///
/// The raw series is loaded once at startup and held behind an `Arc` as a
/// read-only handle; every interaction re-derives `view` from it.
pub struct AppState {
    raw: Arc<ForecastSeries>,

    /// Where the raw series came from (top-bar label).
    pub source_path: PathBuf,

    /// Current date-range selection, inclusive both ends.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Filtered series + metrics, or the interaction error to display.
    pub view: Result<FilteredView, FilterError>,

    /// Feedback from the last export attempt.
    pub status_message: Option<String>,
}

impl AppState {
    /// Wrap a freshly loaded series.  The selection defaults to the full
    /// span of the data, which is never empty (the loader rejects empty
    /// files), so the initial view is always `Ok`.
    pub fn new(raw: ForecastSeries, source_path: PathBuf) -> Self {
        let start_date = raw.first_date().unwrap_or_default();
        let end_date = raw.last_date().unwrap_or(start_date);

        let mut state = AppState {
            raw: Arc::new(raw),
            source_path,
            start_date,
            end_date,
            view: Err(FilterError::EmptyRange {
                start: start_date,
                end: end_date,
            }),
            status_message: None,
        };
        state.refilter();
        state
    }

    /// Read-only handle to the raw series.
    pub fn raw(&self) -> &ForecastSeries {
        &self.raw
    }

    /// Re-run the pipeline for the current selection: filter, then
    /// aggregate.  On a filter error no aggregation happens and the error
    /// is surfaced for the UI to render.
    pub fn refilter(&mut self) {
        let range = DateRange::new(self.start_date, self.end_date);
        self.view = filter_range(&self.raw, range).map(|series| {
            let metrics = compute(&series);
            let color_map = PpfdColorMap::from_series(&series);
            FilteredView {
                series,
                metrics,
                color_map,
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Sample;
    use chrono::NaiveDate;

    fn raw() -> ForecastSeries {
        let samples = (1..=3)
            .map(|d| Sample {
                timestamp: NaiveDate::from_ymd_opt(2024, 5, d)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap(),
                forecast_ppfd: Some(100.0 * d as f64),
                extras: Vec::new(),
            })
            .collect();
        ForecastSeries {
            samples,
            extra_columns: Vec::new(),
        }
    }

    #[test]
    fn defaults_to_full_span() {
        let state = AppState::new(raw(), PathBuf::from("forecast_result.csv"));
        assert_eq!(state.start_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(state.end_date, NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.series.len(), 3);
    }

    #[test]
    fn invalid_selection_recovers_on_next_interaction() {
        let mut state = AppState::new(raw(), PathBuf::from("forecast_result.csv"));
        state.start_date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        state.end_date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        state.refilter();
        assert!(matches!(state.view, Err(FilterError::InvalidRange { .. })));

        state.end_date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        state.refilter();
        assert_eq!(state.view.as_ref().unwrap().series.len(), 1);
    }

    #[test]
    fn metrics_track_the_selection() {
        let mut state = AppState::new(raw(), PathBuf::from("forecast_result.csv"));
        state.end_date = state.start_date;
        state.refilter();
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.metrics.total_points, 1);
        assert_eq!(view.metrics.stats.unwrap().mean, 100.0);
    }
}
