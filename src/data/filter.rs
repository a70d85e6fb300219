use chrono::NaiveDate;
use thiserror::Error;

use super::model::{DateRange, ForecastSeries};

// ---------------------------------------------------------------------------
// Interaction-level errors
// ---------------------------------------------------------------------------

/// Recoverable errors raised when applying a date range.  Both halt the
/// current pipeline run; the raw series and the previous view are untouched
/// and the next interaction starts fresh.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("no forecast data between {start} and {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },
}

// ---------------------------------------------------------------------------
// Range filter
// ---------------------------------------------------------------------------

/// Select the samples whose timestamp's *date* lies in `[start, end]`,
/// inclusive both ends.
///
/// Downstream stages must not see an invalid or empty selection, so this is
/// the single gate: `start > end` yields [`FilterError::InvalidRange`] and a
/// selection with zero rows yields [`FilterError::EmptyRange`].
pub fn filter_range(
    series: &ForecastSeries,
    range: DateRange,
) -> Result<ForecastSeries, FilterError> {
    if range.start > range.end {
        return Err(FilterError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }

    let samples: Vec<_> = series
        .samples
        .iter()
        .filter(|s| range.contains(s.timestamp))
        .cloned()
        .collect();

    if samples.is_empty() {
        return Err(FilterError::EmptyRange {
            start: range.start,
            end: range.end,
        });
    }

    Ok(ForecastSeries {
        samples,
        extra_columns: series.extra_columns.clone(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
