use chrono::{NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Fixed configuration constants
// ---------------------------------------------------------------------------

/// PPFD below this is counted as "low light" (µmol·m⁻²·s⁻¹).
pub const LOW_PPFD_THRESHOLD: f64 = 200.0;

/// PPFD above this is counted as "high light" (µmol·m⁻²·s⁻¹).
pub const HIGH_PPFD_THRESHOLD: f64 = 500.0;

/// Spacing between consecutive forecast samples, in seconds.  The series is
/// assumed equally spaced at 30-minute intervals; this is configuration, not
/// inferred from the actual timestamp deltas.
pub const SAMPLE_INTERVAL_SECS: f64 = 1800.0;

/// Name of the required forecast value column in the input CSV.
pub const PPFD_COLUMN: &str = "forecast_ppfd";

/// Legacy column from an earlier pipeline version; dropped on load if present.
pub const LEGACY_DLI_COLUMN: &str = "DLI_chunk";

/// Suggested file name for the filtered CSV export.
pub const EXPORT_FILE_NAME: &str = "forecast_filtered.csv";

/// Timestamp format used when writing CSV (matches the input convention).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Sample – one row of the series
// ---------------------------------------------------------------------------

/// A single forecast sample (one row of the source CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// When the forecast value applies.
    pub timestamp: NaiveDateTime,
    /// Forecast PPFD in µmol·m⁻²·s⁻¹; `None` when the source cell was
    /// unparsable.  No clamping: out-of-range values pass through unchanged.
    pub forecast_ppfd: Option<f64>,
    /// Cells of any extra input columns, carried through verbatim and
    /// aligned with [`ForecastSeries::extra_columns`].
    pub extras: Vec<String>,
}

// ---------------------------------------------------------------------------
// ForecastSeries – the complete loaded series
// ---------------------------------------------------------------------------

/// An ordered PPFD time series.  The raw series is built once at load time
/// and never mutated; filtering produces a new derived series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSeries {
    /// All samples, in input order (assumed monotonically non-decreasing).
    pub samples: Vec<Sample>,
    /// Names of the extra input columns (excludes the timestamp index,
    /// the PPFD column, and the dropped legacy column).
    pub extra_columns: Vec<String>,
}

impl ForecastSeries {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Date of the first sample, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.samples.first().map(|s| s.timestamp.date())
    }

    /// Date of the last sample, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.samples.last().map(|s| s.timestamp.date())
    }
}

// ---------------------------------------------------------------------------
// DateRange – inclusive date-granularity bounds
// ---------------------------------------------------------------------------

/// An inclusive `[start, end]` range compared at date (not datetime)
/// granularity.  `start > end` is a user-facing validation error handled by
/// the filter, never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Whether a timestamp's date component falls within the range.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        let d = ts.date();
        self.start <= d && d <= self.end
    }
}
