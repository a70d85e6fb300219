use super::model::{
    ForecastSeries, HIGH_PPFD_THRESHOLD, LOW_PPFD_THRESHOLD, SAMPLE_INTERVAL_SECS,
};

// ---------------------------------------------------------------------------
// Metrics – derived summary values
// ---------------------------------------------------------------------------

/// Statistical reductions over the non-missing PPFD values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PpfdStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

/// Summary metrics over a filtered series.  Always recomputed in full on a
/// filter change; never cached across interactions.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Cumulative daily light integral in mol·m⁻²·day⁻¹.
    pub dli_total: f64,
    /// Samples below [`LOW_PPFD_THRESHOLD`].
    pub low_count: usize,
    pub low_pct: f64,
    /// Samples above [`HIGH_PPFD_THRESHOLD`].
    pub high_count: usize,
    pub high_pct: f64,
    /// Total rows in the filtered series, missing values included.
    pub total_points: usize,
    /// `None` when every value in the range is missing.
    pub stats: Option<PpfdStats>,
}

/// Compute summary metrics for a non-empty filtered series.
///
/// Each sample is treated as a constant-rate interval of
/// [`SAMPLE_INTERVAL_SECS`] seconds, so
/// `dli_total = Σ ppfd · interval / 1_000_000` converts µmol·m⁻²·s⁻¹
/// samples into mol·m⁻²·day⁻¹.  Missing values contribute nothing to the
/// sum and to the threshold counts, but they still count toward the
/// percentage denominator `total_points`.
pub fn compute(series: &ForecastSeries) -> Metrics {
    let total_points = series.len();
    debug_assert!(total_points > 0, "aggregator requires a non-empty series");

    let mut ppfd_sum = 0.0;
    let mut low_count = 0;
    let mut high_count = 0;

    let mut present = 0usize;
    let mut present_sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for sample in &series.samples {
        let Some(v) = sample.forecast_ppfd else {
            continue;
        };
        ppfd_sum += v;
        if v < LOW_PPFD_THRESHOLD {
            low_count += 1;
        }
        if v > HIGH_PPFD_THRESHOLD {
            high_count += 1;
        }
        present += 1;
        present_sum += v;
        min = min.min(v);
        max = max.max(v);
    }

    let pct = |count: usize| count as f64 / total_points as f64 * 100.0;

    Metrics {
        dli_total: ppfd_sum * SAMPLE_INTERVAL_SECS / 1_000_000.0,
        low_count,
        low_pct: pct(low_count),
        high_count,
        high_pct: pct(high_count),
        total_points,
        stats: (present > 0).then(|| PpfdStats {
            mean: present_sum / present as f64,
            max,
            min,
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
