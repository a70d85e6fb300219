use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use super::model::{ForecastSeries, Sample, LEGACY_DLI_COLUMN, PPFD_COLUMN};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the forecast series from a CSV file.
///
/// Layout: header row; the first column is the timestamp index, a
/// `forecast_ppfd` column is required, and a legacy `DLI_chunk` column is
/// dropped if present.  Any other columns are carried through verbatim.
///
/// A missing file, missing required column, unparsable timestamp, or a file
/// with zero data rows is fatal.  An unparsable `forecast_ppfd` cell is not:
/// it becomes a missing value and the load continues.
pub fn load_csv(path: &Path) -> Result<ForecastSeries> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_series(file)
}

/// Parse a forecast series from any reader.  Split out from [`load_csv`] so
/// the exporter round-trip can be exercised without touching the filesystem.
pub fn read_series<R: Read>(input: R) -> Result<ForecastSeries> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV has no columns");
    }

    // First column is the timestamp index.
    let ppfd_idx = headers
        .iter()
        .position(|h| h == PPFD_COLUMN)
        .with_context(|| format!("CSV missing '{PPFD_COLUMN}' column"))?;
    if ppfd_idx == 0 {
        bail!("first CSV column must be the timestamp index, not '{PPFD_COLUMN}'");
    }

    // Everything except the index, the PPFD column, and the legacy column
    // is an extra column preserved for the table and the export.
    let extra_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(i, h)| *i != ppfd_idx && h.as_str() != LEGACY_DLI_COLUMN)
        .map(|(i, h)| (i, h.clone()))
        .collect();

    let mut samples = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let raw_ts = record.get(0).unwrap_or("");
        let timestamp = parse_timestamp(raw_ts)
            .with_context(|| format!("CSV row {row_no}: bad timestamp '{raw_ts}'"))?;

        // Unparsable cells become missing values rather than failing the load.
        let forecast_ppfd = record
            .get(ppfd_idx)
            .and_then(|s| s.trim().parse::<f64>().ok());

        let extras = extra_cols
            .iter()
            .map(|(i, _)| record.get(*i).unwrap_or("").to_string())
            .collect();

        samples.push(Sample {
            timestamp,
            forecast_ppfd,
            extras,
        });
    }

    if samples.is_empty() {
        bail!("CSV contains no data rows");
    }

    Ok(ForecastSeries {
        samples,
        extra_columns: extra_cols.into_iter().map(|(_, h)| h).collect(),
    })
}

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse a timestamp cell, accepting a few common datetime layouts and bare
/// dates (interpreted as midnight).
fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_hms_opt(0, 0, 0).unwrap());
    }
    bail!("unrecognised timestamp format")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_basic_series() {
        let csv = "\
timestamp,forecast_ppfd
2024-05-01 00:00:00,100.5
2024-05-01 00:30:00,300
2024-05-01 01:00:00,600
";
        let series = read_series(csv.as_bytes()).unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.extra_columns.is_empty());
        assert_eq!(series.samples[0].forecast_ppfd, Some(100.5));
        assert_eq!(
            series.samples[2].timestamp,
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn unparsable_ppfd_becomes_missing() {
        let csv = "\
timestamp,forecast_ppfd
2024-05-01 00:00:00,abc
2024-05-01 00:30:00,
2024-05-01 01:00:00,250
";
        let series = read_series(csv.as_bytes()).unwrap();
        assert_eq!(series.samples[0].forecast_ppfd, None);
        assert_eq!(series.samples[1].forecast_ppfd, None);
        assert_eq!(series.samples[2].forecast_ppfd, Some(250.0));
    }

    #[test]
    fn drops_legacy_dli_column_and_keeps_extras() {
        let csv = "\
timestamp,forecast_ppfd,DLI_chunk,cloud_cover
2024-05-01 00:00:00,120,0.22,overcast
2024-05-01 00:30:00,340,0.61,clear
";
        let series = read_series(csv.as_bytes()).unwrap();
        assert_eq!(series.extra_columns, vec!["cloud_cover".to_string()]);
        assert_eq!(series.samples[0].extras, vec!["overcast".to_string()]);
        assert_eq!(series.samples[1].extras, vec!["clear".to_string()]);
    }

    #[test]
    fn missing_ppfd_column_is_fatal() {
        let csv = "timestamp,ppfd\n2024-05-01 00:00:00,100\n";
        assert!(read_series(csv.as_bytes()).is_err());
    }

    #[test]
    fn empty_file_is_fatal() {
        let csv = "timestamp,forecast_ppfd\n";
        assert!(read_series(csv.as_bytes()).is_err());
    }

    #[test]
    fn bad_timestamp_is_fatal() {
        let csv = "timestamp,forecast_ppfd\nnot-a-date,100\n";
        assert!(read_series(csv.as_bytes()).is_err());
    }

    #[test]
    fn accepts_bare_dates_and_iso_t_separator() {
        let csv = "\
timestamp,forecast_ppfd
2024-05-01,10
2024-05-01T12:30:00,20
";
        let series = read_series(csv.as_bytes()).unwrap();
        assert_eq!(
            series.samples[0].timestamp.time(),
            chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(
            series.samples[1].timestamp.time(),
            chrono::NaiveTime::from_hms_opt(12, 30, 0).unwrap()
        );
    }
}
