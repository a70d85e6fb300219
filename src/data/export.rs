use anyhow::{Context, Result};

use super::model::{ForecastSeries, PPFD_COLUMN, TIMESTAMP_FORMAT};

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Serialize a filtered series to CSV bytes (UTF-8) for download.
///
/// Column layout mirrors the input minus the dropped legacy column: the
/// timestamp leads, then `forecast_ppfd` (empty cell for a missing value),
/// then any extra columns in their original order.  Nothing is written to
/// disk here; the caller owns the byte payload.
pub fn to_csv_bytes(series: &ForecastSeries) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["timestamp".to_string(), PPFD_COLUMN.to_string()];
    header.extend(series.extra_columns.iter().cloned());
    writer.write_record(&header).context("writing CSV header")?;

    for sample in &series.samples {
        let mut record = Vec::with_capacity(2 + sample.extras.len());
        record.push(sample.timestamp.format(TIMESTAMP_FORMAT).to_string());
        record.push(
            sample
                .forecast_ppfd
                .map(|v| v.to_string())
                .unwrap_or_default(),
        );
        record.extend(sample.extras.iter().cloned());
        writer.write_record(&record).context("writing CSV row")?;
    }

    writer.flush().context("flushing CSV output")?;
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("finishing CSV output: {e}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_series;
    use crate::data::model::Sample;
    use chrono::NaiveDate;

    fn sample(day: u32, hour: u32, ppfd: Option<f64>, extras: &[&str]) -> Sample {
        Sample {
            timestamp: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(hour, 30, 0)
                .unwrap(),
            forecast_ppfd: ppfd,
            extras: extras.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn writes_timestamp_first_and_blank_for_missing() {
        let series = ForecastSeries {
            samples: vec![sample(1, 8, Some(123.5), &[]), sample(1, 9, None, &[])],
            extra_columns: Vec::new(),
        };
        let bytes = to_csv_bytes(&series).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("timestamp,forecast_ppfd"));
        assert_eq!(lines.next(), Some("2024-05-01 08:30:00,123.5"));
        assert_eq!(lines.next(), Some("2024-05-01 09:30:00,"));
    }

    #[test]
    fn round_trips_through_the_loader() {
        let series = ForecastSeries {
            samples: vec![
                sample(1, 8, Some(120.0), &["clear", "7"]),
                sample(1, 9, None, &["overcast", "8"]),
                sample(2, 10, Some(640.25), &["clear", "9"]),
            ],
            extra_columns: vec!["sky".to_string(), "run_id".to_string()],
        };
        let bytes = to_csv_bytes(&series).unwrap();
        let reloaded = read_series(bytes.as_slice()).unwrap();
        assert_eq!(reloaded, series);
    }
}
