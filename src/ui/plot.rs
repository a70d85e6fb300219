use chrono::DateTime;
use eframe::egui::{Color32, Ui};
use egui_plot::{HLine, Legend, Line, LineStyle, Plot, PlotPoints, Points};

use crate::data::model::{ForecastSeries, HIGH_PPFD_THRESHOLD, LOW_PPFD_THRESHOLD};

const TRACE_COLOR: Color32 = Color32::from_rgb(0xd6, 0x28, 0x28);

// ---------------------------------------------------------------------------
// Forecast plot (central panel)
// ---------------------------------------------------------------------------

/// Render the PPFD time-series chart with the two threshold reference lines.
pub fn forecast_plot(ui: &mut Ui, series: &ForecastSeries) {
    let segments = line_segments(series);
    let markers: Vec<[f64; 2]> = segments.iter().flatten().copied().collect();

    Plot::new("forecast_plot")
        .legend(Legend::default())
        .x_axis_label("Time")
        .y_axis_label("PPFD (µmol/m²/s)")
        .x_axis_formatter(|mark, _range| format_timestamp(mark.value, "%m-%d\n%H:%M"))
        .label_formatter(|name, value| {
            let ts = format_timestamp(value.x, "%Y-%m-%d %H:%M");
            if name.is_empty() {
                format!("{ts}\n{:.1} µmol/m²/s", value.y)
            } else {
                format!("{name}\n{ts}\n{:.1} µmol/m²/s", value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.hline(
                HLine::new(LOW_PPFD_THRESHOLD)
                    .name("Low threshold (200)")
                    .color(Color32::BLUE)
                    .style(LineStyle::dashed_loose()),
            );
            plot_ui.hline(
                HLine::new(HIGH_PPFD_THRESHOLD)
                    .name("High threshold (500)")
                    .color(Color32::ORANGE)
                    .style(LineStyle::dashed_loose()),
            );

            // One logical trace, split so missing values show as gaps.
            for (i, segment) in segments.iter().enumerate() {
                let points: PlotPoints = segment.iter().copied().collect();
                let mut line = Line::new(points).color(TRACE_COLOR).width(2.0);
                if i == 0 {
                    line = line.name("PPFD forecast");
                }
                plot_ui.line(line);
            }

            let marker_points: PlotPoints = markers.into_iter().collect();
            plot_ui.points(Points::new(marker_points).color(TRACE_COLOR).radius(2.0));
        });
}

/// Break the series into contiguous runs of present values; a missing value
/// ends the current run so the chart shows a gap there.
fn line_segments(series: &ForecastSeries) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for sample in &series.samples {
        match sample.forecast_ppfd {
            Some(v) => current.push([sample.timestamp.and_utc().timestamp() as f64, v]),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn format_timestamp(epoch_secs: f64, fmt: &str) -> String {
    DateTime::from_timestamp(epoch_secs as i64, 0)
        .map(|dt| dt.naive_utc().format(fmt).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Sample;
    use chrono::NaiveDate;

    fn series(values: &[Option<f64>]) -> ForecastSeries {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        ForecastSeries {
            samples: values
                .iter()
                .enumerate()
                .map(|(i, &v)| Sample {
                    timestamp: start + chrono::Duration::minutes(30 * i as i64),
                    forecast_ppfd: v,
                    extras: Vec::new(),
                })
                .collect(),
            extra_columns: Vec::new(),
        }
    }

    #[test]
    fn missing_values_split_the_trace() {
        let segments = line_segments(&series(&[
            Some(1.0),
            Some(2.0),
            None,
            Some(3.0),
            None,
            None,
            Some(4.0),
        ]));
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].len(), 2);
        assert_eq!(segments[1].len(), 1);
        assert_eq!(segments[2].len(), 1);
    }

    #[test]
    fn all_missing_yields_no_segments() {
        assert!(line_segments(&series(&[None, None])).is_empty());
    }
}
