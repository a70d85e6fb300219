use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::ForecastSeries;

// ---------------------------------------------------------------------------
// PPFD colour gradient (table shading)
// ---------------------------------------------------------------------------

/// Maps PPFD values onto a yellow→orange→red gradient, scaled to the value
/// range of the visible series.  Used to shade the table's PPFD column.
#[derive(Debug, Clone, Copy)]
pub struct PpfdColorMap {
    min: f64,
    max: f64,
}

impl PpfdColorMap {
    /// Build a colour map from the non-missing values of a series.  A series
    /// with no values (or a single distinct value) gets a degenerate range so
    /// every cell maps to the low end of the gradient.
    pub fn from_series(series: &ForecastSeries) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in series.samples.iter().filter_map(|s| s.forecast_ppfd) {
            min = min.min(v);
            max = max.max(v);
        }
        if !min.is_finite() || !max.is_finite() {
            return PpfdColorMap { min: 0.0, max: 1.0 };
        }
        PpfdColorMap { min, max }
    }

    fn t(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            0.0
        } else {
            ((value - self.min) / range).clamp(0.0, 1.0)
        }
    }

    /// Background colour for a PPFD cell: pale yellow at the low end through
    /// orange to dark red at the high end.
    pub fn color_for(&self, value: f64) -> Color32 {
        let t = self.t(value) as f32;
        let hue = 55.0 - 55.0 * t;
        let lightness = 0.82 - 0.47 * t;
        let hsl = Hsl::new(hue, 0.85, lightness);
        let rgb: Srgb = hsl.into_color();
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }

    /// Text colour that stays readable on [`Self::color_for`]'s background.
    pub fn text_color_for(&self, value: f64) -> Color32 {
        if self.t(value) > 0.55 {
            Color32::WHITE
        } else {
            Color32::BLACK
        }
    }

    /// Neutral colour for a missing-value cell.
    pub fn missing(&self) -> Color32 {
        Color32::GRAY
    }
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
    fn endpoints_get_distinct_colours() {
        let map = PpfdColorMap::from_series(&series(&[Some(0.0), Some(800.0)]));
        assert_ne!(map.color_for(0.0), map.color_for(800.0));
    }

    #[test]
    fn all_missing_does_not_panic() {
        let map = PpfdColorMap::from_series(&series(&[None, None]));
        let _ = map.color_for(123.0);
    }

    #[test]
    fn constant_series_maps_to_low_end() {
        let constant = PpfdColorMap::from_series(&series(&[Some(300.0), Some(300.0)]));
        let spread = PpfdColorMap::from_series(&series(&[Some(300.0), Some(900.0)]));
        // A degenerate range pins every cell to the pale-yellow end of the
        // gradient, the same colour a spread series gives its minimum.
        assert_eq!(constant.color_for(300.0), spread.color_for(300.0));
        assert_ne!(constant.color_for(300.0), spread.color_for(900.0));
    }
}
