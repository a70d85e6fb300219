use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::PpfdColorMap;
use crate::data::model::{ForecastSeries, TIMESTAMP_FORMAT};

// ---------------------------------------------------------------------------
// Filtered-data table
// ---------------------------------------------------------------------------

/// Render the filtered series as a striped table, with the PPFD column
/// background-shaded on the yellow→red gradient.
pub fn forecast_table(ui: &mut Ui, series: &ForecastSeries, color_map: &PpfdColorMap) {
    let row_height = 20.0;

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(150.0))
        .column(Column::auto().at_least(110.0));
    for _ in &series.extra_columns {
        builder = builder.column(Column::remainder().at_least(80.0));
    }

    builder
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Timestamp");
            });
            header.col(|ui| {
                ui.strong("PPFD (µmol/m²/s)");
            });
            for col in &series.extra_columns {
                let col = col.clone();
                header.col(|ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, series.len(), |mut row| {
                let sample = &series.samples[row.index()];

                row.col(|ui| {
                    ui.monospace(sample.timestamp.format(TIMESTAMP_FORMAT).to_string());
                });
                row.col(|ui| match sample.forecast_ppfd {
                    Some(v) => {
                        ui.label(
                            RichText::new(format!(" {v:.1} "))
                                .background_color(color_map.color_for(v))
                                .color(color_map.text_color_for(v)),
                        );
                    }
                    None => {
                        ui.label(RichText::new("–").color(color_map.missing()));
                    }
                });
                for cell in &sample.extras {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
