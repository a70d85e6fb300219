use eframe::egui::{Color32, Grid, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::data::export;
use crate::data::filter::FilterError;
use crate::data::metrics::Metrics;
use crate::data::model::EXPORT_FILE_NAME;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar: source file, sample counts, status message.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Glasshouse – Light Forecast");
        ui.separator();
        ui.label(format!(
            "{} samples from {}",
            state.raw().len(),
            state.source_path.display()
        ));
        if let Ok(view) = &state.view {
            ui.separator();
            ui.label(format!("{} in range", view.series.len()));
        }
        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::DARK_GREEN));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – date range, metrics, export
// ---------------------------------------------------------------------------

/// Render the left control panel.  Any date change re-runs the whole
/// pipeline; on a filter error only the error text is shown.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Date range");
    ui.separator();

    let mut changed = false;
    Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("Start");
        changed |= ui
            .add(DatePickerButton::new(&mut state.start_date).id_salt("start_date"))
            .changed();
        ui.end_row();

        ui.label("End");
        changed |= ui
            .add(DatePickerButton::new(&mut state.end_date).id_salt("end_date"))
            .changed();
        ui.end_row();
    });

    if changed {
        state.status_message = None;
        state.refilter();
    }

    ui.add_space(8.0);
    ui.separator();

    match &state.view {
        Err(err) => error_label(ui, err),
        Ok(view) => {
            metrics_section(ui, &view.metrics);

            ui.add_space(8.0);
            ui.separator();

            if ui.button("Save filtered CSV…").clicked() {
                save_csv_dialog(state);
            }
        }
    }
}

fn error_label(ui: &mut Ui, err: &FilterError) {
    let color = match err {
        FilterError::InvalidRange { .. } => Color32::RED,
        FilterError::EmptyRange { .. } => Color32::from_rgb(0xb8, 0x86, 0x0b),
    };
    ui.label(RichText::new(err.to_string()).color(color).strong());
}

fn metrics_section(ui: &mut Ui, metrics: &Metrics) {
    ui.heading("Summary");
    Grid::new("summary_metrics")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("DLI total (mol/m²/day)");
            ui.strong(format!("{:.2}", metrics.dli_total));
            ui.end_row();

            ui.label("Below 200");
            ui.strong(format!("{} ({:.1}%)", metrics.low_count, metrics.low_pct));
            ui.end_row();

            ui.label("Above 500");
            ui.strong(format!("{} ({:.1}%)", metrics.high_count, metrics.high_pct));
            ui.end_row();
        });

    ui.add_space(8.0);
    ui.heading("PPFD statistics");
    Grid::new("ppfd_stats")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            let fmt = |v: Option<f64>| match v {
                Some(v) => format!("{v:.1} µmol/m²/s"),
                None => "–".to_string(),
            };
            ui.label("Mean");
            ui.strong(fmt(metrics.stats.map(|s| s.mean)));
            ui.end_row();

            ui.label("Max");
            ui.strong(fmt(metrics.stats.map(|s| s.max)));
            ui.end_row();

            ui.label("Min");
            ui.strong(fmt(metrics.stats.map(|s| s.min)));
            ui.end_row();
        });

    if metrics.stats.is_none() {
        ui.label(
            RichText::new("All values in range are missing")
                .color(Color32::from_rgb(0xb8, 0x86, 0x0b)),
        );
    }
}

// ---------------------------------------------------------------------------
// CSV export dialog
// ---------------------------------------------------------------------------

/// Ask where to save the filtered CSV and write it there.  Only reachable
/// when the current view is valid, so the export never sees an empty series.
pub fn save_csv_dialog(state: &mut AppState) {
    let Ok(view) = &state.view else {
        return;
    };

    let Some(path) = rfd::FileDialog::new()
        .set_title("Save filtered forecast")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    match export::to_csv_bytes(&view.series).and_then(|bytes| {
        std::fs::write(&path, bytes).map_err(anyhow::Error::from)
    }) {
        Ok(()) => {
            log::info!(
                "Exported {} rows to {}",
                view.series.len(),
                path.display()
            );
            state.status_message = Some(format!("Saved {}", path.display()));
        }
        Err(e) => {
            log::error!("CSV export failed: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}
