mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::GlasshouseApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("forecast_result.csv"));

    // Load-once: the raw series is read before any UI exists and is never
    // mutated afterwards.  A missing file or malformed schema aborts here;
    // no partial dashboard is rendered.
    let series = match data::loader::load_csv(&path) {
        Ok(series) => {
            log::info!(
                "Loaded {} samples from {} ({} extra columns)",
                series.len(),
                path.display(),
                series.extra_columns.len()
            );
            series
        }
        Err(e) => {
            // Fatal: must reach the user even with an unconfigured logger.
            eprintln!("error: failed to load {}: {e:#}", path.display());
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Glasshouse – Light Forecast",
        options,
        Box::new(move |_cc| Ok(Box::new(GlasshouseApp::new(AppState::new(series, path))))),
    )
}
