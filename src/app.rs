use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GlasshouseApp {
    pub state: AppState,
}

impl GlasshouseApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GlasshouseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: toolbar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: date range + metrics + export ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart above, table below ----
        egui::CentralPanel::default().show(ctx, |ui| match &self.state.view {
            Err(_) => {
                // The side panel carries the error text; keep the canvas calm.
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Adjust the date range to see the forecast");
                });
            }
            Ok(view) => {
                let plot_height = ui.available_height() * 0.55;
                ui.allocate_ui(
                    egui::vec2(ui.available_width(), plot_height),
                    |ui: &mut egui::Ui| {
                        plot::forecast_plot(ui, &view.series);
                    },
                );
                ui.separator();
                table::forecast_table(ui, &view.series, &view.color_map);
            }
        });
    }
}
