use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

const CHART_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RealtyLensApp {
    pub state: AppState,
}

impl RealtyLensApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for RealtyLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: summary, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset().is_empty() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a dataset to explore prices  (File → Open…)");
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::summary_strip(ui, &self.state);
                    ui.separator();

                    ui.columns(2, |cols| {
                        cols[0].strong("Price dynamics by period");
                        plot::period_chart(&mut cols[0], &self.state, CHART_HEIGHT);
                        cols[1].strong("Mean price by property type");
                        plot::property_type_chart(&mut cols[1], &self.state, CHART_HEIGHT);
                    });
                    ui.separator();

                    table::records_table(ui, &mut self.state);
                });
        });
    }
}
