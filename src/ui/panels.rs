use eframe::egui::{self, Color32, RichText, Ui};

use realty_lens::data::model::RecordField;
use realty_lens::data::source::DataSource;
use realty_lens::format::format_price;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = state.dataset();
    if dataset.is_empty() {
        ui.label("No dataset loaded.");
        return;
    }

    for field in RecordField::ALL {
        let current = state.engine.criteria().get(field).unwrap_or("").to_string();
        let mut selected = current.clone();

        ui.strong(field.label());
        egui::ComboBox::from_id_salt(field.label())
            .width(ui.available_width())
            .selected_text(if current.is_empty() { "All" } else { current.as_str() })
            .show_ui(ui, |ui: &mut Ui| {
                ui.selectable_value(&mut selected, String::new(), "All");
                for value in dataset.distinct_values(field) {
                    ui.selectable_value(&mut selected, value.clone(), value.as_str());
                }
            });
        ui.add_space(6.0);

        if selected != current {
            state.set_filter(field, selected);
        }
    }

    ui.separator();
    if ui.button("Reset filters").clicked() {
        state.clear_filters();
    }
}

// ---------------------------------------------------------------------------
// Summary strip – mean / min / max of the filtered subset
// ---------------------------------------------------------------------------

pub fn summary_strip(ui: &mut Ui, state: &AppState) {
    let view = state.view();
    let currency = &state.config.currency;

    ui.horizontal(|ui: &mut Ui| {
        for (label, value) in [
            ("Average price per m²", view.stats.mean),
            ("Minimum", view.stats.min),
            ("Maximum", view.stats.max),
        ] {
            ui.group(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.label(label);
                    ui.label(RichText::new(format_price(value, currency)).heading().strong());
                });
            });
        }
        ui.label(format!("{} records", view.subset.len()));
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let dataset = state.dataset();
        if !dataset.is_empty() {
            ui.label(format!(
                "{} records loaded, {} visible",
                dataset.len(),
                state.view().subset.len()
            ));
        }
        if let Some(source) = &state.source {
            ui.label(RichText::new(source.to_string()).weak());
        }
        if let Some(report) = &state.report {
            if !report.missing_columns.is_empty() {
                ui.separator();
                ui.label(
                    RichText::new(format!("Missing columns: {}", report.missing_columns.join(", ")))
                        .color(Color32::YELLOW),
                );
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open price dataset")
        .add_filter("Delimited text", &["csv", "txt", "tsv"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(DataSource::File(path));
    }
}
