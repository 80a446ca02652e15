use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use realty_lens::format::format_price;

use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Records table (search + pagination + footer mean)
// ---------------------------------------------------------------------------

pub fn records_table(ui: &mut Ui, state: &mut AppState) {
    let dataset = state.dataset();

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Search:");
        let mut search = state.table.search().to_string();
        if ui.text_edit_singleline(&mut search).changed() {
            state.table.set_search(search);
        }
    });

    let page = state.table.run(&dataset.records);
    let currency = &state.config.currency;

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(160.0))
        .column(Column::remainder().at_least(120.0))
        .header(ROW_HEIGHT, |mut header| {
            for title in ["Period", "District", "Property type", "Price per m²"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for rec in &page.rows {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.period.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.district.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(rec.property_type.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format_price(rec.price_per_area, currency));
                    });
                });
            }
            body.row(ROW_HEIGHT, |mut row| {
                row.col(|ui: &mut Ui| {
                    ui.strong("Average:");
                });
                row.col(|_ui: &mut Ui| {});
                row.col(|_ui: &mut Ui| {});
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(format_price(page.footer_mean, currency)).strong());
                });
            });
        });

    ui.horizontal(|ui: &mut Ui| {
        let current = page.page;
        if ui
            .add_enabled(current > 0, egui::Button::new("◀ Previous"))
            .clicked()
        {
            state.table.set_page(current - 1);
        }
        ui.label(format!(
            "Page {} of {} ({} rows)",
            current + 1,
            page.page_count,
            page.matching
        ));
        if ui
            .add_enabled(current + 1 < page.page_count, egui::Button::new("Next ▶"))
            .clicked()
        {
            state.table.set_page(current + 1);
        }
    });
}
