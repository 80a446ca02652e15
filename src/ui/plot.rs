use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use realty_lens::format::format_price;

use crate::color::ACCENT;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Price dynamics by period (line)
// ---------------------------------------------------------------------------

/// Mean price per period. The x axis spans the whole period domain so the
/// chart keeps its shape when a filter hides some periods.
pub fn period_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let dataset = state.dataset();
    let view = state.view();
    let periods = dataset.periods.clone();
    let currency = state.config.currency.clone();

    let points: Vec<[f64; 2]> = view
        .by_period
        .iter()
        .filter_map(|g| {
            let x = periods.iter().position(|p| *p == g.key)?;
            Some([x as f64, g.mean_price])
        })
        .collect();

    let axis_periods = periods.clone();
    Plot::new("period_chart")
        .height(height)
        .x_axis_label("Period")
        .y_axis_label("Price per m²")
        .include_y(0.0)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            axis_periods.get(idx as usize).cloned().unwrap_or_default()
        })
        .y_axis_formatter(move |mark, _range| format_price(mark.value, &currency))
        .label_formatter(move |_name, value| {
            let idx = value.x.round();
            match periods.get(idx.max(0.0) as usize) {
                Some(p) if idx >= 0.0 => format!("{p}\n{:.0}", value.y),
                _ => String::new(),
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name("Mean price")
                    .color(ACCENT)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .radius(4.0)
                    .color(ACCENT),
            );
        });
}

// ---------------------------------------------------------------------------
// Mean price by property type (bars, most expensive first)
// ---------------------------------------------------------------------------

pub fn property_type_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let view = state.view();
    let currency = state.config.currency.clone();
    let keys: Vec<String> = view.by_property_type.iter().map(|g| g.key.clone()).collect();

    let bars: Vec<Bar> = view
        .by_property_type
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.mean_price)
                .name(format!(
                    "{}\nMean: {}\nObjects: {}",
                    g.key,
                    format_price(g.mean_price, &currency),
                    g.count
                ))
                .fill(state.color_map.color_for(&g.key))
                .width(0.8)
        })
        .collect();

    let y_currency = currency.clone();
    Plot::new("property_type_chart")
        .height(height)
        .x_axis_label("Property type")
        .y_axis_label("Price per m²")
        .include_y(0.0)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            keys.get(idx as usize).cloned().unwrap_or_default()
        })
        .y_axis_formatter(move |mark, _range| format_price(mark.value, &y_currency))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Mean price by type"));
        });
}
