use std::sync::Arc;

use realty_lens::config::AppConfig;
use realty_lens::data::loader::ParseReport;
use realty_lens::data::model::{Dataset, RecordField};
use realty_lens::data::source::DataSource;
use realty_lens::engine::{Coordinator, DerivedView};
use realty_lens::table::TableQuery;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Dataset, criteria and the derived view.
    pub engine: Coordinator,

    /// Records table configuration (search text, page, predicate).
    pub table: TableQuery,

    /// Colours for property-type bars.
    pub color_map: ColorMap,

    /// Where the current dataset came from.
    pub source: Option<DataSource>,

    /// Data-quality counters of the last successful load.
    pub report: Option<ParseReport>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let engine = Coordinator::new(config.missing_price);
        let table = TableQuery::new(engine.row_predicate(), config.table.page_size)
            .with_currency(config.currency.clone());
        Self {
            config,
            engine,
            table,
            color_map: ColorMap::default(),
            source: None,
            report: None,
            status_message: None,
        }
    }

    pub fn dataset(&self) -> Arc<Dataset> {
        self.engine.dataset()
    }

    pub fn view(&self) -> Arc<DerivedView> {
        self.engine.view()
    }

    /// Fetch the configured start-up source, if any.
    pub fn load_initial(&mut self) {
        match self.config.source.clone() {
            Some(location) => self.load_from(DataSource::parse(&location)),
            None => log::info!("No dataset source configured; use File → Open…"),
        }
    }

    /// Load a dataset. On failure the previous data stays on screen and the
    /// error is shown in the status line.
    pub fn load_from(&mut self, source: DataSource) {
        log::info!("Loading dataset from {source}");
        let result = source
            .fetch_text(self.config.fetch_timeout())
            .and_then(|text| self.engine.load_text(&text, &self.config.parse_options()));

        match result {
            Ok(report) => {
                self.color_map = ColorMap::new(&self.dataset().property_types);
                self.table.set_predicate(self.engine.row_predicate());
                self.status_message = (report.coerced > 0).then(|| {
                    format!("{} price values could not be read and count as 0", report.coerced)
                });
                self.report = Some(report);
                self.source = Some(source);
            }
            Err(e) => {
                log::error!("Failed to load {source}: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Change one filter criterion (`""` clears it) and keep the table's
    /// predicate in step.
    pub fn set_filter(&mut self, field: RecordField, value: impl Into<String>) {
        if self.engine.set_field(field, value) {
            self.table.set_predicate(self.engine.row_predicate());
        }
    }

    pub fn clear_filters(&mut self) {
        if self.engine.clear_criteria() {
            self.table.set_predicate(self.engine.row_predicate());
        }
    }
}
