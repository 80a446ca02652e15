use std::sync::Arc;

use serde::Serialize;

use super::aggregate::{self, AggregateStats, GroupedSeries, MissingPricePolicy};
use crate::data::filter::{self, CriteriaPatch, FilterCriteria, RowPredicate};
use crate::data::loader::{self, ParseOptions, ParseReport};
use crate::data::model::{Dataset, PropertyRecord, RecordField};
use crate::error::Result;

// ---------------------------------------------------------------------------
// Derived bundle
// ---------------------------------------------------------------------------

/// Everything derived from one (dataset, criteria) pair. Published as a
/// whole, so readers never see a subset from one selection next to
/// statistics from another.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedView {
    /// Bumped on every recomputation.
    pub generation: u64,
    pub criteria: FilterCriteria,
    pub subset: Vec<PropertyRecord>,
    pub stats: AggregateStats,
    pub by_period: GroupedSeries,
    pub by_property_type: GroupedSeries,
}

type Observer = Box<dyn FnMut(&DerivedView)>;

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Owns the canonical dataset and the current criteria, and keeps the
/// derived view in sync with both.
pub struct Coordinator {
    dataset: Arc<Dataset>,
    criteria: FilterCriteria,
    policy: MissingPricePolicy,
    view: Arc<DerivedView>,
    observers: Vec<Observer>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(MissingPricePolicy::default())
    }
}

impl Coordinator {
    pub fn new(policy: MissingPricePolicy) -> Self {
        Self {
            dataset: Arc::new(Dataset::default()),
            criteria: FilterCriteria::default(),
            policy,
            view: Arc::new(DerivedView::default()),
            observers: Vec::new(),
        }
    }

    // ---- read surface ----

    pub fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }

    /// Latest derived bundle.
    pub fn view(&self) -> Arc<DerivedView> {
        Arc::clone(&self.view)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn policy(&self) -> MissingPricePolicy {
        self.policy
    }

    /// Predicate for row-level consumers, consistent with the current view.
    pub fn row_predicate(&self) -> RowPredicate {
        RowPredicate::new(self.criteria.clone())
    }

    /// Register a callback run after every recomputation, in registration
    /// order.
    pub fn subscribe(&mut self, observer: impl FnMut(&DerivedView) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ---- loading ----

    /// Parse `text` and, on success, replace the dataset wholesale. On
    /// failure nothing changes.
    pub fn load_text(&mut self, text: &str, options: &ParseOptions) -> Result<ParseReport> {
        let outcome = loader::parse_text(text, options)?;
        log::info!(
            "Loaded {} records: {} periods, {} districts, {} property types",
            outcome.dataset.len(),
            outcome.dataset.periods.len(),
            outcome.dataset.districts.len(),
            outcome.dataset.property_types.len()
        );
        self.replace_dataset(outcome.dataset);
        Ok(outcome.report)
    }

    /// Install a fresh dataset. Criteria that no longer name an existing
    /// value are kept as-is; they simply match nothing.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = Arc::new(dataset);
        self.recompute();
    }

    // ---- criteria ----

    /// Apply a partial criteria update; recomputes only on a real change.
    pub fn set_criteria(&mut self, patch: CriteriaPatch) -> bool {
        let changed = self.criteria.apply_patch(patch);
        if changed {
            self.recompute();
        }
        changed
    }

    /// Set or (with `""`) clear one criterion.
    pub fn set_field(&mut self, field: RecordField, value: impl Into<String>) -> bool {
        let value = value.into();
        let patch = match field {
            RecordField::Period => CriteriaPatch::default().period(value),
            RecordField::District => CriteriaPatch::default().district(value),
            RecordField::PropertyType => CriteriaPatch::default().property_type(value),
        };
        self.set_criteria(patch)
    }

    pub fn set_period(&mut self, value: impl Into<String>) -> bool {
        self.set_field(RecordField::Period, value)
    }

    pub fn set_district(&mut self, value: impl Into<String>) -> bool {
        self.set_field(RecordField::District, value)
    }

    pub fn set_property_type(&mut self, value: impl Into<String>) -> bool {
        self.set_field(RecordField::PropertyType, value)
    }

    pub fn clear_criteria(&mut self) -> bool {
        self.set_criteria(CriteriaPatch::default().period("").district("").property_type(""))
    }

    /// subset → stats → by-period → by-type, then swap the bundle in.
    fn recompute(&mut self) {
        let subset = filter::apply(&self.dataset, &self.criteria);
        let stats = aggregate::stats(&subset, self.policy);
        let by_period = aggregate::by_period(&subset, &self.dataset.periods, self.policy);
        let by_property_type = aggregate::by_property_type(&subset, self.policy);

        let view = DerivedView {
            generation: self.view.generation + 1,
            criteria: self.criteria.clone(),
            subset,
            stats,
            by_period,
            by_property_type,
        };
        log::debug!(
            "Recomputed view #{}: {} of {} records match {:?}",
            view.generation,
            view.subset.len(),
            self.dataset.len(),
            view.criteria
        );
        self.view = Arc::new(view);

        for observer in &mut self.observers {
            observer(&self.view);
        }
    }
}
