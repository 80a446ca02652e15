use serde::{Deserialize, Serialize};

use super::model::{Dataset, PropertyRecord, RecordField};

// ---------------------------------------------------------------------------
// Filter criteria: one optional equality constraint per field
// ---------------------------------------------------------------------------

/// Current filter selection. `None` means "no restriction on this field".
///
/// Setters treat an empty string as `None`, so "match the empty string" can
/// never be expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub period: Option<String>,
    pub district: Option<String>,
    pub property_type: Option<String>,
}

/// Partial criteria update. `None` leaves a field untouched, `Some("")`
/// clears it, `Some(value)` sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaPatch {
    pub period: Option<String>,
    pub district: Option<String>,
    pub property_type: Option<String>,
}

impl CriteriaPatch {
    pub fn period(mut self, value: impl Into<String>) -> Self {
        self.period = Some(value.into());
        self
    }

    pub fn district(mut self, value: impl Into<String>) -> Self {
        self.district = Some(value.into());
        self
    }

    pub fn property_type(mut self, value: impl Into<String>) -> Self {
        self.property_type = Some(value.into());
        self
    }
}

fn normalize(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl FilterCriteria {
    /// Criterion for `field`, if any.
    pub fn get(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::Period => self.period.as_deref(),
            RecordField::District => self.district.as_deref(),
            RecordField::PropertyType => self.property_type.as_deref(),
        }
    }

    /// Set (or with `""`, clear) the criterion for `field`.
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let slot = match field {
            RecordField::Period => &mut self.period,
            RecordField::District => &mut self.district,
            RecordField::PropertyType => &mut self.property_type,
        };
        *slot = normalize(value);
    }

    /// Apply a partial update. Returns whether anything changed.
    pub fn apply_patch(&mut self, patch: CriteriaPatch) -> bool {
        let before = self.clone();
        if let Some(v) = patch.period {
            self.set(RecordField::Period, v);
        }
        if let Some(v) = patch.district {
            self.set(RecordField::District, v);
        }
        if let Some(v) = patch.property_type {
            self.set(RecordField::PropertyType, v);
        }
        *self != before
    }

    /// No criterion is set: every record passes.
    pub fn is_empty(&self) -> bool {
        RecordField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// A record passes when, for every field, the criterion is absent or
    /// equals the record's value exactly (case-sensitive).
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        RecordField::ALL.iter().all(|&field| match self.get(field) {
            None | Some("") => true,
            Some(wanted) => record.field(field) == wanted,
        })
    }
}

/// Return indices of records that pass all active criteria.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Return the records that pass all active criteria, in dataset order.
pub fn apply(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<PropertyRecord> {
    if criteria.is_empty() {
        return dataset.records.clone();
    }
    dataset
        .records
        .iter()
        .filter(|rec| criteria.matches(rec))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Row predicate handed to the table view
// ---------------------------------------------------------------------------

/// Snapshot of the criteria used by row-level consumers (the table) so
/// their filtering stays consistent with the charts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowPredicate {
    criteria: FilterCriteria,
}

impl RowPredicate {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self { criteria }
    }

    pub fn test(&self, record: &PropertyRecord) -> bool {
        self.criteria.matches(record)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            PropertyRecord::new("2024-01", "A", "flat", 50000.5),
            PropertyRecord::new("2024-01", "B", "house", 70000.0),
            PropertyRecord::new("2024-02", "A", "flat", 60000.0),
            PropertyRecord::new("2024-02", "a", "house", 10.0),
        ])
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let ds = sample();
        assert_eq!(apply(&ds, &FilterCriteria::default()), ds.records);
        assert_eq!(filtered_indices(&ds, &FilterCriteria::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_single_criterion_exact_and_case_sensitive() {
        let ds = sample();
        let mut c = FilterCriteria::default();
        c.set(RecordField::District, "A");

        let subset = apply(&ds, &c);
        assert_eq!(subset.len(), 2);
        assert!(subset.iter().all(|r| r.district == "A"));
        assert_eq!(filtered_indices(&ds, &c), vec![0, 2]);
    }

    #[test]
    fn test_compound_criteria() {
        let ds = sample();
        let mut c = FilterCriteria::default();
        c.apply_patch(CriteriaPatch::default().period("2024-02").property_type("house"));

        let subset = apply(&ds, &c);
        assert_eq!(subset, vec![ds.records[3].clone()]);
    }

    #[test]
    fn test_every_passing_record_matches_each_criterion() {
        let ds = sample();
        for period in ds.periods.iter().chain([&String::new()]) {
            for district in ds.districts.iter().chain([&String::new()]) {
                let mut c = FilterCriteria::default();
                c.set(RecordField::Period, period.clone());
                c.set(RecordField::District, district.clone());
                for rec in apply(&ds, &c) {
                    for field in RecordField::ALL {
                        if let Some(want) = c.get(field) {
                            assert_eq!(rec.field(field), want);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_string_clears_criterion() {
        let mut c = FilterCriteria::default();
        c.set(RecordField::Period, "2024-01");
        assert!(!c.is_empty());

        assert!(c.apply_patch(CriteriaPatch::default().period("")));
        assert!(c.is_empty());
        assert_eq!(c.period, None);
    }

    #[test]
    fn test_patch_reports_change() {
        let mut c = FilterCriteria::default();
        assert!(c.apply_patch(CriteriaPatch::default().district("A")));
        assert!(!c.apply_patch(CriteriaPatch::default().district("A")));
        assert!(!c.apply_patch(CriteriaPatch::default()));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let ds = sample();
        let mut c = FilterCriteria::default();
        c.set(RecordField::PropertyType, "flat");
        assert_eq!(apply(&ds, &c), apply(&ds, &c));
    }

    #[test]
    fn test_row_predicate_agrees_with_apply() {
        let ds = sample();
        let mut c = FilterCriteria::default();
        c.set(RecordField::District, "B");
        let pred = RowPredicate::new(c.clone());

        let via_pred: Vec<_> = ds.records.iter().filter(|r| pred.test(r)).cloned().collect();
        assert_eq!(via_pred, apply(&ds, &c));
    }
}
