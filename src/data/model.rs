use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RecordField – the three enumerated string fields
// ---------------------------------------------------------------------------

/// A filterable / groupable field of a [`PropertyRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Period,
    District,
    PropertyType,
}

impl RecordField {
    pub const ALL: [RecordField; 3] = [
        RecordField::Period,
        RecordField::District,
        RecordField::PropertyType,
    ];

    /// Human readable label used in the UI.
    pub fn label(self) -> &'static str {
        match self {
            RecordField::Period => "Period",
            RecordField::District => "District",
            RecordField::PropertyType => "Property type",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PropertyRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single price observation. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Period label, e.g. `2024-03`. Also the chronological grouping key.
    pub period: String,
    pub district: String,
    pub property_type: String,
    /// Average price per square metre. Never negative, never NaN.
    pub price_per_area: f64,
    /// Set when the source value could not be parsed and was replaced by 0.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub price_coerced: bool,
}

impl PropertyRecord {
    pub fn new(
        period: impl Into<String>,
        district: impl Into<String>,
        property_type: impl Into<String>,
        price_per_area: f64,
    ) -> Self {
        Self {
            period: period.into(),
            district: district.into(),
            property_type: property_type.into(),
            price_per_area,
            price_coerced: false,
        }
    }

    /// Value of one of the enumerated string fields.
    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Period => &self.period,
            RecordField::District => &self.district,
            RecordField::PropertyType => &self.property_type,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct values per field.
///
/// Built once per load and replaced wholesale on reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// All records in source order.
    pub records: Vec<PropertyRecord>,
    /// Sorted distinct districts.
    pub districts: Vec<String>,
    /// Sorted distinct property types.
    pub property_types: Vec<String>,
    /// Sorted distinct periods.
    pub periods: Vec<String>,
}

impl Dataset {
    /// Derive the distinct value lists from the loaded records.
    pub fn from_records(records: Vec<PropertyRecord>) -> Self {
        let mut districts = BTreeSet::new();
        let mut property_types = BTreeSet::new();
        let mut periods = BTreeSet::new();

        for rec in &records {
            districts.insert(rec.district.clone());
            property_types.insert(rec.property_type.clone());
            periods.insert(rec.period.clone());
        }

        Dataset {
            records,
            districts: districts.into_iter().collect(),
            property_types: property_types.into_iter().collect(),
            periods: periods.into_iter().collect(),
        }
    }

    /// Distinct values of `field`, ascending.
    pub fn distinct_values(&self, field: RecordField) -> &[String] {
        match field {
            RecordField::Period => &self.periods,
            RecordField::District => &self.districts,
            RecordField::PropertyType => &self.property_types,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_values_sorted_and_deduplicated() {
        let ds = Dataset::from_records(vec![
            PropertyRecord::new("2024-02", "Ленинский", "flat", 1.0),
            PropertyRecord::new("2024-01", "Октябрьский", "house", 2.0),
            PropertyRecord::new("2024-02", "Ленинский", "flat", 3.0),
        ]);

        assert_eq!(ds.periods, vec!["2024-01", "2024-02"]);
        assert_eq!(ds.districts, vec!["Ленинский", "Октябрьский"]);
        assert_eq!(ds.distinct_values(RecordField::PropertyType), ["flat", "house"]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn test_field_accessor() {
        let rec = PropertyRecord::new("2024-01", "A", "flat", 10.0);
        assert_eq!(rec.field(RecordField::Period), "2024-01");
        assert_eq!(rec.field(RecordField::District), "A");
        assert_eq!(rec.field(RecordField::PropertyType), "flat");
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert!(ds.distinct_values(RecordField::District).is_empty());
    }
}
