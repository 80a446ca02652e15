use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::model::{PropertyRecord, RecordField};

// ---------------------------------------------------------------------------
// Missing-price policy
// ---------------------------------------------------------------------------

/// How prices that were coerced to 0 at parse time enter the aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPricePolicy {
    /// Coerced prices count as a real price of 0.
    #[default]
    CountAsZero,
    /// Coerced prices are left out of min / max / mean. Group counts still
    /// include the record.
    Exclude,
}

impl MissingPricePolicy {
    fn price(self, record: &PropertyRecord) -> Option<f64> {
        match self {
            MissingPricePolicy::Exclude if record.price_coerced => None,
            _ => Some(record.price_per_area),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Min / max / mean of the price over a subset. All zero for an empty subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Number of prices that went into the statistics.
    pub count: usize,
}

/// Incremental mean. Never overflows for finite input, unlike sum / n.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RunningMean {
    pub(crate) mean: f64,
    pub(crate) n: usize,
}

impl RunningMean {
    pub(crate) fn push(&mut self, value: f64) {
        self.n += 1;
        self.mean += (value - self.mean) / self.n as f64;
    }
}

pub fn stats(subset: &[PropertyRecord], policy: MissingPricePolicy) -> AggregateStats {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut mean = RunningMean::default();

    for price in subset.iter().filter_map(|r| policy.price(r)) {
        min = min.min(price);
        max = max.max(price);
        mean.push(price);
    }

    if mean.n == 0 {
        return AggregateStats::default();
    }

    AggregateStats {
        min,
        max,
        mean: mean.mean,
        count: mean.n,
    }
}

// ---------------------------------------------------------------------------
// Grouped series
// ---------------------------------------------------------------------------

/// One bar / point of a grouped chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPoint {
    pub key: String,
    pub mean_price: f64,
    /// Records in the group, including any with an excluded price.
    pub count: usize,
}

pub type GroupedSeries = Vec<GroupPoint>;

#[derive(Default)]
struct Accumulator {
    price: RunningMean,
    count: usize,
}

/// Group `subset` by `field`, in first-encounter order of the keys.
pub fn group_by(
    subset: &[PropertyRecord],
    field: RecordField,
    policy: MissingPricePolicy,
) -> GroupedSeries {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Accumulator> = HashMap::new();

    for rec in subset {
        let key = rec.field(field);
        let acc = groups.entry(key).or_insert_with(|| {
            order.push(key);
            Accumulator::default()
        });
        acc.count += 1;
        if let Some(price) = policy.price(rec) {
            acc.price.push(price);
        }
    }

    order
        .into_iter()
        .map(|key| {
            let acc = &groups[key];
            GroupPoint {
                key: key.to_string(),
                mean_price: acc.price.mean,
                count: acc.count,
            }
        })
        .collect()
}

/// Mean price per period, ordered like `periods` (the dataset's period
/// domain). Keys missing from `periods` go last, in encounter order.
pub fn by_period(
    subset: &[PropertyRecord],
    periods: &[String],
    policy: MissingPricePolicy,
) -> GroupedSeries {
    let position: HashMap<&str, usize> = periods
        .iter()
        .enumerate()
        .map(|(i, p)| (p.as_str(), i))
        .collect();

    let mut series = group_by(subset, RecordField::Period, policy);
    series.sort_by_key(|g| position.get(g.key.as_str()).copied().unwrap_or(usize::MAX));
    series
}

/// Mean price per property type, most expensive first. Ties keep
/// encounter order.
pub fn by_property_type(subset: &[PropertyRecord], policy: MissingPricePolicy) -> GroupedSeries {
    let mut series = group_by(subset, RecordField::PropertyType, policy);
    series.sort_by(|a, b| b.mean_price.total_cmp(&a.mean_price));
    series
}
