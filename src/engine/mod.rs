//! Derived values over the filtered subset.
//!
//! `aggregate` holds the pure statistics / grouping functions, `coordinator`
//! owns the dataset + criteria and republishes a consistent [`DerivedView`]
//! whenever either changes.

pub mod aggregate;
pub mod coordinator;

pub use aggregate::{AggregateStats, GroupPoint, GroupedSeries, MissingPricePolicy};
pub use coordinator::{Coordinator, DerivedView};
