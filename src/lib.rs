//! Filtering and aggregation engine for real-estate price observations.
//!
//! Text is parsed into a [`data::model::Dataset`], narrowed by
//! [`data::filter::FilterCriteria`] and summarised by [`engine::aggregate`].
//! [`engine::Coordinator`] ties these together and republishes a consistent
//! [`engine::DerivedView`] whenever the dataset or the criteria change.

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod format;
pub mod table;

pub use error::DataError;
