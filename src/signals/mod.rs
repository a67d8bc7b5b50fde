//! Per-symbol screening decisions.

pub mod aggregation;

pub use aggregation::ScreeningAggregator;
