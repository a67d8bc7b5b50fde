//! Shared data models spanning the screening layers.

pub mod candle;
pub mod indicators;
pub mod screening;
pub mod series;
pub mod strategy;
pub mod timeframe;

pub use candle::{Candle, RawCandle};
pub use indicators::{IndicatorColumn, IndicatorSnapshot};
pub use screening::{quorum_reached, FailureKind, ScreeningResult, TimeframeVerdict};
pub use series::{EnrichedSeries, ValidatedSeries};
pub use strategy::{Comparison, Condition, ConditionOutcome, Operand};
pub use timeframe::Timeframe;
