//! perpscan: multi-timeframe bullish alignment screener for perpetual swaps.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
pub mod sink;
pub mod strategies;
