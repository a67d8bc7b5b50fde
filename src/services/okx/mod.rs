//! OKX v5 REST market data adapter

pub mod client;
pub mod messages;
pub mod provider;

pub use client::OkxRestClient;
pub use provider::{okx_bar, OkxMarketDataProvider, MAX_CANDLE_LIMIT};
