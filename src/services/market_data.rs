//! Market data provider interface consumed by the screening pipeline.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};

use crate::error::DataError;
use crate::models::{RawCandle, Timeframe};

/// Latest ticker figures used to rank the screening universe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticker {
    pub last_price: f64,
    /// 24h traded volume expressed in the quote currency
    pub quote_volume_24h: f64,
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get the most recent `limit` candles for a symbol, ascending by timestamp
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<RawCandle>, DataError>;

    /// Get the identifiers of live perpetual swaps quoted in `quote_currency`
    async fn list_active_perpetual_symbols(
        &self,
        quote_currency: &str,
    ) -> Result<BTreeSet<String>, DataError>;

    /// Get tickers for the given symbols; symbols without a ticker are omitted
    async fn fetch_tickers(
        &self,
        symbols: &BTreeSet<String>,
    ) -> Result<HashMap<String, Ticker>, DataError>;

    /// Get the last traded price for the given symbols
    async fn fetch_last_prices(
        &self,
        symbols: &BTreeSet<String>,
    ) -> Result<HashMap<String, f64>, DataError> {
        let tickers = self.fetch_tickers(symbols).await?;
        Ok(tickers
            .into_iter()
            .map(|(symbol, ticker)| (symbol, ticker.last_price))
            .collect())
    }
}
