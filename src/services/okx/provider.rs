//! OKX market data provider implementation

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::client::OkxRestClient;
use super::messages::{CandleRow, Instrument, TickerData};
use crate::error::DataError;
use crate::models::{RawCandle, Timeframe};
use crate::services::market_data::{MarketDataProvider, Ticker};

const INSTRUMENTS_PATH: &str = "/api/v5/public/instruments";
const TICKERS_PATH: &str = "/api/v5/market/tickers";
const CANDLES_PATH: &str = "/api/v5/market/candles";
const SWAP: &str = "SWAP";
/// Largest page the candles endpoint serves
pub const MAX_CANDLE_LIMIT: usize = 300;

/// OKX `bar` parameter for a timeframe
pub fn okx_bar(timeframe: Timeframe) -> &'static str {
    match timeframe {
        Timeframe::Day1 => "1D",
        Timeframe::Hour4 => "4H",
        Timeframe::Hour1 => "1H",
        Timeframe::Min15 => "15m",
    }
}

pub struct OkxMarketDataProvider {
    client: Arc<OkxRestClient>,
}

impl OkxMarketDataProvider {
    pub fn new(base_url: Url, request_timeout: Duration) -> Result<Self, DataError> {
        Ok(Self::with_client(Arc::new(OkxRestClient::new(
            base_url,
            request_timeout,
        )?)))
    }

    pub fn with_client(client: Arc<OkxRestClient>) -> Self {
        Self { client }
    }
}

fn parse_candle_row(row: CandleRow) -> Result<RawCandle, DataError> {
    let mut fields = row.into_iter();
    let mut next = |name: &str| {
        fields
            .next()
            .ok_or_else(|| DataError::Decode(format!("candle row missing {}", name)))
    };
    Ok(RawCandle::new(
        next("ts")?,
        next("open")?,
        next("high")?,
        next("low")?,
        next("close")?,
        next("volume")?,
    ))
}

#[async_trait]
impl MarketDataProvider for OkxMarketDataProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<RawCandle>, DataError> {
        let limit = limit.min(MAX_CANDLE_LIMIT);
        let rows: Vec<CandleRow> = self
            .client
            .get(
                CANDLES_PATH,
                &[
                    ("instId", symbol.to_string()),
                    ("bar", okx_bar(timeframe).to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        debug!(
            symbol = %symbol,
            timeframe = %timeframe,
            count = rows.len(),
            "OKX: fetched {} {} candles for {}",
            rows.len(),
            timeframe,
            symbol
        );

        // OKX returns newest first
        let mut candles = rows
            .into_iter()
            .map(parse_candle_row)
            .collect::<Result<Vec<_>, _>>()?;
        candles.reverse();
        Ok(candles)
    }

    async fn list_active_perpetual_symbols(
        &self,
        quote_currency: &str,
    ) -> Result<BTreeSet<String>, DataError> {
        let instruments: Vec<Instrument> = self
            .client
            .get(INSTRUMENTS_PATH, &[("instType", SWAP.to_string())])
            .await?;

        Ok(instruments
            .into_iter()
            .filter(|inst| inst.is_live() && inst.quote_ccy() == Some(quote_currency))
            .map(|inst| inst.inst_id)
            .collect())
    }

    async fn fetch_tickers(
        &self,
        symbols: &BTreeSet<String>,
    ) -> Result<HashMap<String, Ticker>, DataError> {
        let tickers: Vec<TickerData> = self
            .client
            .get(TICKERS_PATH, &[("instType", SWAP.to_string())])
            .await?;

        let mut result = HashMap::new();
        for ticker in tickers {
            if !symbols.contains(&ticker.inst_id) {
                continue;
            }
            // Tickers without a last trade are skipped rather than failing the batch
            let Ok(last_price) = ticker.last.parse::<f64>() else {
                debug!(symbol = %ticker.inst_id, "OKX: ticker without last price");
                continue;
            };
            let base_volume = ticker.vol_ccy_24h.parse::<f64>().unwrap_or(0.0);
            result.insert(
                ticker.inst_id,
                Ticker {
                    last_price,
                    quote_volume_24h: base_volume * last_price,
                },
            );
        }
        Ok(result)
    }
}
