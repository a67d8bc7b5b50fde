//! Selection of the symbols that enter the screening pipeline.

use tracing::{debug, info};

use super::market_data::MarketDataProvider;
use crate::error::DataError;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedSymbol {
    pub symbol: String,
    pub last_price: f64,
    pub quote_volume_24h: f64,
}

impl RankedSymbol {
    /// Base currency, e.g. `BTC` for `BTC-USDT-SWAP`
    pub fn base(&self) -> &str {
        self.symbol.split('-').next().unwrap_or(&self.symbol)
    }
}

/// Rank live perpetuals quoted in `quote_currency` by 24h quote volume and
/// keep the `top_n` most traded.
pub async fn select_universe(
    provider: &dyn MarketDataProvider,
    quote_currency: &str,
    top_n: usize,
) -> Result<Vec<RankedSymbol>, DataError> {
    let symbols = provider.list_active_perpetual_symbols(quote_currency).await?;
    debug!(
        quote = %quote_currency,
        count = symbols.len(),
        "Universe: {} live {} perpetuals",
        symbols.len(),
        quote_currency
    );
    if symbols.is_empty() {
        return Ok(Vec::new());
    }

    let tickers = provider.fetch_tickers(&symbols).await?;
    let mut ranked: Vec<RankedSymbol> = symbols
        .iter()
        .filter_map(|symbol| {
            tickers.get(symbol).map(|ticker| RankedSymbol {
                symbol: symbol.clone(),
                last_price: ticker.last_price,
                quote_volume_24h: ticker.quote_volume_24h,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.quote_volume_24h
            .total_cmp(&a.quote_volume_24h)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    ranked.truncate(top_n);

    info!(
        top_n = top_n,
        selected = ranked.len(),
        "Universe: top {} {} perpetuals by 24h volume",
        ranked.len(),
        quote_currency
    );
    for (rank, entry) in ranked.iter().enumerate() {
        info!(
            rank = rank + 1,
            symbol = %entry.symbol,
            base = %entry.base(),
            last_price = entry.last_price,
            "{:>3}. {:<20} {:<8} {}",
            rank + 1,
            entry.symbol,
            entry.base(),
            entry.last_price
        );
    }

    Ok(ranked)
}
