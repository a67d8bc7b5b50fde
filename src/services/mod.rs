//! External market data collaborators.

pub mod market_data;
pub mod okx;
pub mod universe;

pub use market_data::{MarketDataProvider, Ticker};
pub use okx::OkxMarketDataProvider;
pub use universe::{select_universe, RankedSymbol};
