//! OKX v5 REST payloads

use serde::Deserialize;

/// Envelope wrapping every OKX REST response
#[derive(Debug, Clone, Deserialize)]
pub struct OkxResponse<T> {
    pub code: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub inst_id: String,
    #[serde(default)]
    pub inst_type: String,
    #[serde(default)]
    pub settle_ccy: String,
    #[serde(default)]
    pub uly: String,
    #[serde(default)]
    pub inst_family: String,
    #[serde(default)]
    pub state: String,
}

impl Instrument {
    pub fn is_live(&self) -> bool {
        self.state == "live"
    }

    /// Quote currency taken from the underlying, e.g. `USDT` for `BTC-USDT`
    pub fn quote_ccy(&self) -> Option<&str> {
        let underlying = if self.inst_family.is_empty() {
            &self.uly
        } else {
            &self.inst_family
        };
        underlying.split('-').nth(1)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TickerData {
    #[serde(rename = "instId")]
    pub inst_id: String,
    #[serde(default)]
    pub last: String,
    /// 24h volume in base currency for derivatives
    #[serde(rename = "volCcy24h", default)]
    pub vol_ccy_24h: String,
}

/// `[ts, o, h, l, c, vol, volCcy, volCcyQuote, confirm]`, newest first
pub type CandleRow = Vec<String>;
