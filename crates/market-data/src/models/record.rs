use serde::{Deserialize, Serialize};

/// Market cap as reported by whichever source won.
#[derive(Clone, Debug, PartialEq)]
pub enum MarketCapValue {
    /// Pre-formatted by the venue, shown verbatim.
    Display(String),
    /// Raw USD value from the price index.
    Numeric(f64),
}

/// Merged market view for one token.
///
/// Optional fields are omitted from JSON when no source supplied them; an
/// absent field means "no data", never zero. At most one of `market_cap` and
/// `market_cap_display` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMarketRecord {
    /// Address exactly as requested
    pub address: String,

    #[serde(rename = "liquidityUSD", default, skip_serializing_if = "Option::is_none")]
    pub liquidity_usd: Option<f64>,

    /// 24h volume in USD; 0 when no source answered
    #[serde(rename = "volumeUSD24h")]
    pub volume_usd_24h: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap_display: Option<String>,

    #[serde(rename = "priceChangePct24h", default, skip_serializing_if = "Option::is_none")]
    pub price_change_pct_24h: Option<f64>,
}

impl TokenMarketRecord {
    /// Record for a token no source could describe.
    pub fn empty(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            liquidity_usd: None,
            volume_usd_24h: 0.0,
            market_cap: None,
            market_cap_display: None,
            price_change_pct_24h: None,
        }
    }

    /// Assemble a record from merged field values, normalizing numbers.
    ///
    /// Non-finite or negative amounts are dropped, a non-positive market cap
    /// is dropped, a non-finite change is dropped.
    pub fn assemble(
        address: impl Into<String>,
        liquidity_usd: Option<f64>,
        volume_usd_24h: Option<f64>,
        market_cap: Option<MarketCapValue>,
        price_change_pct_24h: Option<f64>,
    ) -> Self {
        let mut record = Self::empty(address);
        record.liquidity_usd = liquidity_usd.filter(|v| v.is_finite() && *v >= 0.0);
        record.volume_usd_24h = volume_usd_24h
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0);
        match market_cap {
            Some(MarketCapValue::Display(display)) if !display.trim().is_empty() => {
                record.market_cap_display = Some(display);
            }
            Some(MarketCapValue::Numeric(value)) if value.is_finite() && value > 0.0 => {
                record.market_cap = Some(value);
            }
            _ => {}
        }
        record.price_change_pct_24h = price_change_pct_24h.filter(|v| v.is_finite());
        record
    }

    /// Whether every optional field is absent and volume is zero.
    pub fn is_empty(&self) -> bool {
        self.liquidity_usd.is_none()
            && self.volume_usd_24h == 0.0
            && self.market_cap.is_none()
            && self.market_cap_display.is_none()
            && self.price_change_pct_24h.is_none()
    }
}
