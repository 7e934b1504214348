use serde::{Deserialize, Serialize};

/// The kinds of lookup a provider can serve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Venue-specific pool liquidity in USD.
    Liquidity,
    /// Venue-formatted market cap string (e.g. "$472B").
    MarketCapDisplay,
    /// Price-index statistics: volume, market cap, 24h change.
    TokenStats,
    /// Conventional market quote by ticker.
    TickerQuote,
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Liquidity => write!(f, "liquidity"),
            Self::MarketCapDisplay => write!(f, "market_cap_display"),
            Self::TokenStats => write!(f, "token_stats"),
            Self::TickerQuote => write!(f, "ticker_quote"),
        }
    }
}

/// Statistics reported by a general price-index provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenStats {
    /// Spot price in USD
    pub price_usd: Option<f64>,

    /// Traded volume over the last 24 hours in USD
    pub volume_24h_usd: Option<f64>,

    /// Market capitalization in USD
    pub market_cap_usd: Option<f64>,

    /// Price change over the last 24 hours, in percent
    pub price_change_pct_24h: Option<f64>,
}

/// A conventional market quote for a security ticker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickerQuote {
    /// Ticker the quote was requested for
    pub ticker: String,

    /// Last traded price
    pub price: Option<f64>,

    /// Change versus previous close, in percent
    pub change_pct: Option<f64>,
}
