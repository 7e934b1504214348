use std::collections::HashMap;

use crate::models::Ticker;

/// Decides whether a token address is a tokenized tradable equity, and if so
/// which conventional ticker it tracks.
///
/// Keyed by address only; the chain a request names plays no part.
pub trait EquityTickerLookup: Send + Sync {
    fn underlying_ticker(&self, address: &str) -> Option<Ticker>;
}

/// Lookup that knows no equities. The 24h change then never falls back.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEquityLookup;

impl EquityTickerLookup for NoEquityLookup {
    fn underlying_ticker(&self, _address: &str) -> Option<Ticker> {
        None
    }
}

/// Fixed address to ticker table.
///
/// Hex addresses match case-insensitively; other formats match exactly.
#[derive(Debug, Default, Clone)]
pub struct StaticEquityLookup {
    tickers: HashMap<String, Ticker>,
}

impl StaticEquityLookup {
    pub fn new<I, A, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, T)>,
        A: Into<String>,
        T: AsRef<str>,
    {
        Self {
            tickers: entries
                .into_iter()
                .map(|(address, ticker)| {
                    let address: String = address.into();
                    (lookup_key(&address), Ticker::from(ticker.as_ref()))
                })
                .collect(),
        }
    }
}

impl EquityTickerLookup for StaticEquityLookup {
    fn underlying_ticker(&self, address: &str) -> Option<Ticker> {
        self.tickers.get(&lookup_key(address)).cloned()
    }
}

fn lookup_key(address: &str) -> String {
    let address = address.trim();
    if address.starts_with("0x") || address.starts_with("0X") {
        address.to_ascii_lowercase()
    } else {
        address.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_equity_lookup() {
        assert!(NoEquityLookup.underlying_ticker("0xabc").is_none());
    }

    #[test]
    fn test_static_lookup() {
        let lookup = StaticEquityLookup::new([("0xaapl", "AAPL")]);
        assert_eq!(lookup.underlying_ticker("0xaapl").as_deref(), Some("AAPL"));
        assert!(lookup.underlying_ticker("0xother").is_none());
    }

    #[test]
    fn test_static_lookup_hex_ignores_case() {
        let lookup = StaticEquityLookup::new([("0xAbCd", "TSLA"), ("MintXyZ", "NVDA")]);
        assert_eq!(lookup.underlying_ticker("0xabcd").as_deref(), Some("TSLA"));
        assert_eq!(lookup.underlying_ticker("0XABCD").as_deref(), Some("TSLA"));
        assert_eq!(lookup.underlying_ticker("MintXyZ").as_deref(), Some("NVDA"));
        assert!(lookup.underlying_ticker("mintxyz").is_none());
    }
}
