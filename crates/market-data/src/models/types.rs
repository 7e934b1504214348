use std::borrow::Cow;
use std::sync::Arc;

/// Provider identifier - mostly static constants
pub type ProviderId = Cow<'static, str>;

/// Integer chain identifier as used by the token search index
pub type ChainId = u64;

/// Ticker of a conventional security (e.g. "AAPL")
pub type Ticker = Arc<str>;
