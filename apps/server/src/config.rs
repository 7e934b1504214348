use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use rwaswap_core::VenueConfig;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Deadline for a single provider call, throttle wait included.
    pub provider_timeout: Duration,
    pub coingecko_api_key: Option<String>,
    pub coingecko_base_url: Option<String>,
    /// The ticker-quote fallback is only registered when this is set.
    pub finnhub_api_key: Option<String>,
    pub finnhub_base_url: Option<String>,
    pub token_catalog: Option<PathBuf>,
    pub venues: VenueConfig,
}

impl Config {
    /// Read the configuration from the process environment and `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_vars<F>(source: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let var = |key: &str| {
            source(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let listen_addr: SocketAddr = var("RWASWAP_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid RWASWAP_LISTEN_ADDR")?;
        let cors_allow = var("RWASWAP_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_or(var("RWASWAP_REQUEST_TIMEOUT_MS"), 30_000)
            .context("Invalid RWASWAP_REQUEST_TIMEOUT_MS")?;
        let provider_timeout_ms: u64 = parse_or(var("RWASWAP_PROVIDER_TIMEOUT_MS"), 8_000)
            .context("Invalid RWASWAP_PROVIDER_TIMEOUT_MS")?;

        let mut venues = VenueConfig::default();
        venues.primary.chain_id =
            parse_or(var("RWASWAP_PRIMARY_CHAIN_ID"), venues.primary.chain_id)
                .context("Invalid RWASWAP_PRIMARY_CHAIN_ID")?;
        if let Some(asset) = var("RWASWAP_PRIMARY_STABLE_ASSET") {
            venues.primary.stable_asset = asset;
        }
        venues.restricted.search_chain_id = parse_or(
            var("RWASWAP_RESTRICTED_SEARCH_CHAIN_ID"),
            venues.restricted.search_chain_id,
        )
        .context("Invalid RWASWAP_RESTRICTED_SEARCH_CHAIN_ID")?;
        venues.restricted.execution_chain_id = parse_or(
            var("RWASWAP_RESTRICTED_EXECUTION_CHAIN_ID"),
            venues.restricted.execution_chain_id,
        )
        .context("Invalid RWASWAP_RESTRICTED_EXECUTION_CHAIN_ID")?;
        if let Some(asset) = var("RWASWAP_RESTRICTED_QUOTE_ASSET") {
            venues.restricted.quote_asset = asset;
        }

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            provider_timeout: Duration::from_millis(provider_timeout_ms),
            coingecko_api_key: var("RWASWAP_COINGECKO_API_KEY"),
            coingecko_base_url: var("RWASWAP_COINGECKO_BASE_URL"),
            finnhub_api_key: var("RWASWAP_FINNHUB_API_KEY"),
            finnhub_base_url: var("RWASWAP_FINNHUB_BASE_URL"),
            token_catalog: var("RWASWAP_TOKEN_CATALOG").map(PathBuf::from),
            venues,
        })
    }
}

fn parse_or<T>(value: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => Ok(raw.parse::<T>()?),
        None => Ok(default),
    }
}
