use std::sync::Arc;

use anyhow::Context;
use rwaswap_core::{SwapIntentResolver, TokenCatalog};
use rwaswap_market_data::{
    CoinGeckoProvider, DisabledVenueProvider, FinnhubProvider, MarketDataAggregator,
    MarketDataProvider, ProviderRegistry, TokenDataServiceTrait,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, equity_lookup::CatalogTickerLookup};

pub struct AppState {
    pub token_data_service: Arc<dyn TokenDataServiceTrait + Send + Sync>,
    pub resolver: Arc<SwapIntentResolver>,
}

impl AppState {
    pub fn new(
        token_data_service: Arc<dyn TokenDataServiceTrait + Send + Sync>,
        resolver: Arc<SwapIntentResolver>,
    ) -> Self {
        Self {
            token_data_service,
            resolver,
        }
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("RWASWAP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let catalog = match &config.token_catalog {
        Some(path) => TokenCatalog::from_path(path)
            .with_context(|| format!("Failed to load token catalog {}", path.display()))?,
        None => {
            tracing::info!("No token catalog configured, equity ticker fallback disabled");
            TokenCatalog::new(Vec::new())
        }
    };
    let catalog = Arc::new(catalog);

    let mut coingecko = CoinGeckoProvider::new(config.coingecko_api_key.clone());
    if let Some(base_url) = &config.coingecko_base_url {
        coingecko = coingecko.with_base_url(base_url.clone());
    }

    let mut providers: Vec<Arc<dyn MarketDataProvider>> =
        vec![Arc::new(coingecko), Arc::new(DisabledVenueProvider::new())];
    match &config.finnhub_api_key {
        Some(key) => {
            let mut finnhub = FinnhubProvider::new(key.clone());
            if let Some(base_url) = &config.finnhub_base_url {
                finnhub = finnhub.with_base_url(base_url.clone());
            }
            providers.push(Arc::new(finnhub));
        }
        None => tracing::info!("RWASWAP_FINNHUB_API_KEY not set, ticker quotes disabled"),
    }

    let registry = ProviderRegistry::new(providers).with_call_timeout(config.provider_timeout);
    tracing::info!(
        "Market data providers: {:?}",
        registry.providers().iter().map(|p| p.id()).collect::<Vec<_>>()
    );

    let token_data_service: Arc<dyn TokenDataServiceTrait + Send + Sync> =
        Arc::new(MarketDataAggregator::new(
            Arc::new(registry),
            Arc::new(CatalogTickerLookup::new(catalog)),
        ));
    let resolver = Arc::new(SwapIntentResolver::new(config.venues.clone()));

    Ok(Arc::new(AppState::new(token_data_service, resolver)))
}
