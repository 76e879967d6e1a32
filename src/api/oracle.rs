use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::yahoo::YahooApi;
use crate::models::AssetType;

/// Live market price lookup. Implementations resolve every failure to
/// `None`; an unknown price is a value, not an error.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    async fn current_price(&self, ticker: &str, asset_type: AssetType) -> Option<Decimal>;
}

#[derive(Clone, Debug, Default)]
pub struct YahooOracle {
    api: YahooApi,
}

impl YahooOracle {
    pub fn new() -> Self {
        Self {
            api: YahooApi::new(),
        }
    }
}

/// Crypto tickers are quoted against USD on Yahoo.
pub fn normalize_symbol(ticker: &str, asset_type: AssetType) -> String {
    if asset_type == AssetType::Crypto && !ticker.ends_with("-USD") {
        format!("{}-USD", ticker)
    } else {
        ticker.to_string()
    }
}

#[async_trait]
impl PriceOracle for YahooOracle {
    async fn current_price(&self, ticker: &str, asset_type: AssetType) -> Option<Decimal> {
        let symbol = normalize_symbol(ticker, asset_type);
        debug!(symbol = %symbol, "fetching current price");

        let quote_price = match self.api.get_quote(&symbol).await {
            Ok(quote) => quote.market_price(),
            Err(err) => {
                debug!(symbol = %symbol, error = %err, "quote lookup failed");
                None
            }
        };

        let price = match quote_price {
            Some(price) if price > Decimal::ZERO => Some(price),
            _ => match self.api.get_daily_close(&symbol).await {
                Ok(close) => Some(close),
                Err(err) => {
                    warn!(symbol = %symbol, error = %err, "price lookup failed");
                    None
                }
            },
        };

        price.filter(|price| *price > Decimal::ZERO)
    }
}
