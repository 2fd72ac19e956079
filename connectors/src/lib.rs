pub mod coingecko;
pub mod config;

use async_trait::async_trait;
use common::{
    models::{Coin, PriceQuote},
    Result,
};

pub use config::MarketDataConfig;

/// Number of coins requested per catalog page
pub const COINS_PER_PAGE: u32 = 250;

/// Fiat currency every price is quoted in
pub const VS_CURRENCY: &str = "usd";

/// Trait defining the interface for market data API clients
#[async_trait]
pub trait MarketDataConnector: Send + Sync {
    /// Get one page of coins ranked by descending market cap (pages start at 1)
    async fn fetch_coin_page(&self, page: u32) -> Result<Vec<Coin>>;

    /// Get the current USD price for a coin.
    /// A quote without a price is returned when upstream has none for `coin_id`.
    async fn fetch_spot_price(&self, coin_id: &str) -> Result<PriceQuote>;
}
