/// Public CoinGecko v3 endpoint
pub const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Configuration for the market data connector
#[derive(Debug, Clone)]
pub struct MarketDataConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COINGECKO_API_URL.to_string(),
        }
    }
}

impl MarketDataConfig {
    /// Read `COINGECKO_API_URL`, falling back to the public endpoint
    pub fn from_env() -> Self {
        let base_url = std::env::var("COINGECKO_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_COINGECKO_API_URL.to_string());

        Self { base_url }
    }
}
