use crate::{MarketDataConfig, MarketDataConnector, COINS_PER_PAGE, VS_CURRENCY};
use async_trait::async_trait;
use common::{
    models::{Coin, PriceQuote},
    Error, Result,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

pub struct CoinGeckoConnector {
    client: reqwest::Client,
    base_url: String,
}

impl CoinGeckoConnector {
    pub fn new(config: MarketDataConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url,
        }
    }

    fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }

    fn simple_price_url(&self) -> String {
        format!("{}/simple/price", self.base_url)
    }

    /// Send a GET and return the body, turning non-success statuses into errors
    async fn get_text(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::HttpError)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("CoinGecko API error: {} - {}", status, error_text);
            return Err(Error::MarketDataError(format!(
                "CoinGecko API error: {} - {}",
                status, error_text
            )));
        }

        response.text().await.map_err(Error::HttpError)
    }
}

impl Default for CoinGeckoConnector {
    fn default() -> Self {
        Self::new(MarketDataConfig::default())
    }
}

/// One row of /coins/markets; everything besides identity is ignored
#[derive(Debug, Deserialize)]
struct CoinGeckoMarket {
    id: String,
    symbol: String,
    name: String,
}

/// Parse a /coins/markets body into coins, keeping upstream order
pub fn parse_coin_page(body: &str) -> Result<Vec<Coin>> {
    let markets: Vec<CoinGeckoMarket> = serde_json::from_str(body).map_err(|e| {
        Error::ParseError(format!("Failed to parse CoinGecko markets: {}", e))
    })?;

    Ok(markets
        .into_iter()
        .map(|market| Coin {
            id: market.id,
            name: market.name,
            symbol: market.symbol,
        })
        .collect())
}

/// Parse a /simple/price body, e.g. `{"bitcoin":{"usd":67187.34}}`.
///
/// A missing id, a missing `usd` field or a non-numeric value all mean
/// "no price" and give `Ok(None)`; only a body that is not a JSON object fails.
pub fn parse_spot_price(body: &str, coin_id: &str) -> Result<Option<f64>> {
    let data: Value = serde_json::from_str(body).map_err(|e| {
        Error::ParseError(format!("Failed to parse CoinGecko price response: {}", e))
    })?;

    if !data.is_object() {
        return Err(Error::ParseError(format!(
            "Unexpected CoinGecko price response: {}",
            data
        )));
    }

    Ok(data
        .get(coin_id)
        .and_then(|prices| prices.get(VS_CURRENCY))
        .and_then(Value::as_f64))
}

#[async_trait]
impl MarketDataConnector for CoinGeckoConnector {
    async fn fetch_coin_page(&self, page: u32) -> Result<Vec<Coin>> {
        let url = self.markets_url();

        debug!("Fetching coin page {} from CoinGecko: {}", page, url);

        let body = self
            .get_text(
                &url,
                &[
                    ("vs_currency", VS_CURRENCY.to_string()),
                    ("order", "market_cap_desc".to_string()),
                    ("per_page", COINS_PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;

        let coins = parse_coin_page(&body)?;
        debug!("Received {} coins for page {}", coins.len(), page);
        Ok(coins)
    }

    async fn fetch_spot_price(&self, coin_id: &str) -> Result<PriceQuote> {
        let url = self.simple_price_url();

        debug!("Fetching spot price for {} from CoinGecko", coin_id);

        let body = self
            .get_text(
                &url,
                &[
                    ("ids", coin_id.to_string()),
                    ("vs_currencies", VS_CURRENCY.to_string()),
                ],
            )
            .await?;

        let usd_price = parse_spot_price(&body, coin_id)?;
        if usd_price.is_none() {
            debug!("CoinGecko returned no {} price for {}", VS_CURRENCY, coin_id);
        }

        Ok(PriceQuote::new(coin_id, usd_price))
    }
}
