use common::{models::Coin, Result};
use connectors::MarketDataConnector;
use std::collections::HashSet;
use tracing::debug;

/// Most coins kept from the merged pages
pub const MAX_COINS: usize = 400;

/// Pages requested on every load
const CATALOG_PAGES: [u32; 2] = [1, 2];

/// Top coins by market cap, in upstream order. At most `MAX_COINS`, ids unique.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    coins: Vec<Coin>,
}

impl Catalog {
    /// Build a catalog from already fetched coins: duplicates dropped, then truncated.
    pub fn from_coins(coins: impl IntoIterator<Item = Coin>) -> Self {
        let mut seen = HashSet::new();
        let coins = coins
            .into_iter()
            .filter(|coin| seen.insert(coin.id.clone()))
            .take(MAX_COINS)
            .collect();

        Self { coins }
    }

    /// Fetch both pages one after the other. Any failed page fails the whole load.
    pub async fn load(connector: &dyn MarketDataConnector) -> Result<Self> {
        let mut fetched = Vec::new();
        for page in CATALOG_PAGES {
            let coins = connector.fetch_coin_page(page).await?;
            debug!("Catalog page {} returned {} coins", page, coins.len());
            fetched.extend(coins);
        }

        Ok(Self::from_coins(fetched))
    }

    /// Coins whose name or symbol contains `term`, ignoring case. Empty term keeps everything.
    pub fn filter(&self, term: &str) -> Vec<Coin> {
        let needle = term.to_lowercase();
        self.coins
            .iter()
            .filter(|coin| coin.matches(&needle))
            .cloned()
            .collect()
    }

    #[cfg(test)]
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }
}
