use async_trait::async_trait;
use common::{
    models::{Coin, PriceQuote},
    Error, Result,
};
use connectors::MarketDataConnector;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Barrier, Notify, Semaphore};

pub fn coin(id: &str, name: &str, symbol: &str) -> Coin {
    Coin {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
    }
}

/// `count` coins named "Coin N" / "cN" with ids "coin-N", starting at `first`
pub fn numbered_coins(first: usize, count: usize) -> Vec<Coin> {
    (first..first + count)
        .map(|n| coin(&format!("coin-{n}"), &format!("Coin {n}"), &format!("c{n}")))
        .collect()
}

/// Scripted market data. Unconfigured pages fail like an upstream 500,
/// unconfigured price ids come back without a price.
#[derive(Default)]
pub struct FakeMarket {
    pages: HashMap<u32, Vec<Coin>>,
    prices: HashMap<String, Option<f64>>,
    failing_prices: HashSet<String>,
    price_barrier: Option<Barrier>,
    price_gate: Option<(Arc<Notify>, Arc<Semaphore>)>,
    page_requests: Mutex<Vec<u32>>,
    price_requests: AtomicUsize,
}

impl FakeMarket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, coins: Vec<Coin>) -> Self {
        self.pages.insert(page, coins);
        self
    }

    pub fn with_price(mut self, coin_id: &str, price: f64) -> Self {
        self.prices.insert(coin_id.to_string(), Some(price));
        self
    }

    /// Upstream answers but has no price for this id
    pub fn without_price(mut self, coin_id: &str) -> Self {
        self.prices.insert(coin_id.to_string(), None);
        self
    }

    pub fn failing_price(mut self, coin_id: &str) -> Self {
        self.failing_prices.insert(coin_id.to_string());
        self
    }

    /// Every price request waits until two are in flight at once
    pub fn requiring_parallel_prices(mut self) -> Self {
        self.price_barrier = Some(Barrier::new(2));
        self
    }

    /// Price requests signal `started`, then wait for a permit from `release`
    pub fn gated_prices(mut self, started: Arc<Notify>, release: Arc<Semaphore>) -> Self {
        self.price_gate = Some((started, release));
        self
    }

    pub fn page_requests(&self) -> Vec<u32> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn price_requests(&self) -> usize {
        self.price_requests.load(Ordering::SeqCst)
    }

    pub fn network_calls(&self) -> usize {
        self.page_requests().len() + self.price_requests()
    }
}

#[async_trait]
impl MarketDataConnector for FakeMarket {
    async fn fetch_coin_page(&self, page: u32) -> Result<Vec<Coin>> {
        self.page_requests.lock().unwrap().push(page);
        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| Error::MarketDataError(format!("page {page} unavailable")))
    }

    async fn fetch_spot_price(&self, coin_id: &str) -> Result<PriceQuote> {
        self.price_requests.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.price_barrier {
            barrier.wait().await;
        }
        if let Some((started, release)) = &self.price_gate {
            started.notify_one();
            let _permit = release.acquire().await;
        }

        if self.failing_prices.contains(coin_id) {
            return Err(Error::MarketDataError(format!(
                "CoinGecko API error: 500 - {coin_id}"
            )));
        }

        let price = self.prices.get(coin_id).copied().flatten();
        Ok(PriceQuote::new(coin_id, price))
    }
}
