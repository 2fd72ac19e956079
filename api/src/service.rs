use crate::catalog::Catalog;
use common::{
    calculator,
    error::CATALOG_LOAD_FAILED_MESSAGE,
    models::{CalculationReport, Coin, Selection},
    Error, Result,
};
use connectors::MarketDataConnector;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

pub type SharedService = Arc<RwLock<CoinService>>;

/// Where the catalog load stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogStatus {
    Loading,
    Ready,
    Failed,
}

/// Session state: the coin catalog and the market data connector used to fill it
pub struct CoinService {
    /// Market data API connector
    connector: Arc<dyn MarketDataConnector>,
    /// Last successfully loaded catalog, empty until the first load succeeds
    catalog: Arc<Catalog>,
    status: CatalogStatus,
}

impl CoinService {
    pub fn new(connector: Arc<dyn MarketDataConnector>) -> Self {
        Self {
            connector,
            catalog: Arc::new(Catalog::default()),
            status: CatalogStatus::Loading,
        }
    }

    pub fn into_shared(self) -> SharedService {
        Arc::new(RwLock::new(self))
    }

    pub fn connector(&self) -> Arc<dyn MarketDataConnector> {
        Arc::clone(&self.connector)
    }

    /// Snapshot of the current catalog; readers keep it after the lock is released
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn status(&self) -> CatalogStatus {
        self.status
    }

    /// Install a finished load. A failed load keeps whatever catalog was there before.
    pub fn apply_load(&mut self, loaded: Result<Catalog>) -> Result<usize> {
        match loaded {
            Ok(catalog) => {
                let size = catalog.len();
                self.catalog = Arc::new(catalog);
                self.status = CatalogStatus::Ready;
                info!("Coin catalog loaded with {} coins", size);
                Ok(size)
            }
            Err(e) => {
                error!("Failed to load coin catalog: {}", e);
                self.status = CatalogStatus::Failed;
                Err(e)
            }
        }
    }

    /// Filtered coins for the JSON API
    pub fn list_coins(&self, search: &str) -> Result<Vec<Coin>> {
        match self.status {
            CatalogStatus::Ready => Ok(self.catalog.filter(search)),
            CatalogStatus::Loading if self.catalog.is_empty() => Err(Error::CatalogUnavailable(
                "coin list is still loading".to_string(),
            )),
            CatalogStatus::Failed if self.catalog.is_empty() => Err(Error::CatalogUnavailable(
                CATALOG_LOAD_FAILED_MESSAGE.to_string(),
            )),
            _ => Ok(self.catalog.filter(search)),
        }
    }
}

/// Run a full catalog load without holding the lock across network calls
pub async fn load_catalog(service: &SharedService) -> Result<usize> {
    let connector = {
        let mut guard = service.write().await;
        guard.status = CatalogStatus::Loading;
        guard.connector()
    };

    let loaded = Catalog::load(connector.as_ref()).await;
    service.write().await.apply_load(loaded)
}

/// Fetch both spot prices concurrently and compute the trade outcome
pub async fn calculate_with(
    connector: &dyn MarketDataConnector,
    selection: &Selection,
) -> Result<CalculationReport> {
    debug!(
        "Fetching prices for {} -> {}",
        selection.buy_coin_id, selection.sell_coin_id
    );

    let (buy_quote, sell_quote) = tokio::try_join!(
        connector.fetch_spot_price(&selection.buy_coin_id),
        connector.fetch_spot_price(&selection.sell_coin_id)
    )?;

    let buy_price = buy_quote
        .usd_price
        .ok_or_else(|| Error::MissingPrice(buy_quote.coin_id.clone()))?;
    let sell_price = sell_quote
        .usd_price
        .ok_or_else(|| Error::MissingPrice(sell_quote.coin_id.clone()))?;

    let result = calculator::compute(selection.investment_amount, buy_price, sell_price);

    info!(
        "Simulated {} {} -> {}: profit {:.2}, roi {:.2}%",
        selection.investment_amount,
        selection.buy_coin_id,
        selection.sell_coin_id,
        result.profit,
        result.roi_percent
    );

    Ok(CalculationReport {
        buy_coin_id: selection.buy_coin_id.clone(),
        sell_coin_id: selection.sell_coin_id.clone(),
        investment_amount: selection.investment_amount,
        buy_price,
        sell_price,
        result,
        priced_at: buy_quote.fetched_at.max(sell_quote.fetched_at),
    })
}
