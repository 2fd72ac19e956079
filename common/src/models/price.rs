use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spot price of one coin in USD, fetched fresh for a single calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Coin identifier the price was requested for
    pub coin_id: String,
    /// `None` when upstream had no price for this id
    pub usd_price: Option<f64>,
    /// When the quote was received
    pub fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn new(coin_id: impl Into<String>, usd_price: Option<f64>) -> Self {
        Self {
            coin_id: coin_id.into(),
            usd_price,
            fetched_at: Utc::now(),
        }
    }
}

/// Outcome of buying one coin and selling into another
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    /// Units of the buy coin acquired for the investment
    pub quantity: f64,
    /// Value of that quantity at the sell price
    pub final_value: f64,
    /// `final_value - investment`, negative for a loss
    pub profit: f64,
    /// Profit as a percentage of the investment
    pub roi_percent: f64,
}

/// Everything the result block shows for one calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationReport {
    pub buy_coin_id: String,
    pub sell_coin_id: String,
    pub investment_amount: f64,
    pub buy_price: f64,
    pub sell_price: f64,
    pub result: CalculationResult,
    /// Time of the later of the two quotes
    pub priced_at: DateTime<Utc>,
}
