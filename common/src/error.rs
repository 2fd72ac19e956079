use thiserror::Error;

pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a valid investment amount.";
pub const MISSING_SELECTION_MESSAGE: &str = "Please select both buy and sell coins.";
pub const MISSING_PRICE_MESSAGE: &str = "Could not fetch price data. Try again later.";
pub const CATALOG_LOAD_FAILED_MESSAGE: &str = "Failed to load coin list. Please refresh.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Market data API error: {0}")]
    MarketDataError(String),

    #[error("Parsing error: {0}")]
    ParseError(String),

    #[error("No price available for {0}")]
    MissingPrice(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Coin catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// True for failures of the upstream request itself (transport, status or body).
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Error::HttpError(_) | Error::MarketDataError(_) | Error::ParseError(_)
        )
    }

    /// Text shown to the user in the result area of the page.
    pub fn user_message(&self) -> String {
        match self {
            Error::InvalidInput(msg) => msg.clone(),
            Error::MissingPrice(_) => MISSING_PRICE_MESSAGE.to_string(),
            Error::CatalogUnavailable(_) => CATALOG_LOAD_FAILED_MESSAGE.to_string(),
            other => format!("Error fetching data: {}", other),
        }
    }
}
