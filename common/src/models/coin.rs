use crate::error::{Error, INVALID_AMOUNT_MESSAGE, MISSING_SELECTION_MESSAGE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Coin {
    /// Unique identifier for the coin (e.g., "bitcoin", "ethereum")
    pub id: String,
    /// Human-readable name (e.g., "Bitcoin", "Ethereum")
    pub name: String,
    /// Ticker symbol as reported upstream (e.g., "btc", "eth")
    pub symbol: String,
}

impl Coin {
    /// Case-insensitive substring match on name or symbol.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.symbol.to_lowercase().contains(needle)
    }

    /// Label used for selector options, e.g. "Bitcoin (BTC)".
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol.to_uppercase())
    }
}

/// A validated buy/sell choice with the amount to invest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Selection {
    pub buy_coin_id: String,
    pub sell_coin_id: String,
    pub investment_amount: f64,
}

impl Selection {
    /// Amount is checked first, then both coins, the same order the page reports them.
    pub fn new(
        buy_coin_id: impl Into<String>,
        sell_coin_id: impl Into<String>,
        investment_amount: f64,
    ) -> Result<Self, Error> {
        if investment_amount.is_nan() || investment_amount <= 0.0 {
            return Err(Error::InvalidInput(INVALID_AMOUNT_MESSAGE.to_string()));
        }

        let buy_coin_id = buy_coin_id.into();
        let sell_coin_id = sell_coin_id.into();
        if buy_coin_id.is_empty() || sell_coin_id.is_empty() {
            return Err(Error::InvalidInput(MISSING_SELECTION_MESSAGE.to_string()));
        }

        Ok(Self {
            buy_coin_id,
            sell_coin_id,
            investment_amount,
        })
    }
}

/// Parse the raw investment field. Anything that is not a positive number is rejected.
pub fn parse_investment(raw: &str) -> Result<f64, Error> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount > 0.0 => Ok(amount),
        _ => Err(Error::InvalidInput(INVALID_AMOUNT_MESSAGE.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: &str, name: &str, symbol: &str) -> Coin {
        Coin {
            id: id.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
        }
    }

    #[test]
    fn label_upper_cases_symbol() {
        assert_eq!(coin("bitcoin", "Bitcoin", "btc").label(), "Bitcoin (BTC)");
    }

    #[test]
    fn matches_name_or_symbol() {
        let eth = coin("ethereum", "Ethereum", "eth");
        assert!(eth.matches("ther"));
        assert!(eth.matches("eth"));
        assert!(eth.matches(""));
        assert!(!eth.matches("btc"));
    }

    #[test]
    fn selection_rejects_non_positive_amounts() {
        for amount in [0.0, -5.0, f64::NAN] {
            let err = Selection::new("bitcoin", "ethereum", amount).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(ref msg) if msg == INVALID_AMOUNT_MESSAGE));
        }
    }

    #[test]
    fn selection_requires_both_coins() {
        let err = Selection::new("", "ethereum", 100.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(ref msg) if msg == MISSING_SELECTION_MESSAGE));

        let err = Selection::new("bitcoin", "", 100.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn amount_error_wins_over_selection_error() {
        let err = Selection::new("", "", 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(ref msg) if msg == INVALID_AMOUNT_MESSAGE));
    }

    #[test]
    fn parse_investment_accepts_padded_numbers() {
        assert_eq!(parse_investment(" 1000 ").unwrap(), 1000.0);
        assert_eq!(parse_investment("0.5").unwrap(), 0.5);
        assert!(parse_investment("").is_err());
        assert!(parse_investment("abc").is_err());
        assert!(parse_investment("0").is_err());
        assert!(parse_investment("-10").is_err());
    }
}
