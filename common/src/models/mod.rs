mod coin;
mod price;

pub use coin::{parse_investment, Coin, Selection};
pub use price::{CalculationReport, CalculationResult, PriceQuote};
