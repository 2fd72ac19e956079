//! Selection state for one page and the UI events that drive it.
//!
//! A page submission is replayed as a series of [`UiEvent`]s: every field
//! arrives as `InputChanged`, and the calculate button adds one
//! `ActionTriggered` at the end.

use crate::catalog::Catalog;
use crate::service::calculate_with;
use common::models::{parse_investment, CalculationReport, Coin, Selection};
use connectors::MarketDataConnector;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Investment,
    BuySearch,
    SellSearch,
    BuyCoin,
    SellCoin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    InputChanged(Field, String),
    ActionTriggered,
}

/// What the result area currently shows
#[derive(Debug, Clone, Default)]
pub enum Outcome {
    #[default]
    Idle,
    Message(String),
    Report(CalculationReport),
}

/// A search box and the selector it filters
#[derive(Debug, Clone, Default)]
pub struct CoinPicker {
    search: String,
    chosen: Option<String>,
    options: Vec<Coin>,
}

impl CoinPicker {
    fn new(catalog: &Catalog) -> Self {
        let mut picker = Self::default();
        picker.refresh(catalog);
        picker
    }

    /// Re-filter the options. A choice that dropped out of the list falls back
    /// to the first remaining option, like a repopulated `<select>`.
    fn refresh(&mut self, catalog: &Catalog) {
        self.options = catalog.filter(&self.search);
        let still_listed = self
            .chosen
            .as_deref()
            .is_some_and(|id| self.options.iter().any(|coin| coin.id == id));
        if !still_listed {
            self.chosen = self.options.first().map(|coin| coin.id.clone());
        }
    }

    fn choose(&mut self, id: String) {
        if self.options.iter().any(|coin| coin.id == id) {
            self.chosen = Some(id);
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn options(&self) -> &[Coin] {
        &self.options
    }

    /// Selected coin id, empty when the selector has no options
    pub fn selected_id(&self) -> &str {
        self.chosen.as_deref().unwrap_or_default()
    }
}

pub struct Session<'a> {
    catalog: &'a Catalog,
    investment: String,
    buy: CoinPicker,
    sell: CoinPicker,
    outcome: Outcome,
}

impl<'a> Session<'a> {
    /// Fresh page: both selectors list the whole catalog
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            investment: String::new(),
            buy: CoinPicker::new(catalog),
            sell: CoinPicker::new(catalog),
            outcome: Outcome::Idle,
        }
    }

    pub fn on_input_changed(&mut self, field: Field, value: String) {
        match field {
            Field::Investment => self.investment = value,
            Field::BuySearch => {
                self.buy.search = value;
                self.buy.refresh(self.catalog);
            }
            Field::SellSearch => {
                self.sell.search = value;
                self.sell.refresh(self.catalog);
            }
            Field::BuyCoin => self.buy.choose(value),
            Field::SellCoin => self.sell.choose(value),
        }
    }

    /// Validate, fetch both prices and compute. Invalid input never reaches the connector.
    pub async fn on_action_triggered(&mut self, connector: &dyn MarketDataConnector) {
        let selection = parse_investment(&self.investment).and_then(|amount| {
            Selection::new(self.buy.selected_id(), self.sell.selected_id(), amount)
        });

        let selection = match selection {
            Ok(selection) => selection,
            Err(e) => {
                debug!("Rejected calculation input: {}", e);
                self.outcome = Outcome::Message(e.user_message());
                return;
            }
        };

        self.outcome = match calculate_with(connector, &selection).await {
            Ok(report) => Outcome::Report(report),
            Err(e) => Outcome::Message(e.user_message()),
        };
    }

    pub async fn dispatch(&mut self, event: UiEvent, connector: &dyn MarketDataConnector) {
        match event {
            UiEvent::InputChanged(field, value) => self.on_input_changed(field, value),
            UiEvent::ActionTriggered => self.on_action_triggered(connector).await,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn investment(&self) -> &str {
        &self.investment
    }

    pub fn buy(&self) -> &CoinPicker {
        &self.buy
    }

    pub fn sell(&self) -> &CoinPicker {
        &self.sell
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}
