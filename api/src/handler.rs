use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use common::{
    models::{CalculationReport, Coin, Selection},
    Error as CommonError,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::render_page;
use crate::service::{calculate_with, load_catalog, CatalogStatus, SharedService};
use crate::session::{Field, Session, UiEvent};

// Create a wrapper for our common::Error type
pub struct ApiError(CommonError);

impl From<CommonError> for ApiError {
    fn from(err: CommonError) -> Self {
        ApiError(err)
    }
}

// Convert our API error wrapper to an Axum response
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CommonError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CommonError::MissingPrice(_) => StatusCode::NOT_FOUND,
            CommonError::CatalogUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CommonError::HttpError(_)
            | CommonError::MarketDataError(_)
            | CommonError::ParseError(_) => StatusCode::BAD_GATEWAY,
            CommonError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            message: String,
        }

        let body = ErrorResponse {
            error: self.0.to_string(),
            message: self.0.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Fields of the calculator form. Every field is optional so a bare `GET /` works.
#[derive(Debug, Default, Deserialize)]
pub struct PageForm {
    pub investment: Option<String>,
    pub buy_search: Option<String>,
    pub buy_coin: Option<String>,
    pub sell_search: Option<String>,
    pub sell_coin: Option<String>,
    pub action: Option<String>,
}

impl PageForm {
    /// Replay the submitted fields in page order; searches come before the
    /// selector they filter so the chosen coin is checked against the new list.
    pub fn into_events(self) -> Vec<UiEvent> {
        let fields = [
            (Field::Investment, self.investment),
            (Field::BuySearch, self.buy_search),
            (Field::BuyCoin, self.buy_coin),
            (Field::SellSearch, self.sell_search),
            (Field::SellCoin, self.sell_coin),
        ];

        let mut events: Vec<UiEvent> = fields
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| UiEvent::InputChanged(field, v)))
            .collect();

        if self.action.as_deref() == Some("calculate") {
            events.push(UiEvent::ActionTriggered);
        }

        events
    }
}

async fn render_session(service: &SharedService, form: PageForm) -> Html<String> {
    // Price requests below must not run under the lock
    let (catalog, connector, status) = {
        let service = service.read().await;
        (service.catalog(), service.connector(), service.status())
    };

    let mut session = Session::new(&catalog);
    for event in form.into_events() {
        session.dispatch(event, connector.as_ref()).await;
    }

    Html(render_page(&session, status))
}

// Calculator page; query parameters act like typed input
pub async fn index(
    State(service): State<SharedService>,
    Query(form): Query<PageForm>,
) -> Html<String> {
    render_session(&service, form).await
}

// Form submission: search or calculate
pub async fn submit(
    State(service): State<SharedService>,
    Form(form): Form<PageForm>,
) -> Html<String> {
    render_session(&service, form).await
}

// User-triggered catalog reload from the page
pub async fn reload_page(State(service): State<SharedService>) -> Redirect {
    if load_catalog(&service).await.is_err() {
        debug!("Catalog reload failed, keeping previous coin list");
    }
    Redirect::to("/")
}

#[derive(Debug, Deserialize)]
pub struct CoinQuery {
    pub search: Option<String>,
}

// Return the catalog, optionally filtered by name or symbol
pub async fn list_coins(
    State(service): State<SharedService>,
    Query(query): Query<CoinQuery>,
) -> Result<Json<Vec<Coin>>, ApiError> {
    let service = service.read().await;
    let coins = service.list_coins(query.search.as_deref().unwrap_or_default())?;
    Ok(Json(coins))
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub coins: usize,
}

// Reload the catalog from upstream
pub async fn reload_coins(
    State(service): State<SharedService>,
) -> Result<Json<ReloadResponse>, ApiError> {
    let coins = load_catalog(&service).await?;
    Ok(Json(ReloadResponse { coins }))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: CatalogStatus,
    pub coins: usize,
}

pub async fn catalog_status(State(service): State<SharedService>) -> Json<StatusResponse> {
    let service = service.read().await;
    Json(StatusResponse {
        status: service.status(),
        coins: service.catalog().len(),
    })
}

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub buy_coin_id: String,
    pub sell_coin_id: String,
    pub investment_amount: f64,
}

// Simulate buying one coin and selling into another at live prices
pub async fn calculate(
    State(service): State<SharedService>,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<CalculationReport>, ApiError> {
    let selection = Selection::new(
        request.buy_coin_id,
        request.sell_coin_id,
        request.investment_amount,
    )?;

    let connector = service.read().await.connector();
    let report = calculate_with(connector.as_ref(), &selection).await?;
    Ok(Json(report))
}
