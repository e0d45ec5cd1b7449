// Numera - Web Server
// REST API with Axum: every calculator as a JSON endpoint

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use numera::live_rates::LiveRateClient;
use numera::report::{self, ResultCard};
use numera::{
    evaluate_expression, AngleMode, CalcError, CurrencyRequest, EmiRequest, ExchangeRateTable,
    SavingsRequest, Settings, SipRequest, TaxRequest, ZakatRequest,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Shared application state
#[derive(Clone)]
struct AppState {
    rates: Arc<LiveRateClient>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Numbers plus the same result card the CLI and TUI show
#[derive(Serialize)]
struct Calculation<T> {
    result: T,
    card: ResultCard,
}

#[derive(Deserialize)]
struct CalcRequest {
    expression: String,
    #[serde(default)]
    angle_mode: AngleMode,
}

#[derive(Serialize)]
struct CalcResponse {
    expression: String,
    result: String,
    angle_mode: AngleMode,
}

/// 200 with data, or 400 with the user-facing message
fn respond<T: Serialize>(outcome: Result<T, CalcError>) -> Response {
    match outcome {
        Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::err(e.to_string())),
        )
            .into_response(),
    }
}

fn with_card<T>(result: T, card: impl Fn(&T) -> ResultCard) -> Calculation<T> {
    let card = card(&result);
    Calculation { result, card }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/rates - Built-in approximate rate table
async fn get_rates() -> impl IntoResponse {
    Json(ApiResponse::ok(ExchangeRateTable::fallback()))
}

/// POST /api/emi
async fn calculate_emi(Json(req): Json<EmiRequest>) -> Response {
    respond(req.calculate().map(|r| with_card(r, report::emi_card)))
}

/// POST /api/sip
async fn calculate_sip(Json(req): Json<SipRequest>) -> Response {
    respond(req.calculate().map(|r| with_card(r, report::sip_card)))
}

/// POST /api/tax
async fn calculate_tax(Json(req): Json<TaxRequest>) -> Response {
    respond(req.calculate().map(|r| with_card(r, report::tax_card)))
}

/// POST /api/currency - `"live": true` tries the rate service first
async fn convert_currency(
    State(state): State<AppState>,
    Json(req): Json<CurrencyRequest>,
) -> Response {
    let outcome = if req.live {
        match req.validate() {
            Ok(_) => match state.rates.quote(&req.from, &req.to).await {
                Ok(quote) => req.calculate_with(quote),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        }
    } else {
        req.calculate()
    };

    respond(outcome.map(|c| with_card(c, report::currency_card)))
}

/// POST /api/zakat
async fn calculate_zakat(Json(req): Json<ZakatRequest>) -> Response {
    respond(req.calculate().map(|r| with_card(r, report::zakat_card)))
}

/// POST /api/savings
async fn calculate_savings(Json(req): Json<SavingsRequest>) -> Response {
    respond(req.calculate().map(|o| with_card(o, report::savings_card)))
}

/// POST /api/calc - Scientific expression
async fn calculate_expression(Json(req): Json<CalcRequest>) -> Response {
    let outcome = evaluate_expression(&req.expression, req.angle_mode).map(|result| CalcResponse {
        expression: req.expression.clone(),
        result,
        angle_mode: req.angle_mode,
    });
    if let Err(e) = &outcome {
        warn!(expression = %req.expression, error = %e, "expression rejected");
    }
    respond(outcome)
}

fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/rates", get(get_rates))
        .route("/emi", post(calculate_emi))
        .route("/sip", post(calculate_sip))
        .route("/tax", post(calculate_tax))
        .route("/currency", post(convert_currency))
        .route("/zakat", post(calculate_zakat))
        .route("/savings", post(calculate_savings))
        .route("/calc", post(calculate_expression))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before reading settings
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🌐 Numera - Web Server v{}", numera::VERSION);

    let settings = Settings::load()?;
    let rates = LiveRateClient::from_settings(&settings)?;
    info!(
        rates_url = %settings.rates_api_url,
        timeout_ms = settings.rates_timeout_ms,
        "live rate service configured"
    );

    let state = AppState {
        rates: Arc::new(rates),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", settings.server_addr))?;

    info!("🚀 Server running on http://{}", settings.server_addr);
    info!("   API: http://{}/api/health", settings.server_addr);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
