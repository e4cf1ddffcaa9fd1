//! Axum front end for the calculator.
//!
//! Routes:
//!   GET  /            service banner
//!   GET  /health      liveness + catalog size
//!   GET  /placeables  catalog listing
//!   POST /calculate   resource aggregation

use crate::core::catalog::Catalog;
use crate::core::handler::RequestHandler;
use crate::core::{ConfigProvider, Placeable};
use crate::domain::wire::{CalculationRequest, CalculationResponse, ErrorResponse};
use crate::utils::error::{CalcError, ErrorCategory, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub handler: RequestHandler<Catalog>,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            handler: RequestHandler::new(catalog),
        }
    }
}

/// HTTP-facing wrapper around [`CalcError`].
#[derive(Debug)]
pub enum AppError {
    Calc(CalcError),
    MalformedBody(String),
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        AppError::Calc(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Calc(CalcError::UnknownPlaceable(_)) => StatusCode::NOT_FOUND,
            AppError::Calc(CalcError::EmptySelection) => StatusCode::BAD_REQUEST,
            AppError::Calc(e) if e.category() == ErrorCategory::Validation => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Calc(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::MalformedBody(detail) => {
                tracing::warn!("Rejected malformed request body: {}", detail);
                ErrorResponse {
                    detail: detail.clone(),
                    category: Some("validation".to_string()),
                }
            }
            AppError::Calc(e) if status.is_client_error() => {
                tracing::warn!("Rejected calculation: {}", e);
                ErrorResponse {
                    detail: e.to_string(),
                    category: Some(e.category().as_str().to_string()),
                }
            }
            AppError::Calc(e) => {
                tracing::error!("❌ Request failed: {} (Category: {:?})", e, e.category());
                ErrorResponse {
                    detail: "Internal server error".to_string(),
                    category: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/placeables", get(list_placeables))
        .route("/calculate", post(calculate))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

/// 啟動 HTTP 服務，直到收到 Ctrl-C / SIGTERM
pub async fn serve<C: ConfigProvider>(config: &C, catalog: Catalog) -> Result<()> {
    let state = AppState::new(Arc::new(catalog));
    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Placeable calculator listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Placeable Calculator API" }))
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "placeables": state.handler.catalog().len(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn list_placeables(State(state): State<AppState>) -> Json<Vec<Placeable>> {
    Json(state.handler.placeables().to_vec())
}

async fn calculate(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CalculationRequest>, JsonRejection>,
) -> std::result::Result<Json<CalculationResponse>, AppError> {
    let Json(request) = payload?;
    let response = state.handler.handle(&request)?;
    Ok(Json(response))
}
