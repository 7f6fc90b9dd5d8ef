//! HTTP relay in front of the spreadsheet endpoint
//!
//! The browser never talks to the script directly: it calls
//! [`shared::CONFIG`]'s `data_path` here and receives the upstream JSON
//! unchanged. Any upstream failure becomes a 500 with a fixed message.
//! `schema_path` publishes the configured column names and expense policy
//! so the browser aggregates the same way the terminal report does.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use finance_core::SchemaSettings;
use serde_json::{Value, json};
use shared::CONFIG;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::upstream::Upstream;

pub struct AppState {
    pub upstream: Upstream,
    pub settings: SchemaSettings,
}

/// Renders as `{"error": "..."}` with the given status
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

async fn get_finance(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    match state.upstream.fetch_json().await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            tracing::error!(url = state.upstream.url(), "Failed to relay finance data: {:#}", e);
            Err(AppError::internal(CONFIG.labels.proxy_error))
        }
    }
}

async fn get_schema(State(state): State<Arc<AppState>>) -> Json<SchemaSettings> {
    Json(state.settings.clone())
}

/// The API routes alone
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(CONFIG.data_path, get(get_finance))
        .route(CONFIG.schema_path, get(get_schema))
        .with_state(state)
}

/// API route plus the optional static site, with tracing and CORS
pub fn app(state: Arc<AppState>, site_dir: Option<&Path>) -> Router {
    let mut app = router(state);
    if let Some(dir) = site_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }
    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &ServerConfig, upstream: Upstream, settings: SchemaSettings) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port).parse::<SocketAddr>()?;
    tracing::info!(
        year_key = %settings.year_key,
        income_key = %settings.income_key,
        policy = ?settings.expense_policy,
        "Publishing schema at {}",
        CONFIG.schema_path
    );
    let state = Arc::new(AppState { upstream, settings });
    let app = app(state, config.site_dir.as_deref());

    if let Some(dir) = &config.site_dir {
        tracing::info!("Serving web app from {}", dir.display());
    }
    tracing::info!("Listening on http://{}{}", addr, CONFIG.data_path);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
