// Axum API Server Module
//
// Purpose: JSON surface over the size resolver and SKU encoder for the
// presentation layer (form UI, table viewer).

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::catalog::SizeTable;
use crate::error::ResolverError;
use crate::sizing::Dimension;
use crate::sku::{generate_batch, generate_sku, SkuRequest};

/// Default `EnvFilter` directives when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "stocking_sizer=info,tower_http=debug,warn";

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    /// Immutable catalog shared by every request
    pub table: Arc<SizeTable>,
}

impl AppState {
    pub fn new(table: SizeTable) -> Self {
        Self { table: Arc::new(table) }
    }

    /// Load the catalog from `table_path`, or the builtin catalog when `None`
    pub fn load(table_path: Option<&str>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let table = match table_path {
            Some(path) => SizeTable::from_path(std::path::Path::new(path))
                .with_context(|| format!("Failed to load size table from {}", path))?,
            None => {
                tracing::info!("Using builtin size table");
                SizeTable::builtin().context("Builtin size table is invalid")?
            }
        };

        Ok(Self::new(table))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // SKU endpoints
        .route("/api/sku", post(create_sku))
        .route("/api/sku/batch", post(create_sku_batch))

        // Reference data
        .route("/api/table", get(get_table))
        .route("/api/guide", get(get_measuring_guide))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy"
    }))
}

async fn create_sku(
    State(state): State<AppState>,
    payload: Result<Json<SkuRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(request) = payload?;
    let result = generate_sku(&state.table, &request)?;
    tracing::info!("Generated SKU {}", result.sku);

    let body = serde_json::to_value(result).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(body))
}

#[derive(Debug, Deserialize)]
struct BatchSkuRequest {
    requests: Vec<SkuRequest>,
}

async fn create_sku_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchSkuRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(payload) = payload?;
    let table = state.table.clone();

    // CPU-bound work: run Rayon on the blocking pool
    let results = tokio::task::spawn_blocking(move || generate_batch(&table, &payload.requests))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    let results: Vec<serde_json::Value> = results
        .into_iter()
        .map(|r| match r {
            Ok(sku) => serde_json::json!({ "ok": sku }),
            Err(e) => serde_json::json!({ "error": e.to_string(), "kind": e.kind() }),
        })
        .collect();

    Ok(Json(serde_json::json!({ "results": results })))
}

async fn get_table(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.table.to_json_value())
}

async fn get_measuring_guide() -> impl IntoResponse {
    let hints: serde_json::Map<String, serde_json::Value> = Dimension::all()
        .iter()
        .map(|d| (d.display_name().to_lowercase(), serde_json::Value::from(d.measuring_hint())))
        .collect();
    Json(serde_json::Value::Object(hints))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Resolver(ResolverError),
    Internal(String),
}

impl From<ResolverError> for AppError {
    fn from(err: ResolverError) -> Self {
        AppError::Resolver(err)
    }
}

// Malformed bodies report like any other validation failure
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Resolver(ResolverError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, kind, message) = match self {
            AppError::Resolver(err) => {
                let status = match err {
                    ResolverError::Validation(_) | ResolverError::OutOfRange(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    ResolverError::NotFound(_) => StatusCode::NOT_FOUND,
                    ResolverError::NoFit(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.kind(), err.to_string())
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
            "kind": kind
        }));

        (status, body).into_response()
    }
}
