//! Health check endpoint

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::CatalogService;
use crate::data::sql::Backend;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Database backend being browsed
    #[schema(value_type = String, example = "postgres")]
    pub backend: Backend,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(State(catalog): State<Arc<CatalogService>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            backend: catalog.backend(),
        }),
    )
}

/// Plain-text liveness check served at `/`
pub async fn liveness() -> &'static str {
    "TableLens server is running"
}
