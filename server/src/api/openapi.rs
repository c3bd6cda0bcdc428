//! OpenAPI specification

use axum::http::header;
use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{health, tables};
use crate::data::types::{FieldDescriptor, QueryResult};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TableLens API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Browse database tables with per-column filters"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "tables", description = "Table listing and filtered reads")
    ),
    paths(
        health::health,
        tables::list_tables,
        tables::get_table,
    ),
    components(schemas(
        health::HealthResponse,
        tables::ErrorResponse,
        QueryResult,
        FieldDescriptor,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}
