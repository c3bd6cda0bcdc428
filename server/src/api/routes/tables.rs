//! Table listing and filtered table reads
//!
//! Every query parameter except `limit` is a candidate column filter. Names
//! the live schema does not know are ignored by the filter compiler.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::types::ApiError;
use crate::core::constants::LIMIT_PARAM;
use crate::data::CatalogService;
use crate::data::executor::{QueryLimit, execute_table_query};
use crate::data::filters::FilterSpec;
use crate::data::types::QueryResult;

/// Error body shared by every failing table endpoint
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error category (`not_found`, `internal_error`)
    pub error: String,
    /// Machine-readable code (`TABLE_NOT_FOUND`, `QUERY_FAILED`, `CATALOG_FAILED`)
    pub code: String,
    /// Human-readable message, upstream database text for query failures
    pub message: String,
}

/// Build table API routes
pub fn routes(catalog: Arc<CatalogService>) -> Router<()> {
    Router::new()
        .route("/api/tables", get(list_tables))
        .route("/api/table/{table_name}", get(get_table))
        .with_state(catalog)
}

/// List tables of the connected database
#[utoipa::path(
    get,
    path = "/api/tables",
    tag = "tables",
    responses(
        (status = 200, description = "Table names ordered by name", body = Vec<String>),
        (status = 500, description = "Catalog lookup failed", body = ErrorResponse)
    )
)]
pub async fn list_tables(
    State(catalog): State<Arc<CatalogService>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let tables = catalog
        .repository()
        .list_tables()
        .await
        .map_err(ApiError::from_data)?;
    tracing::debug!(count = tables.len(), "Listed tables");
    Ok(Json(tables))
}

/// Read up to `limit` rows of a table matching the column filters
#[utoipa::path(
    get,
    path = "/api/table/{table_name}",
    tag = "tables",
    params(
        ("table_name" = String, Path, description = "Table name"),
        ("limit" = Option<String>, Query, description = "Row limit (default 25, clamped to 1..=1000)")
    ),
    responses(
        (status = 200, description = "Matching rows and field descriptors", body = QueryResult),
        (status = 500, description = "Unknown table, query or catalog failure", body = ErrorResponse)
    )
)]
pub async fn get_table(
    State(catalog): State<Arc<CatalogService>>,
    Path(table_name): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<QueryResult>, ApiError> {
    let limit = QueryLimit::parse(
        params
            .iter()
            .rev()
            .find(|(name, _)| name == LIMIT_PARAM)
            .map(|(_, value)| value.as_str()),
    );
    let spec = FilterSpec::from_pairs(params);

    let repo = catalog.repository();
    let result = execute_table_query(repo.as_ref(), &table_name, &spec, limit)
        .await
        .map_err(ApiError::from_data)?;
    Ok(Json(result))
}
