//! Shared API types
//!
//! Error responses are always JSON `{ error, code, message }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::data::{DataError, SchemaLookupError};

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    NotFound { code: String, message: String },
    Internal { code: String, message: String },
}

impl ApiError {
    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Internal {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Map a data layer failure onto a response
    ///
    /// Every data failure is a 500; `code` tells an unknown table apart from a
    /// failed query. Query and catalog failures keep the upstream database
    /// message so the client can show it.
    pub fn from_data(e: DataError) -> Self {
        match e {
            DataError::SchemaLookup(SchemaLookupError::UnknownTable(table)) => {
                tracing::debug!(table = %table, "Unknown table requested");
                Self::internal("TABLE_NOT_FOUND", format!("Table not found: {}", table))
            }
            DataError::SchemaLookup(err @ SchemaLookupError::Catalog { .. }) => {
                tracing::error!(error = %err, "Catalog lookup failed");
                Self::internal("CATALOG_FAILED", err.to_string())
            }
            DataError::Query(err) => {
                tracing::error!(backend = err.backend, error = %err.message, "Table query failed");
                Self::internal("QUERY_FAILED", err.message)
            }
            other => {
                tracing::error!(error = %other, "Data error");
                Self::internal("INTERNAL", "Database operation failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Internal { code, message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                code,
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::data::QueryError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_table_is_500_with_own_code() {
        let response = ApiError::from_data(DataError::unknown_table("ghosts")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["code"], "TABLE_NOT_FOUND");
        assert_eq!(body["message"], "Table not found: ghosts");
    }

    #[tokio::test]
    async fn test_query_error_keeps_upstream_message() {
        let err = DataError::Query(QueryError {
            backend: "postgres",
            message: "canceling statement due to statement timeout".to_string(),
        });
        let response = ApiError::from_data(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "QUERY_FAILED");
        assert_eq!(
            body["message"],
            "canceling statement due to statement timeout"
        );
    }

    #[tokio::test]
    async fn test_catalog_error_is_500() {
        let err = DataError::catalog("sqlite", "pool timed out");
        let response = ApiError::from_data(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "CATALOG_FAILED");
        assert!(body["message"].as_str().unwrap().contains("pool timed out"));
    }

    #[tokio::test]
    async fn test_config_error_is_generic_500() {
        let response =
            ApiError::from_data(DataError::Config("missing path".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL");
        assert_eq!(body["message"], "Database operation failed");
    }
}
