//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use super::middleware;
use super::openapi::openapi_json;
use super::routes::{health, tables};
use crate::core::CoreApp;
use crate::data::CatalogService;

/// Build the full application router over a catalog service
pub fn build_router(catalog: Arc<CatalogService>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(health::liveness))
        .route("/api/health", get(health::health))
        .route("/api/openapi.json", get(openapi_json))
        .with_state(Arc::clone(&catalog))
        .merge(tables::routes(catalog))
        .fallback(middleware::handle_404)
        .layer(CompressionLayer::new())
        .layer(middleware::cors(cors_origins))
        .layer(middleware::trace())
}

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Serve until shutdown is triggered; returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self { app } = self;
        let shutdown = app.shutdown.clone();

        let addr = SocketAddr::new(app.config.server.host.parse()?, app.config.server.port);
        let router = build_router(Arc::clone(&app.catalog), &app.config.server.cors_origins);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(
            address = %addr,
            backend = %app.catalog.backend(),
            "Server listening"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::data::SqliteService;
    use crate::data::sqlite::test_support::teams_pool;

    async fn router(origins: &[String]) -> Router {
        let catalog = Arc::new(CatalogService::Sqlite(Arc::new(SqliteService::from_pool(
            teams_pool().await,
        ))));
        build_router(catalog, origins)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_liveness() {
        let (status, body) = send(router(&[]).await, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(String::from_utf8(body).unwrap(), "TableLens server is running");
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let (status, body) = send(router(&[]).await, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["backend"], "sqlite");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_openapi_served() {
        let (status, body) = send(router(&[]).await, get("/api/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(body["paths"]["/api/tables"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = send(router(&[]).await, get("/api/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["code"], "ROUTE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_cors_any_origin_when_unconfigured() {
        let request = Request::builder()
            .uri("/api/tables")
            .header(header::ORIGIN, "http://example.test")
            .body(Body::empty())
            .unwrap();
        let response = router(&[]).await.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_restricted_origins() {
        let origins = vec!["http://allowed.test".to_string()];
        let request = Request::builder()
            .uri("/api/tables")
            .header(header::ORIGIN, "http://allowed.test")
            .body(Body::empty())
            .unwrap();
        let response = router(&origins).await.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://allowed.test"
        );

        let request = Request::builder()
            .uri("/api/tables")
            .header(header::ORIGIN, "http://other.test")
            .body(Body::empty())
            .unwrap();
        let response = router(&origins).await.oneshot(request).await.unwrap();
        assert!(
            !response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
    }
}
