use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use crate::error::ClientError;
use crate::source::TableSource;
use crate::types::{QueryResult, TableQuery};

const CLIENT_TIMEOUT_SECS: u64 = 30;

/// Error body returned by the server
#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: String,
}

/// HTTP client for a TableLens server
#[derive(Debug, Clone)]
pub struct TableClient {
    client: reqwest::Client,
    base_url: Url,
}

impl TableClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:3001`)
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .build()?;
        Self::with_client(client, base_url)
    }

    /// Create a client over a preconfigured `reqwest::Client`
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        tracing::debug!(base_url = %base_url, "TableLens client initialized");
        Ok(Self { client, base_url })
    }

    /// Build `{base}/api/{segments...}`, each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn error_from(resp: reqwest::Response) -> ClientError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => ClientError::Api {
                status: status.as_u16(),
                code: body.code,
                message: body.message,
            },
            Err(_) => ClientError::Api {
                status: status.as_u16(),
                code: None,
                message: if text.is_empty() {
                    format!("Request failed with status {status}")
                } else {
                    text
                },
            },
        }
    }
}

#[async_trait]
impl TableSource for TableClient {
    async fn list_tables(&self) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint(&["tables"])?;
        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn fetch_table(
        &self,
        table: &str,
        query: &TableQuery,
    ) -> Result<QueryResult, ClientError> {
        let url = self.endpoint(&["table", table])?;
        let resp = self.client.get(url).query(&query.pairs()).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_list_tables() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tables");
                then.status(200).json_body(json!(["games", "teams"]));
            })
            .await;

        let client = TableClient::new(&server.base_url()).unwrap();
        let tables = client.list_tables().await.unwrap();

        mock.assert_async().await;
        assert_eq!(tables, vec!["games", "teams"]);
    }

    #[tokio::test]
    async fn test_fetch_table_sends_filters_and_limit() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/table/teams")
                    .query_param("id", ">10,<4")
                    .query_param("name", "100% Real")
                    .query_param("limit", "5");
                then.status(200).json_body(json!({
                    "rows": [{"id": 15, "name": "100% Real_Team"}],
                    "fields": [{"name": "id", "type": 23}, {"name": "name", "type": 1043}]
                }));
            })
            .await;

        let client = TableClient::new(&server.base_url()).unwrap();
        let query = TableQuery::new()
            .with_filter("id", ">10,<4")
            .with_filter("name", "100% Real")
            .with_filter("rating", "")
            .with_limit(5);
        let result = client.fetch_table("teams", &query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0]["id"], 15);
        assert_eq!(result.fields[1].name, "name");
    }

    #[test]
    fn test_endpoint_encodes_table_as_one_segment() {
        let client = TableClient::new("http://localhost:3001/").unwrap();
        let url = client.endpoint(&["table", "odd/name ?"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/table/odd%2Fname%20%3F");

        let client = TableClient::new("http://localhost:3001/lens").unwrap();
        let url = client.endpoint(&["tables"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/lens/api/tables");
    }

    #[tokio::test]
    async fn test_error_body_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/table/ghosts");
                then.status(500).json_body(json!({
                    "error": "internal_error",
                    "code": "TABLE_NOT_FOUND",
                    "message": "Table not found: ghosts"
                }));
            })
            .await;

        let client = TableClient::new(&server.base_url()).unwrap();
        let err = client
            .fetch_table("ghosts", &TableQuery::new())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Table not found: ghosts");
        match err {
            ClientError::Api { status, code, .. } => {
                assert_eq!(status, 500);
                assert_eq!(code.as_deref(), Some("TABLE_NOT_FOUND"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tables");
                then.status(502).body("bad gateway");
            })
            .await;

        let client = TableClient::new(&server.base_url()).unwrap();
        let err = client.list_tables().await.unwrap_err();
        match err {
            ClientError::Api {
                status, message, ..
            } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            TableClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
        assert!(matches!(
            TableClient::new("mailto:someone@example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
