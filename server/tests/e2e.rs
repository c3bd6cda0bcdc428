//! Serves the real router over TCP and drives it with the client SDK

use std::sync::Arc;

use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use tablelens::{
    ClientError, ControllerState, FieldType, TableBrowser, TableClient, TableQuery, TableSource,
};
use tablelens_server::api::build_router;
use tablelens_server::data::{CatalogService, SqliteService};
use tokio::net::TcpListener;

async fn serve() -> String {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::raw_sql(
        "CREATE TABLE teams (id INTEGER PRIMARY KEY, name VARCHAR(64) NOT NULL);
         INSERT INTO teams (id, name) VALUES
            (7, 'Cowboys'), (12, 'Eagles'), (3, 'Bears'), (21, 'Bengals');
         CREATE TABLE \"game log\" (week INTEGER, note TEXT);
         INSERT INTO \"game log\" VALUES (1, 'opener');",
    )
    .execute(&pool)
    .await
    .unwrap();

    let catalog = Arc::new(CatalogService::Sqlite(Arc::new(SqliteService::from_pool(
        pool,
    ))));
    let router = build_router(catalog, &[]);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_lists_tables_in_name_order() {
    let client = TableClient::new(&serve().await).unwrap();
    assert_eq!(client.list_tables().await.unwrap(), vec!["game log", "teams"]);
}

#[tokio::test]
async fn test_exact_id_returns_cowboys() {
    let client = TableClient::new(&serve().await).unwrap();
    let result = client
        .fetch_table("teams", &TableQuery::new().with_filter("id", "7"))
        .await
        .unwrap();

    assert_eq!(result.rows.len(), 1);
    assert_eq!(
        serde_json::Value::Object(result.rows[0].clone()),
        json!({ "id": 7, "name": "Cowboys" })
    );
    let names: Vec<&str> = result.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name"]);
    assert!(matches!(result.fields[0].type_tag, FieldType::Name(_)));
}

#[tokio::test]
async fn test_cowboys_match_numeric_and_text_filters() {
    let client = TableClient::new(&serve().await).unwrap();

    let result = client
        .fetch_table("teams", &TableQuery::new().with_filter("id", ">5,<3"))
        .await
        .unwrap();
    let mut ids: Vec<i64> = result
        .rows
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, vec![7, 12, 21]);

    let result = client
        .fetch_table("teams", &TableQuery::new().with_filter("name", "cow"))
        .await
        .unwrap();
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0]["name"], "Cowboys");
}

#[tokio::test]
async fn test_row_keys_follow_column_order() {
    let client = TableClient::new(&serve().await).unwrap();
    let result = client
        .fetch_table("teams", &TableQuery::new().with_filter("name", "COW"))
        .await
        .unwrap();
    let keys: Vec<&str> = result.rows[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "name"]);
}

#[tokio::test]
async fn test_table_name_with_space_round_trips() {
    let client = TableClient::new(&serve().await).unwrap();
    let result = client
        .fetch_table("game log", &TableQuery::new())
        .await
        .unwrap();
    assert_eq!(result.rows[0]["note"], "opener");
}

#[tokio::test]
async fn test_unknown_table_is_not_found() {
    let client = TableClient::new(&serve().await).unwrap();
    let err = client
        .fetch_table("ghosts", &TableQuery::new())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    match err {
        ClientError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 500);
            assert_eq!(code.as_deref(), Some("TABLE_NOT_FOUND"));
            assert!(message.contains("ghosts"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_controller_applies_combined_filters() {
    let base_url = serve().await;
    let browser = TableBrowser::new(Arc::new(TableClient::new(&base_url).unwrap()));

    let controller = browser.controller("teams").await.unwrap();
    assert_eq!(controller.snapshot().rows().len(), 4);

    controller.set_filter("id", ">10,<4");
    controller.set_filter("name", "e");
    controller.flush().await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.state, ControllerState::Idle);
    assert!(snapshot.notice.is_none());
    let mut ids: Vec<i64> = snapshot
        .rows()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, vec![3, 12, 21]);
    assert_eq!(browser.cache().get("teams").unwrap().rows.len(), 3);
}

#[tokio::test]
async fn test_injection_text_is_bound_as_data() {
    let base_url = serve().await;
    let client = TableClient::new(&base_url).unwrap();
    let result = client
        .fetch_table(
            "teams",
            &TableQuery::new().with_filter("name", "x' OR '1'='1"),
        )
        .await
        .unwrap();
    assert!(result.rows.is_empty());

    let result = client
        .fetch_table("teams", &TableQuery::new().with_filter("id", "1 OR 1=1"))
        .await
        .unwrap();
    assert_eq!(result.rows.len(), 4);
}
