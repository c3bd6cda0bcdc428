//! SQLite cell decoding by storage class

use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// Decode every column of a row, keeping result column order
pub fn decode_row(row: &SqliteRow) -> serde_json::Map<String, Value> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| (column.name().to_string(), decode_cell(row, idx)))
        .collect()
}

/// Decode a single cell; NULL becomes `null`, BLOBs hex text
pub fn decode_cell(row: &SqliteRow, idx: usize) -> Value {
    let storage = match row.try_get_raw(idx) {
        Ok(raw) if raw.is_null() => return Value::Null,
        Ok(raw) => raw.type_info().name().to_string(),
        Err(e) => {
            tracing::trace!(idx, error = %e, "Column not readable");
            return Value::Null;
        }
    };

    let decoded: Result<Value, sqlx::Error> = match storage.as_str() {
        "INTEGER" => row.try_get::<i64, _>(idx).map(Value::from),
        "REAL" => row.try_get::<f64, _>(idx).map(|v| {
            serde_json::Number::from_f64(v)
                .map(Value::Number)
                .unwrap_or(Value::Null)
        }),
        "TEXT" => row.try_get::<String, _>(idx).map(Value::String),
        "BLOB" => row
            .try_get::<Vec<u8>, _>(idx)
            .map(|b| Value::String(hex::encode(b))),
        other => {
            tracing::trace!(idx, storage = other, "No JSON mapping for storage class");
            return Value::Null;
        }
    };

    decoded.unwrap_or_else(|e| {
        tracing::trace!(idx, storage = %storage, error = %e, "Cell decode failed");
        Value::Null
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::sqlite::test_support::teams_pool;

    #[tokio::test]
    async fn test_decode_storage_classes() {
        let pool = teams_pool().await;
        let row: SqliteRow = sqlx::query("SELECT * FROM teams WHERE id = 7")
            .fetch_one(&pool)
            .await
            .unwrap();
        let decoded = decode_row(&row);
        assert_eq!(
            Value::Object(decoded),
            json!({
                "id": 7,
                "name": "Cowboys",
                "founded": "1960-01-28",
                "rating": 4.5,
                "logo": "cafe"
            })
        );
    }

    #[tokio::test]
    async fn test_decode_nulls() {
        let pool = teams_pool().await;
        let row: SqliteRow = sqlx::query("SELECT founded, rating, logo FROM teams WHERE id = 15")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(decode_cell(&row, 0), Value::Null);
        assert_eq!(decode_cell(&row, 1), Value::Null);
        assert_eq!(decode_cell(&row, 2), Value::Null);
    }
}
