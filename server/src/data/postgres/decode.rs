//! PostgreSQL cell decoding
//!
//! Converts each cell of a result row to JSON by its runtime type.

use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::types::BigDecimal;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// Decode every column of a row, keeping result column order
pub fn decode_row(row: &PgRow) -> serde_json::Map<String, Value> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| (column.name().to_string(), decode_cell(row, idx)))
        .collect()
}

/// Decode a single cell; NULL and unsupported types become `null`
pub fn decode_cell(row: &PgRow, idx: usize) -> Value {
    let raw = match row.try_get_raw(idx) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::trace!(idx, error = %e, "Column not readable");
            return Value::Null;
        }
    };
    if raw.is_null() {
        return Value::Null;
    }
    let type_name = raw.type_info().name().to_string();

    let decoded: Result<Value, sqlx::Error> = match type_name.as_str() {
        "BOOL" => row.try_get::<bool, _>(idx).map(Value::from),
        "INT2" => row.try_get::<i16, _>(idx).map(Value::from),
        "INT4" => row.try_get::<i32, _>(idx).map(Value::from),
        "INT8" => row.try_get::<i64, _>(idx).map(Value::from),
        "OID" => row.try_get::<sqlx::postgres::types::Oid, _>(idx).map(|o| Value::from(o.0)),
        "FLOAT4" => row.try_get::<f32, _>(idx).map(|v| float_value(f64::from(v))),
        "FLOAT8" => row.try_get::<f64, _>(idx).map(float_value),
        "NUMERIC" => row.try_get::<BigDecimal, _>(idx).map(numeric_value),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CITEXT" => {
            row.try_get::<String, _>(idx).map(Value::String)
        }
        "DATE" => row
            .try_get::<chrono::NaiveDate, _>(idx)
            .map(|d| Value::String(d.format("%Y-%m-%d").to_string())),
        "TIME" => row
            .try_get::<chrono::NaiveTime, _>(idx)
            .map(|t| Value::String(t.format("%H:%M:%S%.f").to_string())),
        "TIMESTAMP" => row
            .try_get::<chrono::NaiveDateTime, _>(idx)
            .map(|t| Value::String(t.format("%Y-%m-%dT%H:%M:%S%.f").to_string())),
        "TIMESTAMPTZ" => row
            .try_get::<chrono::DateTime<chrono::Utc>, _>(idx)
            .map(|t| Value::String(t.to_rfc3339())),
        "JSON" | "JSONB" => row.try_get::<Value, _>(idx),
        "UUID" => row
            .try_get::<uuid::Uuid, _>(idx)
            .map(|u| Value::String(u.to_string())),
        "BYTEA" => row
            .try_get::<Vec<u8>, _>(idx)
            .map(|b| Value::String(format!("\\x{}", hex::encode(b)))),
        other => {
            tracing::trace!(idx, type_name = other, "No JSON mapping for column type");
            return Value::Null;
        }
    };

    decoded.unwrap_or_else(|e| {
        tracing::trace!(idx, type_name = %type_name, error = %e, "Cell decode failed");
        Value::Null
    })
}

/// Non-finite floats have no JSON form
fn float_value(v: f64) -> Value {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(v.to_string()))
}

/// Arbitrary-precision decimal text; NaN has no BigDecimal form
fn numeric_value(d: BigDecimal) -> Value {
    Value::String(d.to_string())
}
