//! Conversion utilities
//!
//! This module converts JSON document values into the typed
//! values bound to PostgreSQL statements.

use crate::types::{FieldType, PostgresValue};
use serde_json::Value;

/// Convert a JSON value for a column, honouring the declared type when the value fits it.
///
/// A value whose shape does not fit the declared type is inferred instead, and the
/// store decides whether it accepts it.
pub fn to_postgres_value(value: &Value, declared: Option<FieldType>) -> PostgresValue {
    match declared {
        Some(field_type) => {
            declared_value(value, field_type).unwrap_or_else(|| infer_postgres_value(value))
        }
        None => infer_postgres_value(value),
    }
}

fn declared_value(value: &Value, field_type: FieldType) -> Option<PostgresValue> {
    if value.is_null() {
        return Some(PostgresValue::Null(Some(field_type)));
    }

    match field_type {
        FieldType::Text => value.as_str().map(|s| PostgresValue::Text(s.to_string())),
        FieldType::SmallInt => value
            .as_i64()
            .and_then(|i| i16::try_from(i).ok())
            .map(PostgresValue::SmallInt),
        FieldType::Integer => value
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(PostgresValue::Integer),
        FieldType::BigInt => value.as_i64().map(PostgresValue::BigInt),
        FieldType::Real => value.as_f64().map(|f| PostgresValue::Real(f as f32)),
        FieldType::Double => value.as_f64().map(PostgresValue::Float),
        FieldType::Boolean => value.as_bool().map(PostgresValue::Boolean),
        FieldType::Uuid => value
            .as_str()
            .and_then(|s| uuid::Uuid::parse_str(s).ok())
            .map(PostgresValue::Uuid),
        FieldType::Timestamp => value
            .as_str()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| PostgresValue::Timestamp(dt.with_timezone(&chrono::Utc))),
        FieldType::Date => value
            .as_str()
            .and_then(|s| chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .map(PostgresValue::Date),
        FieldType::Json => Some(PostgresValue::Json(value.clone())),
        FieldType::TextArray => value.as_array().and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(PostgresValue::TextArray)
        }),
    }
}

/// Infer a bind type from the shape of a JSON value alone
pub fn infer_postgres_value(value: &Value) -> PostgresValue {
    match value {
        Value::String(s) => {
            // Try to parse as RFC3339 timestamp first
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
                PostgresValue::Timestamp(dt.with_timezone(&chrono::Utc))
            } else if let Ok(uuid) = uuid::Uuid::parse_str(s) {
                PostgresValue::Uuid(uuid)
            } else {
                PostgresValue::Text(s.clone())
            }
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                match i32::try_from(i) {
                    Ok(small) => PostgresValue::Integer(small),
                    Err(_) => PostgresValue::BigInt(i),
                }
            } else if let Some(f) = n.as_f64() {
                PostgresValue::Float(f)
            } else {
                PostgresValue::Text(n.to_string())
            }
        }
        Value::Bool(b) => PostgresValue::Boolean(*b),
        Value::Null => PostgresValue::Null(None),
        other => PostgresValue::Json(other.clone()),
    }
}
