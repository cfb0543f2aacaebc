//! Type mapping definitions
//!
//! This module provides the declared field types of a model
//! and the typed values they are bound as.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declared type of a model field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Boolean,
    Uuid,
    Timestamp,
    Date,
    Json,
    TextArray,
}

impl FieldType {
    /// PostgreSQL type name used when casting bound parameters
    pub fn pg_type(&self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::SmallInt => "SMALLINT",
            FieldType::Integer => "INTEGER",
            FieldType::BigInt => "BIGINT",
            FieldType::Real => "REAL",
            FieldType::Double => "DOUBLE PRECISION",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Uuid => "UUID",
            FieldType::Timestamp => "TIMESTAMPTZ",
            FieldType::Date => "DATE",
            FieldType::Json => "JSONB",
            FieldType::TextArray => "TEXT[]",
        }
    }
}

/// A JSON value converted to the concrete type it is bound as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PostgresValue {
    Text(String),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    Real(f32),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    Timestamp(chrono::DateTime<chrono::Utc>),
    Date(chrono::NaiveDate),
    Json(serde_json::Value),
    TextArray(Vec<String>),
    /// NULL, typed when the target column is declared
    Null(Option<FieldType>),
}

impl PostgresValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PostgresValue::Null(_))
    }
}
