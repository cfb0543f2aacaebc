//! Convenience re-exports for common record-model usage

// Core traits
pub use crate::traits::{Model, RecordStore};

// Model definition
pub use crate::definition::{GenericModel, ModelDefinition, PartialModel};
pub use crate::schema::{TableSchema, KEY_FIELD};

// Documents and queries
pub use crate::document::{Document, Values};
pub use crate::query_builder::{FindOptions, OrderBy, Query, SortOrder};

// Error types
pub use crate::errors::{ConfigurationError, ModelError, StoreFailure};

// Postgres store
pub use crate::postgres::PgRecordStore;

// Field types
pub use type_mapping::FieldType;

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json::{json, Value};
pub use sqlx::PgPool;
pub use uuid::Uuid;
