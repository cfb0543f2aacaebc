//! Record Model - Active-record style data access for ModelHaus
//!
//! This crate provides the model definition and CRUD verbs, the record store
//! boundary with its PostgreSQL implementation, and identifier validation.

pub mod definition;
pub mod document;
pub mod errors;
pub mod postgres;
pub mod prelude;
pub mod query_builder;
pub mod schema;
pub mod traits;
pub mod validation;

pub use definition::{GenericModel, ModelDefinition, PartialModel};
pub use document::{Document, Values};
pub use errors::{BoxError, ConfigurationError, ModelError, StoreFailure};
pub use postgres::PgRecordStore;
pub use query_builder::{FindOptions, OrderBy, Query, SortOrder};
pub use schema::{FieldSpec, TableSchema, KEY_FIELD};
pub use traits::*;
pub use type_mapping::FieldType;
pub use validation::{ValidatedFieldName, ValidatedTableName, ValidationError};

use sqlx::PgPool;

pub type DbPool = PgPool;
