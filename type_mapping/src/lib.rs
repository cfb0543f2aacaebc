//! Type mapping between declared model fields and PostgreSQL
//! This crate provides the field type vocabulary used across the modelhaus ecosystem

pub mod convert;
pub mod types;
pub mod validate;

pub use convert::{infer_postgres_value, to_postgres_value};
pub use types::{FieldType, PostgresValue};
pub use validate::{NonNegativeInteger, RuleViolation};
