//! Query builder utilities
//!
//! Conjunctive equality filters.

use crate::schema::KEY_FIELD;
use crate::validation::{check_field_name, ValidationError};
use serde_json::{Map, Value};

/// Equality filter over a model's columns; every condition must hold.
///
/// An empty query matches every row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    conditions: Vec<(String, Value)>,
}

impl Query {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Match rows whose primary key equals `key`
    pub fn by_key(key: Value) -> Self {
        Self::new().eq(KEY_FIELD, key)
    }

    /// Add an equality condition; a repeated field replaces the earlier value
    pub fn eq(mut self, field: &str, value: Value) -> Self {
        match self.conditions.iter_mut().find(|(name, _)| name == field) {
            Some(existing) => existing.1 = value,
            None => self.conditions.push((field.to_string(), value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.conditions
            .iter()
            .map(|(field, value)| (field.as_str(), value))
    }

    pub fn validate_fields(&self) -> Result<(), ValidationError> {
        self.conditions
            .iter()
            .try_for_each(|(field, _)| check_field_name(field))
    }
}

impl From<Map<String, Value>> for Query {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            conditions: map.into_iter().collect(),
        }
    }
}
