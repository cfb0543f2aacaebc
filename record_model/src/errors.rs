use crate::validation::ValidationError;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a [`RecordStore`](crate::traits::RecordStore), classified at the adapter boundary
#[derive(Error, Debug)]
pub enum StoreFailure {
    #[error("Unique constraint violation: {source}")]
    UniqueViolation { source: BoxError },

    #[error("{source}")]
    Unclassified { source: BoxError },
}

impl StoreFailure {
    pub fn unique_violation(source: impl Into<BoxError>) -> Self {
        Self::UniqueViolation {
            source: source.into(),
        }
    }

    pub fn unclassified(source: impl Into<BoxError>) -> Self {
        Self::Unclassified {
            source: source.into(),
        }
    }
}

/// A model definition that cannot be extended
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("No connection was set in the model")]
    MissingConnection,

    #[error("No table name was set in the model")]
    MissingTable,

    #[error("No fields were set in the model")]
    MissingFields,

    #[error("Field 'key' is reserved for the primary key")]
    ReservedKeyField,

    #[error("Field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Entity already exists in {table}")]
    EntityExists {
        table: String,
        #[source]
        source: StoreFailure,
    },

    #[error("Entity not found in {table}")]
    EntityNotFound { table: String },

    #[error("Invalid model configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] ValidationError),

    #[error("Document has no key")]
    MissingKey,

    #[error("No values to update in {table}")]
    EmptyValues { table: String },

    #[error("Invalid count value: {0}")]
    InvalidCount(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreFailure),
}

impl ModelError {
    pub fn entity_not_found(table: &str) -> Self {
        Self::EntityNotFound {
            table: table.to_string(),
        }
    }

    /// Translate a failed insert: uniqueness violations become `EntityExists`, anything else passes through.
    pub fn from_insert_failure(table: &str, failure: StoreFailure) -> Self {
        match failure {
            failure @ StoreFailure::UniqueViolation { .. } => {
                tracing::warn!(table, error = %failure, "insert rejected by unique constraint");
                Self::EntityExists {
                    table: table.to_string(),
                    source: failure,
                }
            }
            failure @ StoreFailure::Unclassified { .. } => Self::Store(failure),
        }
    }

    pub fn is_entity_exists(&self) -> bool {
        matches!(self, Self::EntityExists { .. })
    }

    pub fn is_entity_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. })
    }
}
