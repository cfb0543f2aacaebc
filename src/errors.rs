//! Error types for the ModelHaus crate
//!
//! This module contains all error types that can be returned by ModelHaus operations.

use config::ConfigError;
use record_model::{ConfigurationError, ModelError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelHausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid model definition: {0}")]
    ModelDefinition(#[from] ConfigurationError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Model already registered: {0}")]
    ModelAlreadyRegistered(String),
}
