//! Core ModelHaus functionality
//!
//! This module contains the main ModelHaus struct: it owns the connection pool,
//! hands the shared record store to model definitions and keeps named models.

use record_model::{GenericModel, Model, PartialModel, PgRecordStore, RecordStore};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ModelHausError;
use config::{AppConfig, DatabaseConfig};

/// Main ModelHaus coordinator that manages the database connection and models
pub struct ModelHaus {
    store: Arc<PgRecordStore>,
    models: HashMap<String, Box<dyn std::any::Any + Send + Sync>>,
}

impl ModelHaus {
    /// Create new ModelHaus with database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, ModelHausError> {
        config.validate()?;
        let connection_string = config.connection_string();

        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect(&connection_string).await?;
        crate::debug_log!(
            host = %config.host,
            database = %config.database,
            max_connections = config.max_connections,
            "connection pool ready"
        );

        Ok(Self::with_pool(pool))
    }

    /// Create ModelHaus from the configuration file named by `MODELHAUS_CONFIG`
    pub async fn from_config_file() -> Result<Self, ModelHausError> {
        let config = AppConfig::load()?;
        Self::new(config.database).await
    }

    /// Wrap an existing pool
    pub fn with_pool(pool: PgPool) -> Self {
        Self {
            store: Arc::new(PgRecordStore::new(pool)),
            models: HashMap::new(),
        }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        self.store.pool()
    }

    /// Shared record store handle for model definitions
    pub fn store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }

    /// Extend a model definition, supplying this coordinator's store when none is set
    pub fn extend(&self, partial: PartialModel) -> Result<GenericModel, ModelHausError> {
        let partial = if partial.has_connection() {
            partial
        } else {
            partial.connection(self.store())
        };
        Ok(GenericModel::extend(partial)?)
    }

    /// Register a model with a given name
    pub fn register_model<T>(&mut self, name: String, model: T) -> Result<(), ModelHausError>
    where
        T: Model + 'static,
    {
        if self.models.contains_key(&name) {
            return Err(ModelHausError::ModelAlreadyRegistered(name));
        }

        crate::trace_log!(model = %name, table = model.table_name(), "registering model");
        self.models.insert(name, Box::new(model));
        Ok(())
    }

    /// Get a registered model by name
    pub fn get_model<T>(&self, name: &str) -> Result<&T, ModelHausError>
    where
        T: Model + 'static,
    {
        self.models
            .get(name)
            .and_then(|model| model.downcast_ref::<T>())
            .ok_or_else(|| ModelHausError::ModelNotFound(name.to_string()))
    }

    /// List all registered model names
    pub fn list_models(&self) -> Vec<&String> {
        self.models.keys().collect()
    }

    /// Remove a model by name
    pub fn unregister_model(&mut self, name: &str) -> Result<(), ModelHausError> {
        self.models
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ModelHausError::ModelNotFound(name.to_string()))
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), ModelHausError> {
        sqlx::query("SELECT 1").fetch_one(self.pool()).await?;
        Ok(())
    }
}
