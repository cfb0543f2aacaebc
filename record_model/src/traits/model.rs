use crate::definition::ModelDefinition;
use crate::document::{Document, Values};
use crate::errors::ModelError;
use crate::query_builder::{FindOptions, Query};
use async_trait::async_trait;
use serde_json::Value;

/// CRUD verbs shared by every table model.
///
/// Implementors only supply their [`ModelDefinition`]; all verbs are provided.
///
/// ```ignore
/// struct Accounts(GenericModel);
///
/// impl Model for Accounts {
///     fn definition(&self) -> &ModelDefinition {
///         self.0.definition()
///     }
/// }
///
/// let rich = accounts.find(Query::new().eq("tier", json!("gold")), FindOptions::new()).await?;
/// ```
#[async_trait]
pub trait Model: Send + Sync {
    fn definition(&self) -> &ModelDefinition;

    fn table_name(&self) -> &str {
        self.definition().schema().table_name()
    }

    /// Declared field names, optionally followed by `key`
    fn field_names(&self, include_key: bool) -> Vec<&str> {
        self.definition().schema().field_names(include_key)
    }

    /// Insert a row; a uniqueness violation fails with `EntityExists`
    async fn create(&self, values: Values) -> Result<Document, ModelError> {
        let definition = self.definition();
        let schema = definition.schema();
        tracing::trace!(table = schema.table_name(), fields = values.len(), "create");

        values.validate_fields()?;

        let documents = definition
            .connection()
            .insert(schema, &values)
            .await
            .map_err(|failure| ModelError::from_insert_failure(schema.table_name(), failure))?;

        first_document(schema.table_name(), documents)
    }

    async fn find(&self, query: Query, options: FindOptions) -> Result<Vec<Document>, ModelError> {
        let definition = self.definition();
        let schema = definition.schema();
        tracing::trace!(table = schema.table_name(), "find");

        query.validate_fields()?;
        options.validate_columns()?;

        let documents = definition
            .connection()
            .select(schema, &query, &options.order_by, None)
            .await?;
        Ok(documents)
    }

    /// Fetch at most one matching row; zero matches fail with `EntityNotFound`
    async fn find_one(&self, query: Query) -> Result<Document, ModelError> {
        let definition = self.definition();
        let schema = definition.schema();
        tracing::trace!(table = schema.table_name(), "find_one");

        query.validate_fields()?;

        let documents = definition
            .connection()
            .select(schema, &query, &[], Some(1))
            .await?;
        first_document(schema.table_name(), documents)
    }

    async fn count(&self, query: Query) -> Result<i64, ModelError> {
        let definition = self.definition();
        let schema = definition.schema();
        tracing::trace!(table = schema.table_name(), "count");

        query.validate_fields()?;

        let raw = definition.connection().count(schema, &query).await?;
        parse_count(&raw)
    }

    async fn update(&self, query: Query, values: Values) -> Result<Vec<Document>, ModelError> {
        let definition = self.definition();
        let schema = definition.schema();
        tracing::trace!(table = schema.table_name(), fields = values.len(), "update");

        if values.is_empty() {
            return Err(ModelError::EmptyValues {
                table: schema.table_name().to_string(),
            });
        }
        query.validate_fields()?;
        values.validate_fields()?;

        let documents = definition
            .connection()
            .update(schema, &query, &values)
            .await?;
        Ok(documents)
    }

    async fn destroy(&self, query: Query) -> Result<Vec<Document>, ModelError> {
        let definition = self.definition();
        let schema = definition.schema();
        tracing::trace!(table = schema.table_name(), "destroy");

        query.validate_fields()?;

        let documents = definition.connection().delete(schema, &query).await?;
        Ok(documents)
    }

    /// Write a document's declared fields back to its row; other properties are dropped
    async fn save(&self, document: &Document) -> Result<Document, ModelError> {
        let key = document.key().cloned().ok_or(ModelError::MissingKey)?;
        let values = document.project(self.field_names(false));

        let documents = self.update(Query::by_key(key), values).await?;
        first_document(self.table_name(), documents)
    }

    /// Remove the row a document was read from
    async fn delete(&self, document: &Document) -> Result<Document, ModelError> {
        let key = document.key().cloned().ok_or(ModelError::MissingKey)?;

        let documents = self.destroy(Query::by_key(key)).await?;
        first_document(self.table_name(), documents)
    }
}

fn first_document(table: &str, documents: Vec<Document>) -> Result<Document, ModelError> {
    documents
        .into_iter()
        .next()
        .ok_or_else(|| ModelError::entity_not_found(table))
}

/// Counts arrive as numbers or as base-10 text depending on the driver
pub(crate) fn parse_count(raw: &Value) -> Result<i64, ModelError> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ModelError::InvalidCount(n.to_string())),
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|e| ModelError::InvalidCount(format!("{}: {}", s, e))),
        other => Err(ModelError::InvalidCount(other.to_string())),
    }
}
