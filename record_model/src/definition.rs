//! Model definitions
//!
//! A [`PartialModel`] collects a table name, field list and connection; extending it
//! validates them once and yields a [`GenericModel`] carrying the full verb set.

use crate::errors::ConfigurationError;
use crate::schema::TableSchema;
use crate::traits::{Model, RecordStore};
use std::sync::Arc;
use type_mapping::FieldType;

/// Model definition under construction; nothing is validated until [`GenericModel::extend`]
#[derive(Clone, Default)]
pub struct PartialModel {
    table: Option<String>,
    fields: Option<Vec<(String, FieldType)>>,
    key_type: Option<FieldType>,
    connection: Option<Arc<dyn RecordStore>>,
}

impl std::fmt::Debug for PartialModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialModel")
            .field("table", &self.table)
            .field("fields", &self.fields)
            .field("key_type", &self.key_type)
            .field("has_connection", &self.connection.is_some())
            .finish()
    }
}

impl PartialModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// Declare one field, appended after those already declared
    pub fn field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields
            .get_or_insert_with(Vec::new)
            .push((name.to_string(), field_type));
        self
    }

    /// Declare the whole field list at once, replacing any earlier declarations
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldType)>,
        S: Into<String>,
    {
        self.fields = Some(
            fields
                .into_iter()
                .map(|(name, field_type)| (name.into(), field_type))
                .collect(),
        );
        self
    }

    /// Type of the `key` column; defaults to UUID
    pub fn key_type(mut self, key_type: FieldType) -> Self {
        self.key_type = Some(key_type);
        self
    }

    pub fn connection(mut self, connection: Arc<dyn RecordStore>) -> Self {
        self.connection = Some(connection);
        self
    }

    pub fn has_connection(&self) -> bool {
        self.connection.is_some()
    }
}

/// Validated model definition: table layout plus the store it lives in
#[derive(Clone)]
pub struct ModelDefinition {
    schema: TableSchema,
    connection: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for ModelDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelDefinition")
            .field("schema", &self.schema)
            .field("connection", &self.connection)
            .finish()
    }
}

impl ModelDefinition {
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn connection(&self) -> &Arc<dyn RecordStore> {
        &self.connection
    }
}

impl TryFrom<PartialModel> for ModelDefinition {
    type Error = ConfigurationError;

    fn try_from(partial: PartialModel) -> Result<Self, Self::Error> {
        let connection = partial
            .connection
            .ok_or(ConfigurationError::MissingConnection)?;
        let table = partial.table.ok_or(ConfigurationError::MissingTable)?;
        let fields = partial.fields.ok_or(ConfigurationError::MissingFields)?;

        let schema = TableSchema::new(
            &table,
            partial.key_type.unwrap_or(FieldType::Uuid),
            fields,
        )?;

        Ok(Self { schema, connection })
    }
}

/// Model for one table, usable directly or wrapped by a concrete model type
#[derive(Debug, Clone)]
pub struct GenericModel {
    definition: ModelDefinition,
}

impl GenericModel {
    /// Validate a partial definition and attach the model verbs to it.
    ///
    /// Fails when the connection, table or fields are missing, or when a name is not a
    /// usable identifier.
    pub fn extend(partial: PartialModel) -> Result<Self, ConfigurationError> {
        let definition = ModelDefinition::try_from(partial)?;
        tracing::debug!(
            table = definition.schema().table_name(),
            fields = definition.schema().fields().len(),
            "model extended"
        );
        Ok(Self { definition })
    }
}

impl Model for GenericModel {
    fn definition(&self) -> &ModelDefinition {
        &self.definition
    }
}
