//! Table schema of a model: table name, key type and declared fields.

use crate::errors::ConfigurationError;
use crate::validation::{ValidatedFieldName, ValidatedTableName};
use type_mapping::FieldType;

/// Name of the primary key column every model carries
pub const KEY_FIELD: &str = "key";

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    name: ValidatedFieldName,
    field_type: FieldType,
}

impl FieldSpec {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }
}

/// Validated, immutable layout of a model's table
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    table: ValidatedTableName,
    key_type: FieldType,
    fields: Vec<FieldSpec>,
}

impl TableSchema {
    /// Validate a table layout; field order is kept as declared
    pub fn new<I, S>(table: &str, key_type: FieldType, fields: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (S, FieldType)>,
        S: AsRef<str>,
    {
        let table = ValidatedTableName::new(table)?;

        let mut specs: Vec<FieldSpec> = Vec::new();
        for (name, field_type) in fields {
            let name = name.as_ref();
            if name == KEY_FIELD {
                return Err(ConfigurationError::ReservedKeyField);
            }
            if specs.iter().any(|spec| spec.name() == name) {
                return Err(ConfigurationError::DuplicateField(name.to_string()));
            }
            specs.push(FieldSpec {
                name: ValidatedFieldName::new(name)?,
                field_type,
            });
        }

        Ok(Self {
            table,
            key_type,
            fields: specs,
        })
    }

    pub fn table(&self) -> &ValidatedTableName {
        &self.table
    }

    pub fn table_name(&self) -> &str {
        self.table.as_str()
    }

    pub fn key_type(&self) -> FieldType {
        self.key_type
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Declared field names in declaration order, with `key` appended when requested
    pub fn field_names(&self, include_key: bool) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.iter().map(FieldSpec::name).collect();
        if include_key {
            names.push(KEY_FIELD);
        }
        names
    }

    /// Declared type of a column, `None` for columns the model does not declare
    pub fn column_type(&self, column: &str) -> Option<FieldType> {
        if column == KEY_FIELD {
            return Some(self.key_type);
        }
        self.fields
            .iter()
            .find(|spec| spec.name() == column)
            .map(FieldSpec::field_type)
    }
}
