//! Query builder utilities
//!
//! SQL statement generation for the Postgres record store.

use crate::document::Values;
use crate::query_builder::ordering::OrderBy;
use crate::query_builder::query::Query;
use crate::schema::TableSchema;
use crate::validation::{check_field_name, quote_identifier, ValidationError};
use serde_json::Value;
use type_mapping::{to_postgres_value, PostgresValue};

/// jsonb_build_object accepts at most 100 arguments
const PAIRS_PER_OBJECT: usize = 50;

/// A generated statement and its parameters in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<PostgresValue>,
}

/// Builds statements for one table; every row comes back as a single `document` jsonb column
pub struct StatementBuilder<'a> {
    schema: &'a TableSchema,
    params: Vec<PostgresValue>,
}

impl<'a> StatementBuilder<'a> {
    pub fn new(schema: &'a TableSchema) -> Self {
        Self {
            schema,
            params: Vec::new(),
        }
    }

    pub fn insert(mut self, values: &Values) -> Result<Statement, ValidationError> {
        values.validate_fields()?;

        let mut sql = format!("INSERT INTO {}", self.table());
        if values.is_empty() {
            sql.push_str(" DEFAULT VALUES");
        } else {
            let mut columns = Vec::with_capacity(values.len());
            let mut placeholders = Vec::with_capacity(values.len());
            for (column, value) in values.iter() {
                columns.push(quote_identifier(column));
                placeholders.push(self.placeholder(column, value));
            }
            sql.push_str(&format!(
                " ({}) VALUES ({})",
                columns.join(", "),
                placeholders.join(", ")
            ));
        }
        sql.push_str(" RETURNING ");
        sql.push_str(&self.document_expression());

        Ok(self.finish(sql))
    }

    pub fn select(
        mut self,
        query: &Query,
        order_by: &[OrderBy],
        limit: Option<i64>,
    ) -> Result<Statement, ValidationError> {
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.document_expression(),
            self.table()
        );
        self.push_where_clause(&mut sql, query)?;

        if !order_by.is_empty() {
            let clauses = order_by
                .iter()
                .map(|clause| {
                    check_field_name(&clause.column)?;
                    Ok(format!(
                        "{} {}",
                        quote_identifier(&clause.column),
                        clause.direction.to_sql()
                    ))
                })
                .collect::<Result<Vec<_>, ValidationError>>()?;
            sql.push_str(" ORDER BY ");
            sql.push_str(&clauses.join(", "));
        }

        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(self.finish(sql))
    }

    pub fn count(mut self, query: &Query) -> Result<Statement, ValidationError> {
        let mut sql = format!("SELECT COUNT(*) AS count FROM {}", self.table());
        self.push_where_clause(&mut sql, query)?;
        Ok(self.finish(sql))
    }

    /// SET parameters are numbered first, WHERE parameters after them
    pub fn update(mut self, query: &Query, values: &Values) -> Result<Statement, ValidationError> {
        values.validate_fields()?;

        let assignments = values
            .iter()
            .map(|(column, value)| {
                let placeholder = self.placeholder(column, value);
                format!("{} = {}", quote_identifier(column), placeholder)
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!("UPDATE {} SET {}", self.table(), assignments);
        self.push_where_clause(&mut sql, query)?;
        sql.push_str(" RETURNING ");
        sql.push_str(&self.document_expression());

        Ok(self.finish(sql))
    }

    pub fn delete(mut self, query: &Query) -> Result<Statement, ValidationError> {
        let mut sql = format!("DELETE FROM {}", self.table());
        self.push_where_clause(&mut sql, query)?;
        sql.push_str(" RETURNING ");
        sql.push_str(&self.document_expression());

        Ok(self.finish(sql))
    }

    fn push_where_clause(&mut self, sql: &mut String, query: &Query) -> Result<(), ValidationError> {
        if query.is_empty() {
            return Ok(());
        }

        let mut conditions = Vec::new();
        for (column, value) in query.conditions() {
            check_field_name(column)?;
            if value.is_null() {
                conditions.push(format!("{} IS NULL", quote_identifier(column)));
            } else {
                let placeholder = self.placeholder(column, value);
                conditions.push(format!("{} = {}", quote_identifier(column), placeholder));
            }
        }

        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
        Ok(())
    }

    /// Bind a value and return its placeholder, cast to the declared column type when known
    fn placeholder(&mut self, column: &str, value: &Value) -> String {
        let declared = self.schema.column_type(column);
        self.params.push(to_postgres_value(value, declared));
        let index = self.params.len();

        match declared {
            Some(field_type) => format!("${}::{}", index, field_type.pg_type()),
            None => format!("${}", index),
        }
    }

    fn table(&self) -> String {
        quote_identifier(self.schema.table_name())
    }

    fn document_expression(&self) -> String {
        let pairs = self
            .schema
            .field_names(true)
            .into_iter()
            .map(|name| format!("'{}', {}", name, quote_identifier(name)))
            .collect::<Vec<_>>();

        let objects = pairs
            .chunks(PAIRS_PER_OBJECT)
            .map(|chunk| format!("jsonb_build_object({})", chunk.join(", ")))
            .collect::<Vec<_>>();

        if objects.len() == 1 {
            format!("{} AS document", objects[0])
        } else {
            format!("({}) AS document", objects.join(" || "))
        }
    }

    fn finish(self, sql: String) -> Statement {
        Statement {
            sql,
            params: self.params,
        }
    }
}
