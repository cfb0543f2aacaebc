//! In-memory record store used to exercise model verbs without a database

#![allow(dead_code)]

use async_trait::async_trait;
use record_model::prelude::*;
use std::cmp::Ordering;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Document>>,
    unique_columns: Vec<String>,
    next_key: Mutex<i64>,
    fail_next: Mutex<Option<String>>,
    calls: Mutex<Vec<String>>,
    select_limits: Mutex<Vec<Option<i64>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject inserts that repeat a value already stored in `column`
    pub fn with_unique(mut self, column: &str) -> Self {
        self.unique_columns.push(column.to_string());
        self
    }

    /// Make the next operation fail with an unclassified error
    pub fn fail_next(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn select_limits(&self) -> Vec<Option<i64>> {
        self.select_limits.lock().unwrap().clone()
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn enter(&self, call: &str) -> Result<(), StoreFailure> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.fail_next.lock().unwrap().take() {
            Some(message) => Err(StoreFailure::unclassified(message)),
            None => Ok(()),
        }
    }

    fn check_columns(schema: &TableSchema, values: &Values) -> Result<(), StoreFailure> {
        for (column, _) in values.iter() {
            if schema.column_type(column).is_none() {
                return Err(StoreFailure::unclassified(format!(
                    "column \"{}\" of relation \"{}\" does not exist",
                    column,
                    schema.table_name()
                )));
            }
        }
        Ok(())
    }

    fn project(schema: &TableSchema, row: &Document) -> Document {
        let mut document = Document::new();
        for field in schema.field_names(true) {
            document.insert(field, row.get(field).cloned().unwrap_or(Value::Null));
        }
        document
    }
}

fn matches(row: &Document, query: &Query) -> bool {
    query.conditions().all(|(field, expected)| match row.get(field) {
        Some(actual) => actual == expected,
        None => expected.is_null(),
    })
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(
        &self,
        schema: &TableSchema,
        values: &Values,
    ) -> Result<Vec<Document>, StoreFailure> {
        self.enter("insert")?;
        Self::check_columns(schema, values)?;

        let mut rows = self.rows.lock().unwrap();
        for column in &self.unique_columns {
            if let Some(value) = values.get(column).filter(|value| !value.is_null()) {
                if rows.iter().any(|row| row.get(column) == Some(value)) {
                    return Err(StoreFailure::unique_violation(format!(
                        "duplicate key value violates unique constraint \"{}_{}_key\"",
                        schema.table_name(),
                        column
                    )));
                }
            }
        }

        let mut row = Document::new();
        for (column, value) in values.iter() {
            row.insert(column.clone(), value.clone());
        }
        if row.key().is_none() {
            let mut next_key = self.next_key.lock().unwrap();
            *next_key += 1;
            row.insert(KEY_FIELD, json!(*next_key));
        }

        let created = Self::project(schema, &row);
        rows.push(row);
        Ok(vec![created])
    }

    async fn select(
        &self,
        schema: &TableSchema,
        query: &Query,
        order_by: &[OrderBy],
        limit: Option<i64>,
    ) -> Result<Vec<Document>, StoreFailure> {
        self.enter("select")?;
        self.select_limits.lock().unwrap().push(limit);

        let rows = self.rows.lock().unwrap();
        let mut found: Vec<&Document> = rows.iter().filter(|row| matches(row, query)).collect();

        found.sort_by(|a, b| {
            order_by
                .iter()
                .map(|clause| {
                    let ordering = compare_values(a.get(&clause.column), b.get(&clause.column));
                    match clause.direction {
                        SortOrder::Asc => ordering,
                        SortOrder::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        if let Some(limit) = limit {
            found.truncate(limit as usize);
        }

        Ok(found.into_iter().map(|row| Self::project(schema, row)).collect())
    }

    async fn count(&self, _schema: &TableSchema, query: &Query) -> Result<Value, StoreFailure> {
        self.enter("count")?;
        let rows = self.rows.lock().unwrap();
        let total = rows.iter().filter(|row| matches(row, query)).count();
        // Postgres drivers commonly hand bigint counts back as text
        Ok(Value::String(total.to_string()))
    }

    async fn update(
        &self,
        schema: &TableSchema,
        query: &Query,
        values: &Values,
    ) -> Result<Vec<Document>, StoreFailure> {
        self.enter("update")?;
        Self::check_columns(schema, values)?;

        let mut rows = self.rows.lock().unwrap();
        let mut updated = Vec::new();
        for row in rows.iter_mut().filter(|row| matches(row, query)) {
            for (column, value) in values.iter() {
                row.insert(column.clone(), value.clone());
            }
            updated.push(Self::project(schema, row));
        }
        Ok(updated)
    }

    async fn delete(
        &self,
        schema: &TableSchema,
        query: &Query,
    ) -> Result<Vec<Document>, StoreFailure> {
        self.enter("delete")?;

        let mut rows = self.rows.lock().unwrap();
        let (deleted, kept): (Vec<Document>, Vec<Document>) =
            rows.drain(..).partition(|row| matches(row, query));
        *rows = kept;

        Ok(deleted.iter().map(|row| Self::project(schema, row)).collect())
    }
}
