//! PostgreSQL record store
//!
//! Executes generated statements through a sqlx pool and classifies driver errors.

use crate::document::{Document, Values};
use crate::errors::StoreFailure;
use crate::query_builder::{OrderBy, Query, Statement, StatementBuilder};
use crate::schema::TableSchema;
use crate::traits::RecordStore;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use type_mapping::{FieldType, PostgresValue};

/// SQLSTATE reported for unique constraint violations
pub const UNIQUE_VIOLATION: &str = "23505";

macro_rules! bind_postgres_value {
    ($query:expr, $param:expr) => {
        match $param {
            PostgresValue::Text(s) => $query.bind(s),
            PostgresValue::SmallInt(i) => $query.bind(i),
            PostgresValue::Integer(i) => $query.bind(i),
            PostgresValue::BigInt(i) => $query.bind(i),
            PostgresValue::Real(f) => $query.bind(f),
            PostgresValue::Float(f) => $query.bind(f),
            PostgresValue::Boolean(b) => $query.bind(b),
            PostgresValue::Uuid(u) => $query.bind(u),
            PostgresValue::Timestamp(dt) => $query.bind(dt),
            PostgresValue::Date(d) => $query.bind(d),
            PostgresValue::Json(v) => $query.bind(v),
            PostgresValue::TextArray(items) => $query.bind(items),
            PostgresValue::Null(field_type) => match field_type {
                Some(FieldType::SmallInt) => $query.bind(Option::<i16>::None),
                Some(FieldType::Integer) => $query.bind(Option::<i32>::None),
                Some(FieldType::BigInt) => $query.bind(Option::<i64>::None),
                Some(FieldType::Real) => $query.bind(Option::<f32>::None),
                Some(FieldType::Double) => $query.bind(Option::<f64>::None),
                Some(FieldType::Boolean) => $query.bind(Option::<bool>::None),
                Some(FieldType::Uuid) => $query.bind(Option::<uuid::Uuid>::None),
                Some(FieldType::Timestamp) => {
                    $query.bind(Option::<chrono::DateTime<chrono::Utc>>::None)
                }
                Some(FieldType::Date) => $query.bind(Option::<chrono::NaiveDate>::None),
                Some(FieldType::Json) => $query.bind(Option::<Value>::None),
                Some(FieldType::TextArray) => $query.bind(Option::<Vec<String>>::None),
                Some(FieldType::Text) | None => $query.bind(Option::<String>::None),
            },
        }
    };
}

/// Map a driver error onto the closed set of store failures
pub fn classify_sqlx_error(error: sqlx::Error) -> StoreFailure {
    let is_unique_violation = error
        .as_database_error()
        .and_then(|db_error| db_error.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);

    if is_unique_violation {
        StoreFailure::unique_violation(error)
    } else {
        StoreFailure::unclassified(error)
    }
}

/// [`RecordStore`] backed by a PostgreSQL pool
#[derive(Clone, Debug)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_documents(
        &self,
        schema: &TableSchema,
        statement: Statement,
    ) -> Result<Vec<Document>, StoreFailure> {
        let Statement { sql, params } = statement;
        tracing::debug!(
            table = schema.table_name(),
            sql = %sql,
            params = params.len(),
            "executing statement"
        );

        let mut query = sqlx::query_scalar::<_, Value>(&sql);
        for param in params {
            query = bind_postgres_value!(query, param);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;

        rows.into_iter()
            .map(|row| {
                Document::try_from(row).map_err(|other| {
                    StoreFailure::unclassified(format!(
                        "expected a document object from {}, got {}",
                        schema.table_name(),
                        other
                    ))
                })
            })
            .collect()
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(
        &self,
        schema: &TableSchema,
        values: &Values,
    ) -> Result<Vec<Document>, StoreFailure> {
        let statement = StatementBuilder::new(schema)
            .insert(values)
            .map_err(StoreFailure::unclassified)?;
        self.fetch_documents(schema, statement).await
    }

    async fn select(
        &self,
        schema: &TableSchema,
        query: &Query,
        order_by: &[OrderBy],
        limit: Option<i64>,
    ) -> Result<Vec<Document>, StoreFailure> {
        let statement = StatementBuilder::new(schema)
            .select(query, order_by, limit)
            .map_err(StoreFailure::unclassified)?;
        self.fetch_documents(schema, statement).await
    }

    async fn count(&self, schema: &TableSchema, query: &Query) -> Result<Value, StoreFailure> {
        let Statement { sql, params } = StatementBuilder::new(schema)
            .count(query)
            .map_err(StoreFailure::unclassified)?;
        tracing::debug!(
            table = schema.table_name(),
            sql = %sql,
            params = params.len(),
            "executing statement"
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&sql);
        for param in params {
            count_query = bind_postgres_value!(count_query, param);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(Value::from(total))
    }

    async fn update(
        &self,
        schema: &TableSchema,
        query: &Query,
        values: &Values,
    ) -> Result<Vec<Document>, StoreFailure> {
        let statement = StatementBuilder::new(schema)
            .update(query, values)
            .map_err(StoreFailure::unclassified)?;
        self.fetch_documents(schema, statement).await
    }

    async fn delete(
        &self,
        schema: &TableSchema,
        query: &Query,
    ) -> Result<Vec<Document>, StoreFailure> {
        let statement = StatementBuilder::new(schema)
            .delete(query)
            .map_err(StoreFailure::unclassified)?;
        self.fetch_documents(schema, statement).await
    }
}
