use crate::document::{Document, Values};
use crate::errors::StoreFailure;
use crate::query_builder::{OrderBy, Query};
use crate::schema::TableSchema;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

/// Query-builder style access to the underlying store.
///
/// Implementations return rows as documents holding every declared field plus `key`,
/// and classify their failures into [`StoreFailure`].
#[async_trait]
pub trait RecordStore: Send + Sync + Debug {
    /// Insert one row, returning the created rows
    async fn insert(&self, schema: &TableSchema, values: &Values)
        -> Result<Vec<Document>, StoreFailure>;

    /// Select rows matching `query`, ordered by each clause in turn
    async fn select(
        &self,
        schema: &TableSchema,
        query: &Query,
        order_by: &[OrderBy],
        limit: Option<i64>,
    ) -> Result<Vec<Document>, StoreFailure>;

    /// Count rows matching `query`, in the store's native representation
    async fn count(&self, schema: &TableSchema, query: &Query) -> Result<Value, StoreFailure>;

    /// Update rows matching `query`, returning them after the update
    async fn update(
        &self,
        schema: &TableSchema,
        query: &Query,
        values: &Values,
    ) -> Result<Vec<Document>, StoreFailure>;

    /// Delete rows matching `query`, returning their prior values
    async fn delete(&self, schema: &TableSchema, query: &Query)
        -> Result<Vec<Document>, StoreFailure>;
}
