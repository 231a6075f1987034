use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use shared_config::AppConfig;
use shared_models::error::{DataError, DataResult};

use crate::query::{timestamp_value, Query};
use crate::supabase::SupabaseClient;
use crate::tenant::{Table, TableResolver};

/// The query vocabulary any backing store has to provide.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn select(&self, table: &str, query: &Query) -> DataResult<Vec<Value>>;

    /// Inserts one row and returns it as stored, with server-assigned fields.
    async fn insert(&self, table: &str, row: Value) -> DataResult<Value>;

    /// Merges `patch` into every matching row and returns the updated rows.
    async fn update(&self, table: &str, query: &Query, patch: Value) -> DataResult<Vec<Value>>;

    /// Removes every matching row and returns the removed rows.
    async fn delete(&self, table: &str, query: &Query) -> DataResult<Vec<Value>>;
}

/// A store plus the tenant's table naming, shared by every entity service.
#[derive(Clone)]
pub struct DatabaseContext {
    store: Arc<dyn TableStore>,
    tables: TableResolver,
}

impl DatabaseContext {
    pub fn new(store: Arc<dyn TableStore>, tables: TableResolver) -> Self {
        Self { store, tables }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(SupabaseClient::new(config)),
            TableResolver::from_config(config),
        )
    }

    pub fn store(&self) -> &dyn TableStore {
        self.store.as_ref()
    }

    pub fn tables(&self) -> &TableResolver {
        &self.tables
    }

    pub fn table(&self, table: Table) -> String {
        self.tables.table(table)
    }
}

pub fn decode_row<T: DeserializeOwned>(row: Value) -> DataResult<T> {
    Ok(serde_json::from_value(row)?)
}

pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> DataResult<Vec<T>> {
    rows.into_iter().map(decode_row).collect()
}

/// Serializes a partial update and stamps it with a fresh `updatedAt`.
pub fn touched_patch<T: Serialize>(update: &T) -> DataResult<Value> {
    let mut patch = match serde_json::to_value(update)? {
        Value::Object(map) => map,
        _ => return Err(DataError::InvalidQuery("update payload must be an object".to_string())),
    };

    patch.remove("createdAt");
    patch.insert("updatedAt".to_string(), timestamp_value(&Utc::now()));

    Ok(Value::Object(patch))
}

/// Mutations addressed by id must hit a row.
pub fn ensure_affected(rows: &[Value], table: &str, id: &str) -> DataResult<()> {
    if rows.is_empty() {
        return Err(DataError::NotFound(format!("{}/{}", table, id)));
    }
    Ok(())
}
