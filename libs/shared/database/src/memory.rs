use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use shared_models::error::{DataError, DataResult};

use crate::query::{Direction, Filter, Query};
use crate::store::TableStore;

const ALL_TABLES: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    Select,
    Insert,
    Update,
    Delete,
}

/// In-process store with PostgREST-like semantics, used for local runs and
/// tests. Inserted rows get an `id`, `createdAt` and `updatedAt` when the
/// caller leaves them out. Calls are tallied per operation and table, so
/// the bookkeeping stays bounded by the number of tables touched.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Value>>>,
    failures: RwLock<HashMap<String, DataError>>,
    calls: RwLock<HashMap<(StoreOperation, String), usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads rows as-is, bypassing server-assigned fields.
    pub async fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut tables = self.tables.write().await;
        tables.entry(table.to_string()).or_default().extend(rows);
    }

    pub async fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.read().await.get(table).cloned().unwrap_or_default()
    }

    /// Makes every call against `table` fail with `error` until `recover`.
    pub async fn fail_table(&self, table: &str, error: DataError) {
        self.failures.write().await.insert(table.to_string(), error);
    }

    pub async fn fail_all(&self, error: DataError) {
        self.fail_table(ALL_TABLES, error).await;
    }

    pub async fn recover(&self) {
        self.failures.write().await.clear();
    }

    pub async fn call_count(&self, operation: StoreOperation, table: &str) -> usize {
        self.calls
            .read()
            .await
            .get(&(operation, table.to_string()))
            .copied()
            .unwrap_or(0)
    }

    async fn begin(&self, operation: StoreOperation, table: &str) -> DataResult<()> {
        debug!("Memory store {:?} on {}", operation, table);
        *self
            .calls
            .write()
            .await
            .entry((operation, table.to_string()))
            .or_insert(0) += 1;

        let failures = self.failures.read().await;
        match failures.get(table).or_else(|| failures.get(ALL_TABLES)) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn select(&self, table: &str, query: &Query) -> DataResult<Vec<Value>> {
        self.begin(StoreOperation::Select, table).await?;

        let tables = self.tables.read().await;
        let mut rows: Vec<Value> = tables
            .get(table)
            .map(|rows| rows.iter().filter(|row| matches_all(row, &query.filters)).cloned().collect())
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare_values(field(a, &order.column), field(b, &order.column))
                    .unwrap_or(Ordering::Equal);
                match order.direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        if let Some(columns) = &query.columns {
            if !columns.iter().any(|c| c == "*") {
                rows = rows.into_iter().map(|row| project(&row, columns)).collect();
            }
        }

        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> DataResult<Value> {
        self.begin(StoreOperation::Insert, table).await?;

        let Value::Object(mut object) = row else {
            return Err(DataError::InvalidQuery(format!("insert into {} expects an object", table)));
        };

        let now = Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true));
        object
            .entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        object.entry("createdAt").or_insert_with(|| now.clone());
        object.entry("updatedAt").or_insert(now);

        let stored = Value::Object(object);
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());

        Ok(stored)
    }

    async fn update(&self, table: &str, query: &Query, patch: Value) -> DataResult<Vec<Value>> {
        self.begin(StoreOperation::Update, table).await?;

        let Value::Object(patch) = patch else {
            return Err(DataError::InvalidQuery(format!("update on {} expects an object", table)));
        };

        let mut tables = self.tables.write().await;
        let mut updated = Vec::new();

        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches_all(row, &query.filters)) {
                if let Value::Object(object) = row {
                    for (key, value) in &patch {
                        object.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }

        Ok(updated)
    }

    async fn delete(&self, table: &str, query: &Query) -> DataResult<Vec<Value>> {
        self.begin(StoreOperation::Delete, table).await?;

        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(Vec::new());
        };

        let (removed, kept): (Vec<Value>, Vec<Value>) = rows
            .drain(..)
            .partition(|row| matches_all(row, &query.filters));
        *rows = kept;

        Ok(removed)
    }
}

fn field<'a>(row: &'a Value, column: &str) -> &'a Value {
    row.get(column).unwrap_or(&Value::Null)
}

fn project(row: &Value, columns: &[String]) -> Value {
    let mut projected = Map::new();
    for column in columns {
        if let Some(value) = row.get(column) {
            projected.insert(column.clone(), value.clone());
        }
    }
    Value::Object(projected)
}

fn matches_all(row: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| matches(row, filter))
}

fn matches(row: &Value, filter: &Filter) -> bool {
    let actual = field(row, filter.column());
    match filter {
        Filter::Eq(_, expected) => values_equal(actual, expected),
        Filter::Neq(_, expected) => !values_equal(actual, expected),
        Filter::Gt(_, bound) => compare_values(actual, bound) == Some(Ordering::Greater),
        Filter::Gte(_, bound) => matches!(
            compare_values(actual, bound),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Filter::Lt(_, bound) => compare_values(actual, bound) == Some(Ordering::Less),
        Filter::Lte(_, bound) => matches!(
            compare_values(actual, bound),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Filter::In(_, candidates) => candidates.iter().any(|c| values_equal(actual, c)),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    a == b || compare_values(a, b) == Some(Ordering::Equal)
}

/// Timestamps compare as instants, so `...:00Z` and `...:00.000Z` are equal
/// and a bare date sorts as its midnight.
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => match (parse_instant(a), parse_instant(b)) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => Some(a.cmp(b)),
        },
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
