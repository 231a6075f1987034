use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Wire form of a timestamp used in filters and patches.
pub fn timestamp_value(at: &DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// A single column predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(String, Value),
    Neq(String, Value),
    Gt(String, Value),
    Gte(String, Value),
    Lt(String, Value),
    Lte(String, Value),
    In(String, Vec<Value>),
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq(column, _)
            | Filter::Neq(column, _)
            | Filter::Gt(column, _)
            | Filter::Gte(column, _)
            | Filter::Lt(column, _)
            | Filter::Lte(column, _)
            | Filter::In(column, _) => column,
        }
    }

    /// PostgREST operator expression, e.g. `eq.p1` or `in.("a","b")`.
    pub fn to_postgrest(&self) -> String {
        match self {
            Filter::Eq(_, value) => format!("eq.{}", scalar(value)),
            Filter::Neq(_, value) => format!("neq.{}", scalar(value)),
            Filter::Gt(_, value) => format!("gt.{}", scalar(value)),
            Filter::Gte(_, value) => format!("gte.{}", scalar(value)),
            Filter::Lt(_, value) => format!("lt.{}", scalar(value)),
            Filter::Lte(_, value) => format!("lte.{}", scalar(value)),
            Filter::In(_, values) => {
                let items: Vec<String> = values.iter().map(quoted).collect();
                format!("in.({})", items.join(","))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// Projection, predicates and ordering for one store call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub columns: Option<Vec<String>>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by_id(id: &str) -> Self {
        Self::new().eq("id", id)
    }

    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(column.to_string(), value.into()));
        self
    }

    pub fn neq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Neq(column.to_string(), value.into()));
        self
    }

    pub fn gt(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Gt(column.to_string(), value.into()));
        self
    }

    pub fn gte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Gte(column.to_string(), value.into()));
        self
    }

    pub fn lt(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Lt(column.to_string(), value.into()));
        self
    }

    pub fn lte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Lte(column.to_string(), value.into()));
        self
    }

    pub fn in_list<I, V>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.filters.push(Filter::In(column.to_string(), values));
        self
    }

    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs for a PostgREST request, in a stable order:
    /// projection, filters, ordering, limit.
    pub fn to_postgrest_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(columns) = &self.columns {
            params.push(("select".to_string(), columns.join(",")));
        }

        for filter in &self.filters {
            params.push((filter.column().to_string(), filter.to_postgrest()));
        }

        if let Some(order) = &self.order {
            let direction = match order.direction {
                Direction::Ascending => "asc",
                Direction::Descending => "desc",
            };
            params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

// Values inside `in.(...)` are quoted so ids containing commas survive.
fn quoted(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s.replace('"', "\\\"")),
        other => scalar(other),
    }
}
