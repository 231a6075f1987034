use async_trait::async_trait;
use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::error::{DataError, DataResult};

use crate::query::Query;
use crate::store::TableStore;

/// PostgREST client for the Supabase REST endpoint.
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }

    fn get_headers(&self, return_representation: bool) -> DataResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(&self.anon_key)
            .map_err(|_| DataError::Auth("anon key is not a valid header value".to_string()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.anon_key))
            .map_err(|_| DataError::Auth("anon key is not a valid header value".to_string()))?;

        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if return_representation {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }

        Ok(headers)
    }

    pub async fn request(
        &self,
        method: Method,
        table: &str,
        query: Option<&Query>,
        body: Option<Value>,
    ) -> DataResult<Vec<Value>> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!("Making {} request to {}", method, url);

        let return_representation = method != Method::GET;
        let headers = self.get_headers(return_representation)?;

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(query) = query {
            req = req.query(&query.to_postgrest_params());
        }

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| DataError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .map_err(|e| DataError::Transport(e.to_string()))?;
            error!("API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => DataError::Auth(error_text),
                code => DataError::Backend {
                    status: code,
                    message: error_text,
                },
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| DataError::Transport(e.to_string()))?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&text)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            row => Ok(vec![row]),
        }
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TableStore for SupabaseClient {
    async fn select(&self, table: &str, query: &Query) -> DataResult<Vec<Value>> {
        let mut query = query.clone();
        if query.columns.is_none() {
            query = query.select(&["*"]);
        }

        self.request(Method::GET, table, Some(&query), None).await
    }

    async fn insert(&self, table: &str, row: Value) -> DataResult<Value> {
        let rows = self
            .request(Method::POST, table, None, Some(Value::Array(vec![row])))
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| DataError::Decode(format!("insert into {} returned no row", table)))
    }

    async fn update(&self, table: &str, query: &Query, patch: Value) -> DataResult<Vec<Value>> {
        if query.filters.is_empty() {
            return Err(DataError::InvalidQuery(format!("refusing unfiltered update on {}", table)));
        }

        self.request(Method::PATCH, table, Some(query), Some(patch)).await
    }

    async fn delete(&self, table: &str, query: &Query) -> DataResult<Vec<Value>> {
        if query.filters.is_empty() {
            return Err(DataError::InvalidQuery(format!("refusing unfiltered delete on {}", table)));
        }

        self.request(Method::DELETE, table, Some(query), None).await
    }
}
