//! HTTP table source for the mobile-app backend.
//!
//! # Responsibility
//! - Translate a `TableQuery` into `GET {base}/tables/{collection}` with
//!   OData `$filter` / `$orderby` parameters.
//! - Map transport, status and body-shape problems into `QueryFailure`.
//!
//! # Invariants
//! - Every request carries the `ZUMO-API-VERSION` header.
//! - Filter clauses are emitted in field-name order.

use super::{QueryFailure, QueryResult, TableQuery, TableSource};
use crate::config::BackendConfig;
use log::{debug, error, info};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Instant;

const API_VERSION_HEADER: &str = "ZUMO-API-VERSION";
const USER_AGENT: &str = concat!("kwani/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP implementation of `TableSource`.
pub struct HttpTableSource {
    client: Client,
    base_url: String,
    api_version: String,
}

impl HttpTableSource {
    /// Builds the HTTP client from backend configuration.
    ///
    /// # Errors
    /// - Returns a `Transport` failure when the client cannot be constructed.
    pub fn new(config: &BackendConfig) -> QueryResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| QueryFailure::transport(format!("failed to build HTTP client: {err}")))?;

        debug!(
            "event=http_client_init module=remote status=ok base_url={} api_version={} timeout_ms={}",
            config.base_url,
            config.api_version,
            config.timeout.as_millis()
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl TableSource for HttpTableSource {
    fn read(&self, query: &TableQuery) -> QueryResult<Vec<Value>> {
        let started_at = Instant::now();
        let url = table_url(&self.base_url, query);
        let params = query_params(query);

        let response = self
            .client
            .get(&url)
            .header(API_VERSION_HEADER, self.api_version.as_str())
            .query(&params)
            .send()
            .map_err(|err| {
                error!(
                    "event=query module=remote status=error collection={} duration_ms={} error_code=transport error={}",
                    query.collection,
                    started_at.elapsed().as_millis(),
                    err
                );
                QueryFailure::from(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "event=query module=remote status=error collection={} duration_ms={} error_code=http_status http_status={}",
                query.collection,
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(QueryFailure::status(
                status.as_u16(),
                format!("GET {url} returned {status}"),
            ));
        }

        let body: Value = response.json().map_err(|err| {
            QueryFailure::malformed(format!("`{}` response is not JSON: {err}", query.collection))
        })?;
        let rows = rows_from_body(body)?;

        info!(
            "event=query module=remote status=ok collection={} rows={} duration_ms={}",
            query.collection,
            rows.len(),
            started_at.elapsed().as_millis()
        );
        Ok(rows)
    }
}

fn table_url(base_url: &str, query: &TableQuery) -> String {
    format!("{base_url}/tables/{}", query.collection.as_str())
}

/// Encodes query parameters in request order (`$filter`, then `$orderby`).
fn query_params(query: &TableQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(filter) = encode_filter(query) {
        params.push(("$filter", filter));
    }
    if let Some(field) = query.order_by.as_deref() {
        params.push(("$orderby", field.to_string()));
    }
    params
}

/// Builds an OData equality filter, e.g. `(course eq 'c1') and (year eq '2')`.
fn encode_filter(query: &TableQuery) -> Option<String> {
    if query.filters.is_empty() {
        return None;
    }
    let clauses = query
        .filters
        .iter()
        .map(|(field, value)| format!("({field} eq '{}')", value.replace('\'', "''")))
        .collect::<Vec<_>>();
    Some(clauses.join(" and "))
}

fn rows_from_body(body: Value) -> QueryResult<Vec<Value>> {
    match body {
        Value::Array(rows) => Ok(rows),
        other => Err(QueryFailure::malformed(format!(
            "expected a JSON array of rows, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
