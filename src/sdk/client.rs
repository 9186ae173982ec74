//! REST Client
//!
//! [`SdkClient`] implementation for JSON REST endpoints. The caller supplies an
//! endpoint and a bearer token it already holds; operations are resolved through
//! the [`registry`](super::registry).

use super::http::HttpTransport;
use super::registry::{get_all_operation_names, get_operation, OperationDef};
use super::{PageStream, PaginationConfig, Params, SdkClient};
use crate::config::Config;
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use serde_json::Value;
use url::Url;

/// Request/response field carrying the continuation token
const NEXT_TOKEN: &str = "NextToken";
/// Request field carrying the page size
const MAX_RESULTS: &str = "MaxResults";

/// REST-backed SDK client
#[derive(Clone)]
pub struct RestClient {
    pub http: HttpTransport,
    endpoint: Url,
    token: String,
}

impl RestClient {
    /// Create a client for `endpoint`, authenticating every request with `token`
    pub fn new(endpoint: &str, token: &str) -> Result<Self> {
        let mut endpoint =
            Url::parse(endpoint).with_context(|| format!("Invalid endpoint: {}", endpoint))?;
        if endpoint.cannot_be_a_base() {
            return Err(anyhow::anyhow!("Endpoint cannot be used as a base URL: {}", endpoint));
        }

        // Url::join drops the last segment unless the base ends with '/'
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        Ok(Self {
            http: HttpTransport::new()?,
            endpoint,
            token: token.to_string(),
        })
    }

    /// Create a client from the configured endpoint
    pub fn from_config(config: &Config, token: &str) -> Result<Self> {
        let endpoint = config
            .effective_endpoint()
            .context("No endpoint configured (config file or CABTECH_ENDPOINT)")?;
        Self::new(&endpoint, token)
    }

    /// Base endpoint, always ending with '/'
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Build the URL serving an operation
    pub fn operation_url(&self, def: &OperationDef) -> Result<String> {
        self.endpoint
            .join(&def.relative_path())
            .map(|u| u.to_string())
            .with_context(|| format!("Failed to build URL for {}", def.relative_path()))
    }

    async fn request(&self, def: &OperationDef, params: &Params) -> Result<Value> {
        let url = add_query_params(&self.operation_url(def)?, params);
        self.http.get(&url, &self.token).await
    }
}

fn lookup(operation: &str) -> Result<&'static OperationDef> {
    get_operation(operation).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown operation: {} (known: {})",
            operation,
            get_all_operation_names().join(", ")
        )
    })
}

/// Pagination progress carried between round trips
struct PageCursor {
    params: Params,
    page_size: Option<u32>,
    next_token: Option<String>,
    remaining: Option<u32>,
    finished: bool,
}

impl SdkClient for RestClient {
    fn can_paginate(&self, operation: &str) -> bool {
        get_operation(operation).is_some_and(|def| def.paginated)
    }

    fn paginate<'a>(
        &'a self,
        operation: &'a str,
        config: PaginationConfig,
        mut params: Params,
    ) -> PageStream<'a> {
        // A NextToken passed as an argument resumes like a starting token
        let caller_token = params
            .remove(NEXT_TOKEN)
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .filter(|s| !s.is_empty());

        let cursor = PageCursor {
            params,
            page_size: config.page_size,
            next_token: caller_token.or(config.starting_token),
            remaining: config.max_items,
            finished: false,
        };

        stream::try_unfold(cursor, move |mut cursor| async move {
            if cursor.finished || cursor.remaining == Some(0) {
                return Ok::<_, anyhow::Error>(None);
            }

            let def = lookup(operation)?;
            let mut params = cursor.params.clone();
            if let Some(size) = cursor.page_size {
                let size = cursor.remaining.map_or(size, |r| r.min(size));
                params
                    .entry(MAX_RESULTS.to_string())
                    .or_insert_with(|| Value::from(size));
            }
            if let Some(token) = cursor.next_token.take() {
                params.insert(NEXT_TOKEN.to_string(), Value::String(token));
            }

            let mut page = self.request(def, &params).await?;

            cursor.next_token = page
                .get(NEXT_TOKEN)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string());

            if let Some(remaining) = cursor.remaining.as_mut() {
                *remaining -= truncate_collection(&mut page, &def.result_key, *remaining);
                if *remaining == 0 {
                    cursor.next_token = None;
                }
            }

            cursor.finished = cursor.next_token.is_none();
            Ok::<_, anyhow::Error>(Some((page, cursor)))
        })
        .boxed()
    }

    async fn call(&self, operation: &str, params: Params) -> Result<Value> {
        tracing::debug!("call: operation={}", operation);
        let def = lookup(operation)?;
        self.request(def, &params).await
    }
}

/// Keep at most `limit` entries of `page[key]`, returning how many were kept
fn truncate_collection(page: &mut Value, key: &str, limit: u32) -> u32 {
    let Some(items) = page.get_mut(key).and_then(|v| v.as_array_mut()) else {
        return 0;
    };
    items.truncate(limit as usize);
    items.len() as u32
}

fn add_query_params(url: &str, params: &Params) -> String {
    let mut query_parts: Vec<String> = Vec::new();

    for (key, value) in params {
        match value {
            Value::Null => {},
            Value::Array(arr) => {
                for item in arr {
                    query_parts.push(query_pair(key, item));
                }
            },
            other => {
                query_parts.push(query_pair(key, other));
            },
        }
    }

    if query_parts.is_empty() {
        url.to_string()
    } else if url.contains('?') {
        format!("{}&{}", url, query_parts.join("&"))
    } else {
        format!("{}?{}", url, query_parts.join("&"))
    }
}

fn query_pair(key: &str, value: &Value) -> String {
    format!(
        "{}={}",
        urlencoding::encode(key),
        urlencoding::encode(&query_value(value))
    )
}

/// Render a scalar as plain text; structured values go out as compact JSON
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
