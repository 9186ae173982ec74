//! Shared test doubles: an in-memory SDK client and a log capture buffer

#![allow(dead_code)]

use cabtech::sdk::{PageStream, PaginationConfig, Params, SdkClient};
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

/// In-memory client with canned pages and responses
#[derive(Default)]
pub struct MockClient {
    pages: HashMap<String, Vec<Value>>,
    responses: HashMap<String, Value>,
    failing_page: Option<usize>,
    pub calls: Mutex<Vec<(String, Params)>>,
    pub paginations: Mutex<Vec<(String, PaginationConfig, Params)>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a paginated operation serving `pages` in order
    pub fn with_pages(mut self, operation: &str, pages: Vec<Value>) -> Self {
        self.pages.insert(operation.to_string(), pages);
        self
    }

    /// Register a single-call operation
    pub fn with_response(mut self, operation: &str, response: Value) -> Self {
        self.responses.insert(operation.to_string(), response);
        self
    }

    /// Make the paginator fail instead of yielding page `index`
    pub fn failing_at_page(mut self, index: usize) -> Self {
        self.failing_page = Some(index);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn pagination_count(&self) -> usize {
        self.paginations.lock().unwrap().len()
    }
}

impl SdkClient for MockClient {
    fn can_paginate(&self, operation: &str) -> bool {
        self.pages.contains_key(operation)
    }

    fn paginate<'a>(
        &'a self,
        operation: &'a str,
        config: PaginationConfig,
        params: Params,
    ) -> PageStream<'a> {
        self.paginations
            .lock()
            .unwrap()
            .push((operation.to_string(), config, params));

        let pages = self.pages.get(operation).cloned().unwrap_or_default();
        let failing_page = self.failing_page;
        stream::iter(pages.into_iter().enumerate().map(move |(i, page)| {
            if Some(i) == failing_page {
                Err(anyhow::anyhow!("API request failed: 500 Internal Server Error"))
            } else {
                Ok(page)
            }
        }))
        .boxed()
    }

    async fn call(&self, operation: &str, params: Params) -> anyhow::Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_string(), params));
        self.responses
            .get(operation)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Unknown operation: {}", operation))
    }
}

/// Shared buffer receiving formatted log lines
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }

    /// Route this thread's tracing events into the buffer until the guard drops
    pub fn capture(&self) -> tracing::subscriber::DefaultGuard {
        let buffer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || buffer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
