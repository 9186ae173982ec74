//! SDK client abstraction
//!
//! Everything in this crate talks to the cloud through [`SdkClient`]. The trait
//! mirrors what a generated cloud SDK exposes: a pagination capability query, a
//! paginator factory and direct invocation of a named operation.
//!
//! # Module Structure
//!
//! - [`client`] - REST implementation of [`SdkClient`]
//! - [`http`] - HTTP utilities for REST API calls
//! - [`registry`] - Operation definitions loaded from embedded JSON
//!
//! # Example
//!
//! ```ignore
//! use cabtech::sdk::{client::RestClient, SdkClient};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = RestClient::new("https://ec2.example.internal", "token")?;
//!     let regions = client.call("describe_regions", Default::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod registry;

use anyhow::Result;
use futures::stream::BoxStream;
use serde_json::{Map, Value};
use std::future::Future;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Keyword-style arguments for an operation
pub type Params = Map<String, Value>;

/// Stream of pages produced by a paginator, one item per round trip
pub type PageStream<'a> = BoxStream<'a, Result<Value>>;

/// Paginator settings
///
/// Every field is optional; [`PaginationConfig::merge`] overlays caller settings
/// on top of defaults one field at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Items requested per round trip
    pub page_size: Option<u32>,
    /// Upper bound on items across all pages
    pub max_items: Option<u32>,
    /// Token to resume a previous pagination
    pub starting_token: Option<String>,
}

impl PaginationConfig {
    /// Defaults applied to every paginated describe
    pub fn default_hint() -> Self {
        Self {
            page_size: Some(DEFAULT_PAGE_SIZE),
            ..Self::default()
        }
    }

    /// Overlay `other` on `self`; fields set in `other` win
    pub fn merge(self, other: PaginationConfig) -> Self {
        Self {
            page_size: other.page_size.or(self.page_size),
            max_items: other.max_items.or(self.max_items),
            starting_token: other.starting_token.or(self.starting_token),
        }
    }
}

/// A cloud SDK client
///
/// Implementations own transport, authentication and retries. Errors are
/// returned as-is to the caller of this crate.
///
/// Calls are awaited strictly one at a time: this crate never polls two
/// requests against the same client concurrently, so the contract matches a
/// blocking SDK client driven from a single thread.
pub trait SdkClient: Sync {
    /// Whether `operation` can be driven through [`SdkClient::paginate`]
    fn can_paginate(&self, operation: &str) -> bool;

    /// Build a paginator for `operation` and return its pages in order
    fn paginate<'a>(
        &'a self,
        operation: &'a str,
        config: PaginationConfig,
        params: Params,
    ) -> PageStream<'a>;

    /// Invoke `operation` once with `params`
    fn call(
        &self,
        operation: &str,
        params: Params,
    ) -> impl Future<Output = Result<Value>> + Send;
}
