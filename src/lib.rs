//! cabtech - handy helpers around a cloud SDK client
//!
//! The crate does not talk to a cloud on its own. Callers hand it a client that
//! implements [`sdk::SdkClient`] (already authenticated) and get back plain JSON
//! values.
//!
//! # Module Structure
//!
//! - [`describe`] - Uniform describe calls across paginated and single-call operations
//! - [`tags`] - Tag lookups on resources
//! - [`lookup`] - Linear search over resource lists
//! - [`sdk`] - The client trait plus a REST implementation
//! - [`config`] - Persistent configuration
//! - [`logging`] - Opt-in file logging
//!
//! # Example
//!
//! ```ignore
//! use cabtech::describe::{describe, DescribeOptions};
//! use cabtech::sdk::client::RestClient;
//!
//! async fn volumes(client: &RestClient) -> anyhow::Result<Vec<serde_json::Value>> {
//!     let described = describe(client, "describe_volumes", "Volumes", DescribeOptions::new()).await?;
//!     Ok(described.into_items())
//! }
//! ```

pub mod config;
pub mod describe;
pub mod logging;
pub mod lookup;
pub mod sdk;
pub mod tags;

/// Version injected at compile time via CABTECH_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("CABTECH_VERSION") {
    Some(v) => v,
    None => "dev",
};

pub use describe::{describe, get_instances, DescribeOptions, DescribeStatus, Described};
pub use lookup::{
    find_instance, find_resource, find_volume, get_instance_name_by_id, get_resource_name,
    instance_exists, resource_exists, volume_exists,
};
pub use sdk::{PaginationConfig, Params, SdkClient};
pub use tags::{get_instance_name, get_tag_by_key, has_tag, Tag};
