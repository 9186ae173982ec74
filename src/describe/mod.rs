//! Describe layer
//!
//! Turns any describe-style operation into one flat, ordered list of items,
//! whether the operation is paginated or answers in a single call.
//!
//! # Architecture
//!
//! - [`options`] - Caller options and the structured result
//! - [`describer`] - Path selection, page flattening and item extraction
//!
//! # Paths
//!
//! 1. Paginated operations are driven page by page with a page size hint of 50.
//! 2. `describe_images` is never paginated and requires an `Owners` filter.
//! 3. Everything else is a single call.
//!
//! # Example
//!
//! ```ignore
//! use cabtech::describe::{describe, DescribeOptions};
//!
//! let described = describe(&client, "describe_instances", "Reservations",
//!     DescribeOptions::new().sub_key("Instances")).await?;
//! if !described.is_complete() {
//!     eprintln!("partial result: {}", described.status);
//! }
//! ```

mod describer;
mod options;

pub use describer::{describe, get_instances, DESCRIBE_IMAGES};
pub use options::{DescribeOptions, DescribeStatus, Described};
