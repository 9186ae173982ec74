//! Describe options and results

use crate::config::Config;
use crate::sdk::{PaginationConfig, Params};
use serde_json::Value;
use std::fmt;

/// Options for a describe call
///
/// Pagination settings set here override the built-in defaults field by field.
#[derive(Debug, Clone, Default)]
pub struct DescribeOptions {
    /// Flatten each extracted item by this field (paginated operations only)
    pub sub_key: Option<String>,
    /// Keyword arguments forwarded to the operation
    pub params: Params,
    /// Caller pagination settings
    pub pagination: PaginationConfig,
}

impl DescribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options seeded with the configured page size
    pub fn from_config(config: &Config) -> Self {
        Self::new().page_size(config.effective_page_size())
    }

    pub fn sub_key(mut self, sub_key: &str) -> Self {
        self.sub_key = Some(sub_key.to_string());
        self
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.pagination.page_size = Some(page_size);
        self
    }

    pub fn max_items(mut self, max_items: u32) -> Self {
        self.pagination.max_items = Some(max_items);
        self
    }

    pub fn starting_token(mut self, token: &str) -> Self {
        self.pagination.starting_token = Some(token.to_string());
        self
    }
}

/// How a describe call ended
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DescribeStatus {
    /// All requested data was extracted
    #[default]
    Complete,
    /// `describe_images` was refused because no `Owners` filter was given
    MissingOwnerFilter,
    /// A response lacked the field holding the items
    MissingKey { key: String, task: String },
}

impl fmt::Display for DescribeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescribeStatus::Complete => write!(f, "complete"),
            DescribeStatus::MissingOwnerFilter => {
                write!(f, "will not query for all images - need an Owner")
            },
            DescribeStatus::MissingKey { key, task } => write!(f, "{} missing in {}", key, task),
        }
    }
}

/// Items produced by a describe call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Described {
    /// Items in source order
    pub items: Vec<Value>,
    /// Round trips consumed (pages for paginated operations)
    pub rounds: usize,
    pub status: DescribeStatus,
}

impl Described {
    pub fn is_complete(&self) -> bool {
        self.status == DescribeStatus::Complete
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::DEFAULT_PAGE_SIZE;
    use serde_json::json;

    #[test]
    fn test_builder_collects_params() {
        let options = DescribeOptions::new()
            .sub_key("Instances")
            .param("Owners", json!(["self"]))
            .param("DryRun", false);
        assert_eq!(options.sub_key.as_deref(), Some("Instances"));
        assert_eq!(options.params["Owners"], json!(["self"]));
        assert_eq!(options.params["DryRun"], json!(false));
    }

    #[test]
    fn test_params_later_values_win() {
        let mut extra = Params::new();
        extra.insert("MaxResults".to_string(), json!(5));
        let options = DescribeOptions::new().param("MaxResults", 10).params(extra);
        assert_eq!(options.params["MaxResults"], json!(5));
    }

    #[test]
    fn test_from_config_seeds_page_size() {
        let config = Config {
            page_size: Some(20),
            ..Config::default()
        };
        assert_eq!(DescribeOptions::from_config(&config).pagination.page_size, Some(20));
        assert_eq!(
            DescribeOptions::from_config(&Config::default()).pagination.page_size,
            Some(DEFAULT_PAGE_SIZE)
        );
    }

    #[test]
    fn test_status_display() {
        let status = DescribeStatus::MissingKey {
            key: "Volumes".to_string(),
            task: "describe_volumes".to_string(),
        };
        assert_eq!(status.to_string(), "Volumes missing in describe_volumes");
        assert!(DescribeStatus::MissingOwnerFilter.to_string().contains("Owner"));
    }

    #[test]
    fn test_described_defaults() {
        let described = Described::default();
        assert!(described.is_complete());
        assert!(described.is_empty());
        assert_eq!(described.rounds, 0);
    }
}
