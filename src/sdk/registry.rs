//! Operation Registry - Load operation definitions from JSON
//!
//! Maps operation names (`describe_instances`, ...) to the REST endpoint that
//! serves them and records whether the endpoint understands pagination tokens.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded operation JSON files (compiled into the library)
const OPERATION_FILES: &[(&str, &str)] = &[
    ("ec2.json", include_str!("../operations/ec2.json")),
    ("autoscaling.json", include_str!("../operations/autoscaling.json")),
];

/// Operation definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct OperationDef {
    pub service: String,
    pub path: String,
    /// Field of the response holding the result collection
    pub result_key: String,
    #[serde(default)]
    pub paginated: bool,
}

impl OperationDef {
    /// Path relative to the client endpoint
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.service, self.path)
    }
}

/// Root structure of operations/*.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationConfig {
    #[serde(default)]
    pub operations: HashMap<String, OperationDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<OperationConfig> = OnceLock::new();

/// Get the operation registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static OperationConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = OperationConfig::default();

        for (name, content) in OPERATION_FILES {
            match serde_json::from_str::<OperationConfig>(content) {
                Ok(partial) => final_config.operations.extend(partial.operations),
                Err(e) => tracing::error!("Failed to parse embedded operations {}: {}", name, e),
            }
        }

        final_config
    })
}

/// Get an operation definition by name
pub fn get_operation(name: &str) -> Option<&'static OperationDef> {
    get_registry().operations.get(name)
}

/// Get all operation names, sorted
pub fn get_all_operation_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = get_registry()
        .operations
        .keys()
        .map(|s| s.as_str())
        .collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_embedded_file_parses() {
        for (name, content) in OPERATION_FILES {
            let parsed = serde_json::from_str::<OperationConfig>(content);
            assert!(parsed.is_ok(), "{} should parse: {:?}", name, parsed.err());
        }
    }

    #[test]
    fn test_describe_instances_is_paginated() {
        let op = get_operation("describe_instances").expect("describe_instances exists");
        assert!(op.paginated);
        assert_eq!(op.result_key, "Reservations");
        assert_eq!(op.relative_path(), "ec2/instances");
    }

    #[test]
    fn test_describe_images_is_not_paginated() {
        let op = get_operation("describe_images").expect("describe_images exists");
        assert!(!op.paginated);
        assert_eq!(op.result_key, "Images");
    }

    #[test]
    fn test_get_all_operation_names() {
        let names = get_all_operation_names();
        assert!(names.contains(&"describe_volumes"));
        assert!(names.contains(&"describe_auto_scaling_groups"));
        assert!(names.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_result_keys_name_collections() {
        for name in get_all_operation_names() {
            let op = get_operation(name).expect("listed operation exists");
            assert!(
                op.result_key.ends_with('s'),
                "{} extracts {} which is not a collection",
                name,
                op.result_key
            );
        }
        assert!(get_operation("describe_account_limits").is_none());
    }

    #[test]
    fn test_unknown_operation() {
        assert!(get_operation("terminate_everything").is_none());
    }
}
