//! Tag lookups
//!
//! Resources carry tags as an ordered `Tags` array of `{"Key": .., "Value": ..}`
//! objects. Keys are not required to be unique; the first match wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Returned by [`get_instance_name`] when a resource has neither a name tag nor an id
pub const NO_SUCH_INSTANCE: &str = "NoSuchInstance";

/// A resource tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl Tag {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// The raw `Tags` array of a resource, empty when absent
pub fn resource_tags(resource: &Value) -> &[Value] {
    resource
        .get("Tags")
        .and_then(|v| v.as_array())
        .map(|tags| tags.as_slice())
        .unwrap_or(&[])
}

/// Typed tags of a resource; malformed entries are skipped
pub fn parse_tags(resource: &Value) -> Vec<Tag> {
    resource_tags(resource)
        .iter()
        .filter_map(|tag| Tag::deserialize(tag).ok())
        .collect()
}

fn tag_matches(tag: &Value, key: &str) -> bool {
    tag.get("Key").and_then(|k| k.as_str()) == Some(key)
}

/// Value of the first tag named `key`, or `default`
pub fn get_tag_by_key<'a>(tags: &'a [Value], key: &str, default: &'a str) -> &'a str {
    tags.iter()
        .find(|tag| tag_matches(tag, key))
        .and_then(|tag| tag.get("Value"))
        .and_then(|v| v.as_str())
        .unwrap_or(default)
}

/// Whether any tag is named `key`
pub fn has_tag(tags: &[Value], key: &str) -> bool {
    tags.iter().any(|tag| tag_matches(tag, key))
}

/// An instance's `Name` tag, falling back to its `InstanceId`
pub fn get_instance_name(instance: &Value) -> String {
    let fallback = instance
        .get("InstanceId")
        .and_then(|v| v.as_str())
        .unwrap_or(NO_SUCH_INSTANCE);
    get_tag_by_key(resource_tags(instance), "Name", fallback).to_string()
}
