//! Resource lookups
//!
//! Linear search over resource lists returned by [`describe`](crate::describe).
//! An absent list is treated the same as an empty one.

use serde_json::Value;

/// Identifier field of EC2 instances
pub const INSTANCE_ID: &str = "InstanceId";
/// Identifier field of EBS volumes
pub const VOLUME_ID: &str = "VolumeId";

fn matches_id(resource: &Value, id: &str, key: &str) -> bool {
    resource.get(key).and_then(|v| v.as_str()) == Some(id)
}

/// First resource whose `key` field equals `id`
pub fn find_resource<'a>(resources: Option<&'a [Value]>, id: &str, key: &str) -> Option<&'a Value> {
    resources?.iter().find(|resource| matches_id(resource, id, key))
}

/// Whether any resource's `key` field equals `id`
pub fn resource_exists(resources: Option<&[Value]>, id: &str, key: &str) -> bool {
    find_resource(resources, id, key).is_some()
}

/// Name of the resource identified by `id`
///
/// Not implemented: always returns `None`. Resolving the name from tags is an
/// open product decision, use [`get_instance_name`](crate::tags::get_instance_name)
/// on a found resource instead.
pub fn get_resource_name(_resources: Option<&[Value]>, _id: &str, _key: &str) -> Option<String> {
    None
}

pub fn find_instance<'a>(instances: Option<&'a [Value]>, iid: &str) -> Option<&'a Value> {
    find_resource(instances, iid, INSTANCE_ID)
}

pub fn instance_exists(instances: Option<&[Value]>, iid: &str) -> bool {
    resource_exists(instances, iid, INSTANCE_ID)
}

/// Not implemented, see [`get_resource_name`]
pub fn get_instance_name_by_id(instances: Option<&[Value]>, iid: &str) -> Option<String> {
    get_resource_name(instances, iid, INSTANCE_ID)
}

pub fn find_volume<'a>(volumes: Option<&'a [Value]>, vid: &str) -> Option<&'a Value> {
    find_resource(volumes, vid, VOLUME_ID)
}

pub fn volume_exists(volumes: Option<&[Value]>, vid: &str) -> bool {
    resource_exists(volumes, vid, VOLUME_ID)
}
