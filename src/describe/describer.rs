//! Describer
//!
//! Picks one of three retrieval paths for an operation and flattens whatever
//! comes back into [`Described`].

use super::options::{DescribeOptions, DescribeStatus, Described};
use crate::sdk::{PaginationConfig, Params, SdkClient};
use anyhow::Result;
use futures::TryStreamExt;
use serde_json::Value;

/// Image listing; never paginated and refused without an owner filter
pub const DESCRIBE_IMAGES: &str = "describe_images";
const OWNERS: &str = "Owners";
const IMAGES: &str = "Images";

const DESCRIBE_INSTANCES: &str = "describe_instances";
const RESERVATIONS: &str = "Reservations";
const INSTANCES: &str = "Instances";

/// Run `task` and collect the items found under `key`
///
/// Paginated operations are walked to the end. The result keeps source order.
/// A missing owner filter or a missing key is reported through
/// [`Described::status`] and logged; client errors are returned unchanged.
pub async fn describe<C: SdkClient>(
    client: &C,
    task: &str,
    key: &str,
    options: DescribeOptions,
) -> Result<Described> {
    let DescribeOptions {
        sub_key,
        params,
        pagination,
    } = options;

    let described = if client.can_paginate(task) {
        describe_paginated(client, task, key, sub_key.as_deref(), pagination, params).await?
    } else if task == DESCRIBE_IMAGES {
        describe_images(client, params).await?
    } else {
        describe_once(client, task, key, params).await?
    };

    tracing::info!(
        "{} returned {} items in {} pages",
        task,
        described.items.len(),
        described.rounds
    );

    Ok(described)
}

/// All instances across reservations, in order
pub async fn get_instances<C: SdkClient>(client: &C, params: Params) -> Result<Vec<Value>> {
    let response = client.call(DESCRIBE_INSTANCES, params).await?;
    let reservations = extract(response, RESERVATIONS, DESCRIBE_INSTANCES);

    let num_reservations = reservations.items.len();
    let instances: Vec<Value> = reservations
        .items
        .into_iter()
        .flat_map(|mut reservation| {
            reservation
                .get_mut(INSTANCES)
                .map(Value::take)
                .map(into_items)
                .unwrap_or_default()
        })
        .collect();

    tracing::debug!(
        "Loaded {} instances from {} reservations",
        instances.len(),
        num_reservations
    );

    Ok(instances)
}

async fn describe_paginated<C: SdkClient>(
    client: &C,
    task: &str,
    key: &str,
    sub_key: Option<&str>,
    pagination: PaginationConfig,
    params: Params,
) -> Result<Described> {
    let config = PaginationConfig::default_hint().merge(pagination);
    let mut pages = client.paginate(task, config, params);
    let mut described = Described::default();

    while let Some(mut page) = pages.try_next().await? {
        described.rounds += 1;

        let Some(collection) = page.get_mut(key).map(Value::take) else {
            tracing::error!("KeyError for {} in {} (page {})", key, task, described.rounds);
            flag(&mut described, missing_key(key, task));
            continue;
        };

        let Some(sub_key) = sub_key else {
            described.items.extend(into_items(collection));
            continue;
        };

        for mut item in into_items(collection) {
            match item.get_mut(sub_key).map(Value::take) {
                Some(sub_items) => described.items.extend(into_items(sub_items)),
                None => {
                    tracing::error!("KeyError for {} in {} {}", sub_key, task, key);
                    flag(&mut described, missing_key(sub_key, task));
                },
            }
        }
    }

    Ok(described)
}

async fn describe_images<C: SdkClient>(client: &C, params: Params) -> Result<Described> {
    if !params.contains_key(OWNERS) {
        tracing::error!("Will not query for all images - need an Owner");
        return Ok(Described {
            status: DescribeStatus::MissingOwnerFilter,
            ..Described::default()
        });
    }

    let response = client.call(DESCRIBE_IMAGES, params).await?;
    Ok(extract(response, IMAGES, DESCRIBE_IMAGES))
}

async fn describe_once<C: SdkClient>(
    client: &C,
    task: &str,
    key: &str,
    params: Params,
) -> Result<Described> {
    let response = client.call(task, params).await?;
    Ok(extract(response, key, task))
}

/// Pull `key` out of a single-call response
fn extract(mut response: Value, key: &str, task: &str) -> Described {
    let mut described = Described {
        rounds: 1,
        ..Described::default()
    };

    match response.get_mut(key).map(Value::take) {
        Some(collection) => described.items = into_items(collection),
        None => {
            tracing::error!("KeyError for {} in {}", key, task);
            described.status = missing_key(key, task);
        },
    }

    described
}

/// Arrays yield their elements, null yields nothing, anything else is one item
fn into_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn missing_key(key: &str, task: &str) -> DescribeStatus {
    DescribeStatus::MissingKey {
        key: key.to_string(),
        task: task.to_string(),
    }
}

/// Record the first problem seen; later ones are only logged
fn flag(described: &mut Described, status: DescribeStatus) {
    if described.is_complete() {
        described.status = status;
    }
}
