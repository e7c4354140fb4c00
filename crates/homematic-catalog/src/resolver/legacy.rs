// crates/homematic-catalog/src/resolver/legacy.rs

//! Resolves legacy `rftypes` models.

use crate::error::CatalogError;
use crate::model::legacy;
use crate::parser::{parse_bounded, parse_u32};
use crate::tree::{
    ChannelCount, ChannelFunction, DeviceTree, EnumValue, LogicalType, MAX_CHANNEL_COUNT,
    ParameterDef, ParameterGroup, SupportedDevice,
};
use log::debug;
use std::collections::BTreeMap;

const VALUES_PARAMSET: &str = "VALUES";

pub(super) fn resolve(device: &legacy::Device) -> Result<DeviceTree, CatalogError> {
    let supported = device
        .supported_types
        .as_ref()
        .ok_or(CatalogError::MissingElement {
            element: "supported_types",
        })?;
    let channels = device.channels.as_ref().ok_or(CatalogError::MissingElement {
        element: "channels",
    })?;

    let devices = supported
        .types
        .iter()
        .map(|t| SupportedDevice {
            id: t.id.clone(),
            label: t.name.clone(),
        })
        .collect();

    // --- Pass 1: Shared valuesets ---
    let mut groups: BTreeMap<String, ParameterGroup> = BTreeMap::new();
    if let Some(defs) = &device.paramset_defs {
        for paramset in &defs.paramsets {
            if let Some(id) = &paramset.id {
                groups
                    .entry(id.clone())
                    .or_insert_with(|| resolve_group(id, &paramset.parameters));
            }
        }
    }

    // --- Pass 2: Channels and their inline VALUES paramsets ---
    let mut functions = Vec::with_capacity(channels.channels.len());
    for (position, channel) in channels.channels.iter().enumerate() {
        let function_type = channel
            .channel_type
            .clone()
            .ok_or(CatalogError::MissingAttribute {
                element: "channel",
                attribute: "type",
            })?;
        let start = channel
            .index
            .as_deref()
            .ok_or(CatalogError::MissingAttribute {
                element: "channel",
                attribute: "index",
            })
            .and_then(|s| parse_u32("index", s))?;

        let count = match (&channel.count, &channel.count_from_sysinfo) {
            (Some(count), _) => {
                ChannelCount::Fixed(parse_bounded("count", count, MAX_CHANNEL_COUNT)?)
            }
            (None, Some(_)) => ChannelCount::FromDevice,
            (None, None) => ChannelCount::Fixed(1),
        };

        let group = resolve_channel_group(channel, position, &function_type, &mut groups);

        functions.push(ChannelFunction {
            function_type,
            start,
            count,
            group,
        });
    }

    Ok(DeviceTree {
        devices,
        functions,
        groups,
    })
}

/// Finds the parameter group of a channel, registering inline groups.
///
/// An empty `VALUES` paramset refers to the shared `<type>_valueset`. Inline
/// paramsets belong to their channel entry alone and are keyed
/// `<id>@<position>`, so they never shadow each other or a shared valueset.
fn resolve_channel_group(
    channel: &legacy::Channel,
    position: usize,
    function_type: &str,
    groups: &mut BTreeMap<String, ParameterGroup>,
) -> Option<String> {
    let values = channel
        .paramsets
        .iter()
        .rev()
        .find(|ps| ps.paramset_type.as_deref() == Some(VALUES_PARAMSET))?;

    if values.parameters.is_empty() {
        let key = valueset_key(function_type);
        debug!("  - channel type {} uses shared valueset {}", function_type, key);
        return Some(key);
    }

    let id = values
        .id
        .clone()
        .unwrap_or_else(|| format!("{}_values", function_type.to_lowercase()));
    let key = format!("{}@{}", id, position);
    groups.insert(key.clone(), resolve_group(&id, &values.parameters));
    Some(key)
}

/// Derives the shared valueset ID for a channel type (`KEY_2` -> `key_valueset`).
fn valueset_key(function_type: &str) -> String {
    format!("{}_valueset", strip_index_suffix(function_type).to_lowercase())
}

/// Removes a trailing `_<digits>` channel index from a type name.
fn strip_index_suffix(name: &str) -> &str {
    match name.rsplit_once('_') {
        Some((base, digits)) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            base
        }
        _ => name,
    }
}

fn resolve_group(id: &str, parameters: &[legacy::Parameter]) -> ParameterGroup {
    ParameterGroup {
        id: id.to_string(),
        parameters: parameters.iter().map(resolve_parameter).collect(),
    }
}

fn resolve_parameter(parameter: &legacy::Parameter) -> ParameterDef {
    let operations: Vec<&str> = parameter
        .operations
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .collect();

    // Only `read` makes a value pollable. `event`-only parameters such as
    // PRESS_SHORT (`event,write`) stay out of the read list.
    ParameterDef {
        id: parameter.id.clone(),
        readable: operations.contains(&"read"),
        writable: operations.contains(&"write"),
        logical: resolve_logical(parameter.logical.as_ref()),
        packets: None,
    }
}

/// Maps `<logical type="...">` onto the logical type variant.
/// Option lists are indexed in declaration order.
fn resolve_logical(logical: Option<&legacy::Logical>) -> LogicalType {
    let Some(logical) = logical else {
        return LogicalType::Other(String::new());
    };

    match logical.logical_type.as_deref().unwrap_or_default() {
        "action" => LogicalType::Action,
        "boolean" => LogicalType::Boolean,
        "float" => LogicalType::Float,
        "integer" => LogicalType::Integer,
        "string" => LogicalType::String,
        "option" => LogicalType::Enumeration(
            logical
                .options
                .iter()
                .zip(0u32..)
                .map(|(option, index)| EnumValue {
                    index,
                    id: option.id.clone(),
                })
                .collect(),
        ),
        other => LogicalType::Other(other.to_string()),
    }
}
