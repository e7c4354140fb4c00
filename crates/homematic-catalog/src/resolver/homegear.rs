// crates/homematic-catalog/src/resolver/homegear.rs

//! Resolves Homegear device models.

use crate::error::CatalogError;
use crate::model::homegear;
use crate::parser::{parse_bounded, parse_flag, parse_u32};
use crate::tree::{
    ChannelCount, ChannelFunction, DeviceTree, EnumValue, LogicalType, MAX_CHANNEL_COUNT,
    MAX_ENUM_INDEX, PacketTypes, ParameterDef, ParameterGroup, SupportedDevice,
};
use log::debug;
use std::collections::BTreeMap;

pub(super) fn resolve(device: &homegear::HomegearDevice) -> Result<DeviceTree, CatalogError> {
    let supported = device
        .supported_devices
        .as_ref()
        .ok_or(CatalogError::MissingElement {
            element: "supportedDevices",
        })?;
    let functions = device.functions.as_ref().ok_or(CatalogError::MissingElement {
        element: "functions",
    })?;

    let devices = supported
        .devices
        .iter()
        .map(|d| SupportedDevice {
            id: d.id.clone(),
            label: d.description.clone(),
        })
        .collect();

    let functions = functions
        .functions
        .iter()
        .filter_map(|f| resolve_function(f).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    let mut groups = BTreeMap::new();
    if let Some(parameter_groups) = &device.parameter_groups {
        for variables in &parameter_groups.variables {
            let group = ParameterGroup {
                id: variables.id.clone(),
                parameters: variables
                    .parameters
                    .iter()
                    .map(resolve_parameter)
                    .collect::<Result<Vec<_>, _>>()?,
            };
            groups.entry(variables.id.clone()).or_insert(group);
        }
    }

    Ok(DeviceTree {
        devices,
        functions,
        groups,
    })
}

/// Resolves a `<function>`. Functions without a `<variables>` reference do
/// not expose any channel and yield `None`.
fn resolve_function(function: &homegear::Function) -> Result<Option<ChannelFunction>, CatalogError> {
    let function_type = function
        .function_type
        .clone()
        .ok_or(CatalogError::MissingAttribute {
            element: "function",
            attribute: "type",
        })?;

    let Some(group) = function.variables.as_ref().map(|v| v.trim().to_string()) else {
        debug!("  - function {} has no variables, ignoring", function_type);
        return Ok(None);
    };

    let start = function
        .channel
        .as_deref()
        .ok_or(CatalogError::MissingAttribute {
            element: "function",
            attribute: "channel",
        })
        .and_then(|s| parse_u32("channel", s))?;
    let count = function
        .channel_count
        .as_deref()
        .map(|s| parse_bounded("channelCount", s, MAX_CHANNEL_COUNT))
        .transpose()?
        .unwrap_or(1);

    Ok(Some(ChannelFunction {
        function_type,
        start,
        count: ChannelCount::Fixed(count),
        group: Some(group),
    }))
}

fn resolve_parameter(parameter: &homegear::Parameter) -> Result<ParameterDef, CatalogError> {
    let properties = parameter.properties.as_ref();
    let readable = properties
        .and_then(|p| p.readable.as_deref())
        .is_none_or(parse_flag);
    let writable = properties
        .and_then(|p| p.writeable.as_deref())
        .is_none_or(parse_flag);

    // A parameter without <packets> is never transmitted.
    let packets = parameter
        .packets
        .as_ref()
        .map(|p| {
            p.packets
                .iter()
                .fold(PacketTypes::default(), |acc, packet| {
                    match packet.packet_type.as_deref().map(str::trim) {
                        Some("event") => PacketTypes { event: true, ..acc },
                        Some("set") => PacketTypes { set: true, ..acc },
                        _ => acc,
                    }
                })
        })
        .unwrap_or_default();

    Ok(ParameterDef {
        id: parameter.id.clone(),
        readable,
        writable,
        logical: resolve_logical(parameter)?,
        packets: Some(packets),
    })
}

/// Picks the logical type from whichever `logical*` element is present.
fn resolve_logical(parameter: &homegear::Parameter) -> Result<LogicalType, CatalogError> {
    let logical = if parameter.logical_action.is_some() {
        LogicalType::Action
    } else if parameter.logical_decimal.is_some() {
        LogicalType::Float
    } else if parameter.logical_integer.is_some() {
        LogicalType::Integer
    } else if parameter.logical_boolean.is_some() {
        LogicalType::Boolean
    } else if parameter.logical_string.is_some() {
        LogicalType::String
    } else if let Some(enumeration) = &parameter.logical_enumeration {
        LogicalType::Enumeration(resolve_enumeration(enumeration)?)
    } else if parameter.logical_array.is_some() {
        LogicalType::Other("array".into())
    } else if parameter.logical_struct.is_some() {
        LogicalType::Other("struct".into())
    } else {
        LogicalType::Other(String::new())
    };
    Ok(logical)
}

/// Values without an explicit `<index>` follow their predecessor. Indices
/// above `MAX_ENUM_INDEX` are rejected.
fn resolve_enumeration(
    enumeration: &homegear::LogicalEnumeration,
) -> Result<Vec<EnumValue>, CatalogError> {
    let mut next = 0u32;
    enumeration
        .values
        .iter()
        .map(|value| {
            let index = match value.index.as_deref() {
                Some(s) => parse_bounded("index", s, MAX_ENUM_INDEX)?,
                None if next > MAX_ENUM_INDEX => {
                    return Err(CatalogError::InvalidAttributeFormat {
                        attribute: "index",
                        value: next.to_string(),
                    });
                }
                None => next,
            };
            next = index.saturating_add(1);
            Ok(EnumValue {
                index,
                id: value.id.trim().to_string(),
            })
        })
        .collect()
}
