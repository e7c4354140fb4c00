// crates/homematic-catalog/src/params.rs

//! Collects the readable or writable parameters of an enumerated device.

use crate::channels::ChannelInstance;
use crate::tree::{DeviceTree, EnumValue, LogicalType, MAX_ENUM_INDEX, ParameterDef};
use crate::types::{ParamType, Parameter};
use log::debug;
use std::collections::HashMap;

/// Which direction of traffic parameters are collected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Values the device reports (the catalog's `read` list).
    Event,
    /// Values that can be set on the device (the catalog's `write` list).
    Write,
}

impl AccessMode {
    /// Checks access flags and, for files that declare packets, the matching
    /// packet kind.
    fn admits(self, def: &ParameterDef) -> bool {
        match self {
            AccessMode::Event => def.readable && def.packets.is_none_or(|p| p.event),
            AccessMode::Write => def.writable && def.packets.is_none_or(|p| p.set),
        }
    }
}

/// Collects all parameters of `channels` that are eligible for `mode`.
///
/// Names are qualified as `<channel>.<id>`. If no parameter ID is emitted by
/// more than one function type of the device, all names are reduced to the
/// bare ID. Channels of the same function type are told apart by their
/// channel index and do not collide, whether they come from one
/// multi-channel function or from several single-channel ones.
///
/// Returns `None` if no channel contributes any parameter.
pub fn collect_parameters(
    tree: &DeviceTree,
    channels: &[ChannelInstance<'_>],
    mode: AccessMode,
) -> Option<Vec<Parameter>> {
    let mut collected: Vec<(&str, Parameter)> = Vec::new();
    let mut owners: HashMap<&str, &str> = HashMap::new();
    let mut collisions = false;

    for instance in channels {
        let Some(group) = tree.group_of(instance.function) else {
            debug!(
                "  - channel {} has no parameter group {:?}",
                instance.name, instance.function.group
            );
            continue;
        };

        for def in group.parameters.iter().filter(|def| mode.admits(def)) {
            let param_type = match mode {
                AccessMode::Event => None,
                AccessMode::Write => param_type_of(&def.logical),
            };
            let mapping = match &def.logical {
                LogicalType::Enumeration(values) => Some(build_mapping(values)),
                _ => None,
            };

            let function_type = instance.function.function_type.as_str();
            let owner = *owners.entry(def.id.as_str()).or_insert(function_type);
            if owner != function_type {
                collisions = true;
            }
            collected.push((
                def.id.as_str(),
                Parameter {
                    name: format!("{}.{}", instance.name, def.id),
                    channel: instance.channel,
                    param_type,
                    mapping,
                },
            ));
        }
    }

    if collected.is_empty() {
        return None;
    }

    if !collisions {
        debug!("  - using simplified parameter structure");
        for (id, parameter) in &mut collected {
            parameter.name = id.to_string();
        }
    }

    Some(collected.into_iter().map(|(_, p)| p).collect())
}

/// Maps a logical type onto the catalog's write type.
fn param_type_of(logical: &LogicalType) -> Option<ParamType> {
    match logical {
        LogicalType::Action => Some(ParamType::Action),
        LogicalType::Float => Some(ParamType::Float),
        LogicalType::Integer | LogicalType::Enumeration(_) => Some(ParamType::Integer),
        LogicalType::Boolean => Some(ParamType::Boolean),
        LogicalType::String => Some(ParamType::String),
        LogicalType::Other(_) => None,
    }
}

/// Builds the index -> symbol table of an enumeration. Gaps up to the highest
/// index are filled with empty strings; on duplicate indices the later value
/// wins. Values above `MAX_ENUM_INDEX` are left out.
fn build_mapping(values: &[EnumValue]) -> Vec<String> {
    let in_range = || values.iter().filter(|v| v.index <= MAX_ENUM_INDEX);
    let Some(max) = in_range().map(|v| v.index).max() else {
        return Vec::new();
    };
    if in_range().count() < values.len() {
        debug!("  - enumeration index above {} ignored", MAX_ENUM_INDEX);
    }

    let mut mapping = vec![String::new(); max as usize + 1];
    for value in in_range() {
        mapping[value.index as usize] = value.id.clone();
    }
    mapping
}
