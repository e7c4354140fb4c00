// crates/homematic-catalog/src/tree.rs

//! The dialect-agnostic intermediate representation produced by the resolver.
//!
//! Everything downstream of the schema adapters (channel enumeration,
//! parameter collection, merging) only ever sees these types.

use std::collections::BTreeMap;

/// Function type of the reserved maintenance channel. It never contributes
/// parameters to the catalog.
pub const MAINTENANCE: &str = "MAINTENANCE";

/// Upper bound for the channel count of a single function.
pub const MAX_CHANNEL_COUNT: u32 = 256;

/// Upper bound for the wire index of an enumeration value.
pub const MAX_ENUM_INDEX: u32 = u16::MAX as u32;

/// Which vendor schema a document was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Legacy HomeMatic `rftypes` XML (`<device>` root).
    Legacy,
    /// Homegear XML (`<homegearDevice>` root).
    Homegear,
}

impl Dialect {
    /// Name of the root element every document of this dialect starts with.
    pub fn root_element(self) -> &'static str {
        match self {
            Dialect::Legacy => "device",
            Dialect::Homegear => "homegearDevice",
        }
    }
}

/// A fully resolved device description file.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceTree {
    /// Every device type ID backed by this description, in document order.
    pub devices: Vec<SupportedDevice>,
    /// Channel functions in document order.
    pub functions: Vec<ChannelFunction>,
    /// Parameter groups keyed by their ID.
    pub groups: BTreeMap<String, ParameterGroup>,
}

impl DeviceTree {
    /// Returns the human readable label of the given device ID, if any.
    pub fn label_of(&self, device: &str) -> Option<&str> {
        self.devices
            .iter()
            .find(|d| d.id == device)
            .and_then(|d| d.label.as_deref())
    }

    /// Looks up the parameter group a function refers to.
    pub fn group_of(&self, function: &ChannelFunction) -> Option<&ParameterGroup> {
        function.group.as_ref().and_then(|id| self.groups.get(id))
    }
}

/// One device type ID and its human readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedDevice {
    pub id: String,
    pub label: Option<String>,
}

/// How many physical channels a function spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelCount {
    Fixed(u32),
    /// The count is only known to the live device (legacy `count_from_sysinfo`).
    FromDevice,
}

/// A channel function: a run of channels sharing one type and parameter group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelFunction {
    pub function_type: String,
    /// Index of the first channel.
    pub start: u32,
    pub count: ChannelCount,
    /// Key into [`DeviceTree::groups`].
    pub group: Option<String>,
}

impl ChannelFunction {
    pub fn is_maintenance(&self) -> bool {
        self.function_type == MAINTENANCE
    }
}

/// A set of parameter definitions shared by one or more channel functions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterGroup {
    pub id: String,
    pub parameters: Vec<ParameterDef>,
}

/// A single parameter definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDef {
    pub id: String,
    pub readable: bool,
    pub writable: bool,
    pub logical: LogicalType,
    /// Packet participation. Only Homegear files declare packets; `None`
    /// means eligibility is decided by the access flags alone.
    pub packets: Option<PacketTypes>,
}

/// Which packet kinds a parameter appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PacketTypes {
    pub event: bool,
    pub set: bool,
}

/// The logical (user facing) type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalType {
    Action,
    Float,
    Integer,
    Boolean,
    String,
    Enumeration(Vec<EnumValue>),
    /// Logical types with no catalog representation (arrays, structs, ...).
    Other(String),
}

/// One symbolic value of an enumeration and its wire index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub index: u32,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> DeviceTree {
        let mut groups = BTreeMap::new();
        groups.insert(
            "switch_valueset".to_string(),
            ParameterGroup {
                id: "switch_valueset".into(),
                parameters: Vec::new(),
            },
        );
        DeviceTree {
            devices: vec![
                SupportedDevice {
                    id: "HM-LC-Sw1-FM".into(),
                    label: Some("Switch actuator".into()),
                },
                SupportedDevice {
                    id: "HM-LC-Sw1-PL".into(),
                    label: None,
                },
            ],
            functions: vec![ChannelFunction {
                function_type: "SWITCH".into(),
                start: 1,
                count: ChannelCount::Fixed(1),
                group: Some("switch_valueset".into()),
            }],
            groups,
        }
    }

    #[test]
    fn test_label_lookup() {
        let tree = tree();
        assert_eq!(tree.label_of("HM-LC-Sw1-FM"), Some("Switch actuator"));
        assert_eq!(tree.label_of("HM-LC-Sw1-PL"), None);
        assert_eq!(tree.label_of("unknown"), None);
    }

    #[test]
    fn test_group_lookup() {
        let tree = tree();
        let group = tree.group_of(&tree.functions[0]).expect("group exists");
        assert_eq!(group.id, "switch_valueset");

        let dangling = ChannelFunction {
            group: Some("missing".into()),
            ..tree.functions[0].clone()
        };
        assert!(tree.group_of(&dangling).is_none());
    }

    #[test]
    fn test_root_elements() {
        assert_eq!(Dialect::Legacy.root_element(), "device");
        assert_eq!(Dialect::Homegear.root_element(), "homegearDevice");
    }
}
