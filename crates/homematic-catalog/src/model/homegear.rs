// crates/homematic-catalog/src/model/homegear.rs

//! Contains model structs for Homegear device description files.
//!
//! (Schema: `<homegearDevice>` root, as shipped in the Homegear family modules)

use serde::Deserialize;

/// The root element of a Homegear device description.
#[derive(Debug, Deserialize, Default)]
#[serde(rename = "homegearDevice")]
pub struct HomegearDevice {
    #[serde(rename = "@version", default)]
    pub version: Option<String>,

    #[serde(rename = "supportedDevices", default)]
    pub supported_devices: Option<SupportedDevices>,

    #[serde(rename = "functions", default)]
    pub functions: Option<Functions>,

    #[serde(rename = "parameterGroups", default)]
    pub parameter_groups: Option<ParameterGroups>,
}

/// Represents `<supportedDevices>`.
#[derive(Debug, Deserialize, Default)]
pub struct SupportedDevices {
    #[serde(rename = "device", default)]
    pub devices: Vec<SupportedDevice>,
}

/// Represents `<device id="HM-LC-Sw1-FM">`.
#[derive(Debug, Deserialize, Default)]
pub struct SupportedDevice {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "description", default)]
    pub description: Option<String>,
}

/// Represents `<functions>`.
#[derive(Debug, Deserialize, Default)]
pub struct Functions {
    #[serde(rename = "function", default)]
    pub functions: Vec<Function>,
}

/// Represents `<function channel="1" type="SWITCH" channelCount="1">`.
#[derive(Debug, Deserialize, Default)]
pub struct Function {
    #[serde(rename = "@channel", default)]
    pub channel: Option<String>,

    #[serde(rename = "@type", default)]
    pub function_type: Option<String>,

    #[serde(rename = "@channelCount", default)]
    pub channel_count: Option<String>,

    /// ID of the `<variables>` group in `<parameterGroups>`.
    #[serde(rename = "variables", default)]
    pub variables: Option<String>,
}

/// Represents `<parameterGroups>`.
///
/// `configParameters` and `linkParameters` groups are ignored; only value
/// groups contribute to the catalog.
#[derive(Debug, Deserialize, Default)]
pub struct ParameterGroups {
    #[serde(rename = "variables", default)]
    pub variables: Vec<Variables>,
}

/// Represents `<variables id="switch_valueset">`.
#[derive(Debug, Deserialize, Default)]
pub struct Variables {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "parameter", default)]
    pub parameters: Vec<Parameter>,
}

/// Represents a `<parameter id="STATE">` definition.
#[derive(Debug, Deserialize, Default)]
pub struct Parameter {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "properties", default)]
    pub properties: Option<Properties>,

    #[serde(rename = "logicalAction", default)]
    pub logical_action: Option<LogicalPlain>,

    #[serde(rename = "logicalDecimal", default)]
    pub logical_decimal: Option<LogicalPlain>,

    #[serde(rename = "logicalInteger", default)]
    pub logical_integer: Option<LogicalPlain>,

    #[serde(rename = "logicalBoolean", default)]
    pub logical_boolean: Option<LogicalPlain>,

    #[serde(rename = "logicalString", default)]
    pub logical_string: Option<LogicalPlain>,

    #[serde(rename = "logicalEnumeration", default)]
    pub logical_enumeration: Option<LogicalEnumeration>,

    #[serde(rename = "logicalArray", default)]
    pub logical_array: Option<LogicalPlain>,

    #[serde(rename = "logicalStruct", default)]
    pub logical_struct: Option<LogicalPlain>,

    #[serde(rename = "packets", default)]
    pub packets: Option<Packets>,
}

/// Represents `<properties>` of a parameter.
#[derive(Debug, Deserialize, Default)]
pub struct Properties {
    #[serde(rename = "readable", default)]
    pub readable: Option<String>,

    #[serde(rename = "writeable", default)]
    pub writeable: Option<String>,
}

/// Any logical element whose content the compiler does not inspect
/// (`<logicalInteger>`, `<logicalBoolean/>`, ...).
#[derive(Debug, Deserialize, Default)]
pub struct LogicalPlain {
    #[serde(rename = "defaultValue", default)]
    pub default_value: Option<String>,
}

/// Represents `<logicalEnumeration>`.
#[derive(Debug, Deserialize, Default)]
pub struct LogicalEnumeration {
    #[serde(rename = "value", default)]
    pub values: Vec<EnumerationValue>,
}

/// Represents `<value><id>OPEN</id><index>1</index></value>`.
#[derive(Debug, Deserialize, Default)]
pub struct EnumerationValue {
    #[serde(rename = "id")]
    pub id: String,

    #[serde(rename = "index", default)]
    pub index: Option<String>,
}

/// Represents `<packets>`.
#[derive(Debug, Deserialize, Default)]
pub struct Packets {
    #[serde(rename = "packet", default)]
    pub packets: Vec<Packet>,
}

/// Represents `<packet id="INFO_LEVEL"><type>event</type></packet>`.
#[derive(Debug, Deserialize, Default)]
pub struct Packet {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,

    /// `event`, `get` or `set`.
    #[serde(rename = "type", default)]
    pub packet_type: Option<String>,
}
