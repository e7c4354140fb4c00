// crates/homematic-catalog/src/model/legacy.rs

//! Contains model structs for the legacy HomeMatic `rftypes` device files.
//!
//! (Schema: `<device>` root as shipped in the CCU firmware `rftypes/` folder)

use serde::Deserialize;

/// The root element of a legacy device description.
#[derive(Debug, Deserialize, Default)]
#[serde(rename = "device")]
pub struct Device {
    #[serde(rename = "@version", default)]
    pub version: Option<String>,

    /// All device type IDs described by this file.
    #[serde(rename = "supported_types", default)]
    pub supported_types: Option<SupportedTypes>,

    /// Shared paramsets referenced by channels (e.g. `key_valueset`).
    #[serde(rename = "paramset_defs", default)]
    pub paramset_defs: Option<ParamsetDefs>,

    #[serde(rename = "channels", default)]
    pub channels: Option<Channels>,
}

/// Represents `<supported_types>`.
#[derive(Debug, Deserialize, Default)]
pub struct SupportedTypes {
    #[serde(rename = "type", default)]
    pub types: Vec<SupportedType>,
}

/// Represents `<type id="HM-RC-4" name="HM Remote 4 buttons">`.
#[derive(Debug, Deserialize, Default)]
pub struct SupportedType {
    #[serde(rename = "@id")]
    pub id: String,

    /// Human readable device label.
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
}

/// Represents `<paramset_defs>`.
#[derive(Debug, Deserialize, Default)]
pub struct ParamsetDefs {
    #[serde(rename = "paramset", default)]
    pub paramsets: Vec<Paramset>,
}

/// Represents `<channels>`.
#[derive(Debug, Deserialize, Default)]
pub struct Channels {
    #[serde(rename = "channel", default)]
    pub channels: Vec<Channel>,
}

/// Represents a `<channel>` definition.
#[derive(Debug, Deserialize, Default)]
pub struct Channel {
    /// First channel index, as a decimal string.
    #[serde(rename = "@index", default)]
    pub index: Option<String>,

    #[serde(rename = "@type", default)]
    pub channel_type: Option<String>,

    #[serde(rename = "@count", default)]
    pub count: Option<String>,

    /// Present when the CCU reads the channel count from the device at runtime.
    #[serde(rename = "@count_from_sysinfo", default)]
    pub count_from_sysinfo: Option<String>,

    #[serde(rename = "paramset", default)]
    pub paramsets: Vec<Paramset>,
}

/// Represents a `<paramset>`, either inline in a channel or in `<paramset_defs>`.
#[derive(Debug, Deserialize, Default)]
pub struct Paramset {
    /// `MASTER`, `VALUES` or `LINK`.
    #[serde(rename = "@type", default)]
    pub paramset_type: Option<String>,

    #[serde(rename = "@id", default)]
    pub id: Option<String>,

    #[serde(rename = "parameter", default)]
    pub parameters: Vec<Parameter>,
}

/// Represents a `<parameter>` inside a paramset.
#[derive(Debug, Deserialize, Default)]
pub struct Parameter {
    #[serde(rename = "@id")]
    pub id: String,

    /// Comma separated list, e.g. `"read,write,event"`.
    #[serde(rename = "@operations", default)]
    pub operations: Option<String>,

    #[serde(rename = "logical", default)]
    pub logical: Option<Logical>,
}

/// Represents `<logical type="option">`.
#[derive(Debug, Deserialize, Default)]
pub struct Logical {
    #[serde(rename = "@type", default)]
    pub logical_type: Option<String>,

    /// Only used by `type="option"`.
    #[serde(rename = "option", default)]
    pub options: Vec<LogicalOption>,
}

/// Represents `<option id="CLOSED" default="true"/>`.
#[derive(Debug, Deserialize, Default)]
pub struct LogicalOption {
    #[serde(rename = "@id")]
    pub id: String,
}
