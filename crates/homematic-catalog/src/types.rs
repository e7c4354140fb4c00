// crates/homematic-catalog/src/types.rs

//! Public data structures of the persisted device catalog.
//!
//! These serialize one-to-one into the JSON catalog consumed at runtime.

use serde::{Deserialize, Serialize};

// --- Parameter ---

/// A single readable or writable value exposed by one channel of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// `<channel>.<parameter-id>`, or the bare parameter ID if it is
    /// unambiguous for the whole device.
    pub name: String,
    pub channel: u32,
    /// Value type for outbound writes. Never set for read parameters.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<ParamType>,
    /// Symbolic value names indexed by the integer wire value. Unused
    /// indices hold an empty string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<Vec<String>>,
}

impl Parameter {
    /// The parameter ID without its channel qualifier.
    pub fn bare_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// The channel qualifier, if the name is qualified.
    pub fn namespace(&self) -> Option<&str> {
        self.name.split_once('.').map(|(ns, _)| ns)
    }

    /// Returns the symbolic name for a wire value, if the parameter has a
    /// mapping and the slot is populated.
    pub fn symbol_for(&self, value: u64) -> Option<&str> {
        let index = usize::try_from(value).ok()?;
        self.mapping
            .as_ref()?
            .get(index)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Value type of a writable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Float,
    Boolean,
    Action,
}

// --- Device Descriptor ---

/// The normalized capability record of one device family.
///
/// Every alias in `names` shares exactly the same `read`/`write` lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<Vec<Parameter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<Vec<Parameter>>,
}

impl DeviceDescriptor {
    /// Compares the parameter lists of two descriptors, ignoring `names`.
    ///
    /// The comparison is order-sensitive.
    pub fn is_equivalent(&self, other: &DeviceDescriptor) -> bool {
        self.read == other.read && self.write == other.write
    }

    /// Returns `true` if `name` is one of this descriptor's aliases.
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, channel: u32) -> Parameter {
        Parameter {
            name: name.into(),
            channel,
            param_type: None,
            mapping: None,
        }
    }

    #[test]
    fn test_name_parts() {
        let qualified = param("KEY_1.PRESS_SHORT", 1);
        assert_eq!(qualified.bare_name(), "PRESS_SHORT");
        assert_eq!(qualified.namespace(), Some("KEY_1"));

        let bare = param("STATE", 1);
        assert_eq!(bare.bare_name(), "STATE");
        assert_eq!(bare.namespace(), None);
    }

    #[test]
    fn test_symbol_for() {
        let mut p = param("DIRECTION", 1);
        assert_eq!(p.symbol_for(0), None);
        p.mapping = Some(vec!["NONE".into(), String::new(), "DOWN".into()]);
        assert_eq!(p.symbol_for(0), Some("NONE"));
        assert_eq!(p.symbol_for(1), None);
        assert_eq!(p.symbol_for(2), Some("DOWN"));
        assert_eq!(p.symbol_for(3), None);
    }

    #[test]
    fn test_equivalence_ignores_names_but_not_order() {
        let a = DeviceDescriptor {
            names: vec!["HM-A".into()],
            read: Some(vec![param("STATE", 1), param("LEVEL", 1)]),
            write: None,
        };
        let b = DeviceDescriptor {
            names: vec!["HM-B".into()],
            ..a.clone()
        };
        assert!(a.is_equivalent(&b));

        let reordered = DeviceDescriptor {
            names: vec!["HM-C".into()],
            read: Some(vec![param("LEVEL", 1), param("STATE", 1)]),
            write: None,
        };
        assert!(!a.is_equivalent(&reordered));

        // An absent list is not the same as an empty one.
        let empty = DeviceDescriptor {
            names: vec!["HM-D".into()],
            read: Some(Vec::new()),
            write: None,
        };
        let absent = DeviceDescriptor {
            read: None,
            ..empty.clone()
        };
        assert!(!empty.is_equivalent(&absent));
    }

    #[test]
    fn test_serialized_shape() {
        let descriptor = DeviceDescriptor {
            names: vec!["HM-LC-Sw1-FM".into()],
            read: None,
            write: Some(vec![Parameter {
                name: "STATE".into(),
                channel: 1,
                param_type: Some(ParamType::Boolean),
                mapping: None,
            }]),
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert_eq!(
            json,
            r#"{"names":["HM-LC-Sw1-FM"],"write":[{"name":"STATE","channel":1,"type":"boolean"}]}"#
        );
    }
}
