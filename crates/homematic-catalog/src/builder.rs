// crates/homematic-catalog/src/builder.rs

//! Serializes the compiled descriptor list into the persisted JSON catalog,
//! and loads it back for runtime lookups.

use crate::error::CatalogError;
use crate::types::DeviceDescriptor;
use std::io::Write;

/// Serializes the catalog into a pretty-printed JSON array (two-space
/// indentation) terminated by a newline.
///
/// # Arguments
/// * `descriptors` - The merged descriptors, in catalog order.
///
/// # Returns
/// * `Result<String, CatalogError>` - The JSON document or a serialization error.
pub fn save_catalog_to_string(descriptors: &[DeviceDescriptor]) -> Result<String, CatalogError> {
    let mut buffer = serde_json::to_string_pretty(descriptors)?;
    buffer.push('\n');
    Ok(buffer)
}

/// Writes the same document as [`save_catalog_to_string`] into `writer`.
///
/// I/O failures are reported through `CatalogError::Serialization`, whose
/// source is the underlying `std::io::Error`.
pub fn save_catalog_to_writer<W: Write>(
    mut writer: W,
    descriptors: &[DeviceDescriptor],
) -> Result<(), CatalogError> {
    serde_json::to_writer_pretty(&mut writer, descriptors)?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(serde_json::Error::io)?;
    Ok(())
}

/// Parses a catalog previously written by this crate.
pub fn load_catalog_from_str(json: &str) -> Result<Vec<DeviceDescriptor>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ParamType, Parameter};
    use std::io::{Read, Seek, SeekFrom};

    fn catalog() -> Vec<DeviceDescriptor> {
        vec![DeviceDescriptor {
            names: vec!["HM-LC-Sw2-FM".into()],
            read: None,
            write: Some(vec![
                Parameter {
                    name: "STATE".into(),
                    channel: 0,
                    param_type: Some(ParamType::Boolean),
                    mapping: None,
                },
                Parameter {
                    name: "STATE".into(),
                    channel: 1,
                    param_type: Some(ParamType::Boolean),
                    mapping: None,
                },
            ]),
        }]
    }

    #[test]
    fn test_pretty_layout() {
        let json = save_catalog_to_string(&catalog()).unwrap();
        let expected = r#"[
  {
    "names": [
      "HM-LC-Sw2-FM"
    ],
    "write": [
      {
        "name": "STATE",
        "channel": 0,
        "type": "boolean"
      },
      {
        "name": "STATE",
        "channel": 1,
        "type": "boolean"
      }
    ]
  }
]
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(save_catalog_to_string(&[]).unwrap(), "[]\n");
    }

    #[test]
    fn test_writer_matches_string() {
        let mut file = tempfile::tempfile().unwrap();
        save_catalog_to_writer(&mut file, &catalog()).unwrap();

        let mut written = String::new();
        file.seek(SeekFrom::Start(0)).unwrap();
        file.read_to_string(&mut written).unwrap();
        assert_eq!(written, save_catalog_to_string(&catalog()).unwrap());
        assert_eq!(load_catalog_from_str(&written).unwrap(), catalog());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let result = load_catalog_from_str("{\"names\": 1}");
        assert!(matches!(result, Err(CatalogError::Serialization(_))));
    }
}
