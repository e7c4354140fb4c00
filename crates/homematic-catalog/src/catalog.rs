// crates/homematic-catalog/src/catalog.rs

//! The running catalog that device trees are folded into, one input file at a
//! time.

use crate::channels::enumerate_channels;
use crate::error::CatalogError;
use crate::params::{AccessMode, collect_parameters};
use crate::tree::DeviceTree;
use crate::types::DeviceDescriptor;
use log::{debug, info, warn};
use std::collections::BTreeSet;

/// A device that was found but could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedDevice {
    pub name: String,
    /// The input the device was read from.
    pub source: String,
}

/// Outcome of folding one input file into the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSummary {
    /// Device IDs listed in the file.
    pub devices: usize,
    /// Devices skipped because an earlier definition already exists.
    pub already_known: usize,
    /// New descriptors appended to the catalog.
    pub added: usize,
    /// Devices folded into an equivalent descriptor of the same file.
    pub merged: usize,
    pub unsupported: usize,
}

/// Totals reported after a compiler run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub input_files: usize,
    pub skipped_files: usize,
    pub unique_names: usize,
    pub descriptors: usize,
    pub unsupported: usize,
}

/// Accumulates descriptors across all input files of one run.
#[derive(Debug, Default)]
pub struct Catalog {
    descriptors: Vec<DeviceDescriptor>,
    known_names: BTreeSet<String>,
    unsupported: Vec<UnsupportedDevice>,
    input_files: usize,
    skipped_files: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles every device of `tree` and folds it into the catalog.
    ///
    /// The first definition of a device name wins. Equivalent descriptors are
    /// only merged with descriptors produced from the same tree.
    pub fn add_tree(&mut self, source: &str, tree: &DeviceTree) -> FileSummary {
        self.input_files += 1;
        let mut summary = FileSummary::default();
        let mut local: Vec<DeviceDescriptor> = Vec::new();

        for device in &tree.devices {
            summary.devices += 1;
            let name = device.id.as_str();

            // Names are registered before compiling, so unsupported devices
            // still shadow later definitions.
            if !self.known_names.insert(name.to_string()) {
                info!(" - device \"{}\" already known, skipping.", name);
                summary.already_known += 1;
                continue;
            }
            info!(" - found device \"{}\"", name);

            let descriptor = match build_descriptor(tree, name) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    warn!(" - device \"{}\" is not supported: {}", name, e);
                    self.unsupported.push(UnsupportedDevice {
                        name: name.to_string(),
                        source: source.to_string(),
                    });
                    summary.unsupported += 1;
                    continue;
                }
            };

            match local.iter_mut().find(|d| d.is_equivalent(&descriptor)) {
                Some(existing) => {
                    debug!("  - merging into descriptor of \"{}\"", existing.names[0]);
                    existing.names.push(name.to_string());
                    summary.merged += 1;
                }
                None => {
                    local.push(descriptor);
                    summary.added += 1;
                }
            }
        }

        self.descriptors.extend(local);
        summary
    }

    /// Counts an input file that was rejected as a whole.
    pub fn record_skipped_file(&mut self) {
        self.input_files += 1;
        self.skipped_files += 1;
    }

    pub fn descriptors(&self) -> &[DeviceDescriptor] {
        &self.descriptors
    }

    pub fn unsupported(&self) -> &[UnsupportedDevice] {
        &self.unsupported
    }

    /// Returns `true` if `name` was seen in any input so far, supported or not.
    pub fn is_known(&self, name: &str) -> bool {
        self.known_names.contains(name)
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            input_files: self.input_files,
            skipped_files: self.skipped_files,
            unique_names: self.known_names.len(),
            descriptors: self.descriptors.len(),
            unsupported: self.unsupported.len(),
        }
    }
}

/// Builds the descriptor of a single device name.
///
/// # Errors
/// Returns `CatalogError::UndeterminedChannelCount` if the channels of the
/// device cannot be enumerated.
pub fn build_descriptor(tree: &DeviceTree, name: &str) -> Result<DeviceDescriptor, CatalogError> {
    let channels = enumerate_channels(tree, name)?;
    Ok(DeviceDescriptor {
        names: vec![name.to_string()],
        read: collect_parameters(tree, &channels, AccessMode::Event),
        write: collect_parameters(tree, &channels, AccessMode::Write),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{
        ChannelCount, ChannelFunction, LogicalType, PacketTypes, ParameterDef,
        ParameterGroup, SupportedDevice,
    };
    use std::collections::BTreeMap;

    fn device(id: &str, label: Option<&str>) -> SupportedDevice {
        SupportedDevice {
            id: id.into(),
            label: label.map(str::to_string),
        }
    }

    /// A legacy-style tree whose channel count comes from the device label.
    fn remote_tree(devices: Vec<SupportedDevice>) -> DeviceTree {
        let mut groups = BTreeMap::new();
        groups.insert(
            "key_valueset".to_string(),
            ParameterGroup {
                id: "key_valueset".into(),
                parameters: vec![ParameterDef {
                    id: "PRESS_SHORT".into(),
                    readable: true,
                    writable: true,
                    logical: LogicalType::Action,
                    packets: None::<PacketTypes>,
                }],
            },
        );
        DeviceTree {
            devices,
            functions: vec![ChannelFunction {
                function_type: "KEY".into(),
                start: 1,
                count: ChannelCount::FromDevice,
                group: Some("key_valueset".into()),
            }],
            groups,
        }
    }

    #[test]
    fn test_equivalent_devices_merge_within_file() {
        let tree = remote_tree(vec![
            device("HM-RC-4", Some("Remote 4 buttons")),
            device("HM-RC-4-B", Some("Remote 4 buttons")),
            device("HM-RC-2", Some("Remote 2 buttons")),
        ]);
        let mut catalog = Catalog::new();
        let summary = catalog.add_tree("remotes.xml", &tree);

        assert_eq!(summary.devices, 3);
        assert_eq!(summary.added, 2);
        assert_eq!(summary.merged, 1);
        let descriptors = catalog.descriptors();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].names, vec!["HM-RC-4", "HM-RC-4-B"]);
        assert_eq!(descriptors[0].read.as_ref().unwrap().len(), 4);
        assert_eq!(descriptors[1].names, vec!["HM-RC-2"]);
    }

    #[test]
    fn test_no_merge_across_files() {
        let mut catalog = Catalog::new();
        catalog.add_tree("a.xml", &remote_tree(vec![device("HM-A", Some("2 buttons"))]));
        catalog.add_tree("b.xml", &remote_tree(vec![device("HM-B", Some("2 buttons"))]));
        assert_eq!(catalog.descriptors().len(), 2);
        assert!(catalog.descriptors()[0].is_equivalent(&catalog.descriptors()[1]));
    }

    #[test]
    fn test_first_definition_wins() {
        let mut catalog = Catalog::new();
        catalog.add_tree("a.xml", &remote_tree(vec![device("HM-X", Some("2 buttons"))]));
        let summary =
            catalog.add_tree("b.xml", &remote_tree(vec![device("HM-X", Some("4 buttons"))]));

        assert_eq!(summary.already_known, 1);
        assert_eq!(summary.added, 0);
        assert_eq!(catalog.descriptors().len(), 1);
        assert_eq!(catalog.descriptors()[0].read.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_unsupported_device_is_excluded_but_known() {
        let mut catalog = Catalog::new();
        let summary = catalog.add_tree(
            "a.xml",
            &remote_tree(vec![device("HM-WDS", Some("Weather station"))]),
        );
        assert_eq!(summary.unsupported, 1);
        assert!(catalog.descriptors().is_empty());
        assert_eq!(
            catalog.unsupported(),
            &[UnsupportedDevice {
                name: "HM-WDS".into(),
                source: "a.xml".into(),
            }]
        );
        assert!(catalog.is_known("HM-WDS"));

        // A later file cannot redefine it.
        let summary =
            catalog.add_tree("b.xml", &remote_tree(vec![device("HM-WDS", Some("1 button"))]));
        assert_eq!(summary.already_known, 1);
        assert!(catalog.descriptors().is_empty());
    }

    #[test]
    fn test_stats() {
        let mut catalog = Catalog::new();
        catalog.add_tree(
            "a.xml",
            &remote_tree(vec![
                device("HM-A", Some("2 buttons")),
                device("HM-B", Some("2 buttons")),
                device("HM-C", None),
            ]),
        );
        catalog.record_skipped_file();
        assert_eq!(
            catalog.stats(),
            CatalogStats {
                input_files: 2,
                skipped_files: 1,
                unique_names: 3,
                descriptors: 1,
                unsupported: 1,
            }
        );
    }
}
