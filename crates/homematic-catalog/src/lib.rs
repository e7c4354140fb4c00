// crates/homematic-catalog/src/lib.rs

#![doc = "Compiles HomeMatic device-description XML into a JSON device catalog."]
#![doc = ""]
#![doc = "Two vendor dialects are supported: the legacy `rftypes` XML (`<device>`)"]
#![doc = "and Homegear XML (`<homegearDevice>`). Both are resolved into one"]
#![doc = "intermediate `DeviceTree`, from which every supported device name gets a"]
#![doc = "`DeviceDescriptor` listing its readable and writable parameters."]
#![doc = ""]
#![doc = "It provides:"]
#![doc = "- `decode_document`: Turning raw file bytes (UTF-8 or ISO-8859-1) into text."]
#![doc = "- `compile_document`: Folding one XML document into a running `Catalog`."]
#![doc = "- `save_catalog_to_string`: Serializing the merged descriptors to JSON."]
#![doc = "- `lookup`: Runtime helpers to interpret events and build writes."]

// --- Crate Modules ---

mod builder;
mod catalog;
mod channels;
mod error;
mod model;
mod params;
mod parser;
mod resolver;
mod tree;
mod types;

pub mod lookup;

// --- Public API Re-exports ---

pub use builder::{load_catalog_from_str, save_catalog_to_string, save_catalog_to_writer};
pub use catalog::{Catalog, CatalogStats, FileSummary, UnsupportedDevice, build_descriptor};
pub use channels::{ChannelInstance, enumerate_channels, guess_channel_count};
pub use error::{CatalogError, LookupError};
pub use params::{AccessMode, collect_parameters};
pub use parser::{SchemaKind, decode_document, load_tree_from_str, parse_document};
pub use tree::{
    ChannelCount, ChannelFunction, DeviceTree, Dialect, EnumValue, LogicalType, MAX_CHANNEL_COUNT,
    MAX_ENUM_INDEX, PacketTypes, ParameterDef, ParameterGroup, SupportedDevice,
};
pub use types::{DeviceDescriptor, ParamType, Parameter};

use log::{error, info};

/// Parses one device description and folds its devices into `catalog`.
///
/// # Arguments
/// * `catalog` - The running catalog of the current compiler run.
/// * `source` - A name for the document, used in diagnostics.
/// * `xml_content` - The full XML document.
/// * `dialect` - The schema the document is expected to follow.
///
/// # Errors
/// Only fatal errors are returned (malformed XML, wrong root element). A
/// document that lacks required elements is logged, counted as skipped and
/// yields an empty `FileSummary`.
pub fn compile_document(
    catalog: &mut Catalog,
    source: &str,
    xml_content: &str,
    dialect: Dialect,
) -> Result<FileSummary, CatalogError> {
    info!("- parsing {}", source);

    match load_tree_from_str(xml_content, dialect) {
        Ok(tree) => Ok(catalog.add_tree(source, &tree)),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            error!("- skipping {}: {}", source, e);
            catalog.record_skipped_file();
            Ok(FileSummary::default())
        }
    }
}
