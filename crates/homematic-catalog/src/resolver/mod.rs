// crates/homematic-catalog/src/resolver/mod.rs

//! Handles the business logic of resolving a deserialized vendor model into
//! the dialect-agnostic [`DeviceTree`].
//!
//! This includes:
//! 1. Collecting the supported device IDs and their labels.
//! 2. Resolving channel functions (start index, count, parameter group).
//! 3. Resolving parameter groups, including legacy shared valuesets.
//! 4. Mapping the logical type elements onto [`crate::tree::LogicalType`].

mod homegear;
mod legacy;

use crate::error::CatalogError;
use crate::parser::SchemaKind;
use crate::tree::DeviceTree;

/// Resolves the final `DeviceTree` from a deserialized document.
pub(crate) fn resolve_tree(document: &SchemaKind) -> Result<DeviceTree, CatalogError> {
    match document {
        SchemaKind::Legacy(device) => legacy::resolve(device),
        SchemaKind::Homegear(device) => homegear::resolve(device),
    }
}
