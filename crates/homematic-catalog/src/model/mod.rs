// crates/homematic-catalog/src/model/mod.rs

//! Internal `serde` data structures that map directly to the two vendor XML
//! schemas. These are used for raw deserialization only; the resolver turns
//! them into the dialect-agnostic [`crate::tree::DeviceTree`].
//!
//! Only the elements and attributes the compiler consumes are modelled.
//! Everything else in the vendor files is ignored by serde.

#![allow(clippy::pedantic)] // XML schema names are not idiomatic Rust

pub mod homegear;
pub mod legacy;

pub use homegear::HomegearDevice;
pub use legacy::Device as LegacyDevice;
