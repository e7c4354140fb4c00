// crates/homematic-catalog/src/parser.rs

use crate::error::CatalogError;
use crate::model;
use crate::resolver;
use crate::tree::{Dialect, DeviceTree};
use log::warn;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::borrow::Cow;

/// A deserialized document, tagged with the schema it was read as.
#[derive(Debug)]
pub enum SchemaKind {
    Legacy(model::LegacyDevice),
    Homegear(model::HomegearDevice),
}

impl SchemaKind {
    pub fn dialect(&self) -> Dialect {
        match self {
            SchemaKind::Legacy(_) => Dialect::Legacy,
            SchemaKind::Homegear(_) => Dialect::Homegear,
        }
    }
}

/// Parses a device description and resolves it into a [`DeviceTree`].
///
/// # Arguments
/// * `xml_content` - A string slice containing the full XML file.
/// * `dialect` - The schema the file is expected to follow.
///
/// # Errors
/// Returns a fatal `CatalogError` if the XML is malformed or its root element
/// does not match `dialect`, and a non-fatal schema error if required
/// elements or attributes are missing.
pub fn load_tree_from_str(xml_content: &str, dialect: Dialect) -> Result<DeviceTree, CatalogError> {
    let document = parse_document(xml_content, dialect)?;
    resolver::resolve_tree(&document)
}

/// Checks the root element and deserializes the document into the model of
/// the selected dialect.
pub fn parse_document(xml_content: &str, dialect: Dialect) -> Result<SchemaKind, CatalogError> {
    // 1. Dialect pre-check on the root element.
    let expected = dialect.root_element();
    let found = root_element_name(xml_content)?;
    if found.as_deref() != Some(expected) {
        return Err(CatalogError::UnexpectedRoot {
            expected,
            found: found.unwrap_or_default(),
        });
    }

    // 2. Deserialize the raw XML string into our internal model.
    let document = match dialect {
        Dialect::Legacy => SchemaKind::Legacy(quick_xml::de::from_str(xml_content)?),
        Dialect::Homegear => SchemaKind::Homegear(quick_xml::de::from_str(xml_content)?),
    };
    Ok(document)
}

/// Decodes the raw bytes of a device description into text.
///
/// Documents declaring `ISO-8859-1` (the encoding `rftypes` files ship in)
/// are decoded as Latin-1. Everything else is read as UTF-8, with invalid
/// sequences replaced.
pub fn decode_document(bytes: &[u8]) -> Cow<'_, str> {
    if declared_encoding(bytes).is_some_and(|e| is_latin1(&e)) {
        return Cow::Owned(bytes.iter().copied().map(char::from).collect());
    }
    let text = String::from_utf8_lossy(bytes);
    if let Cow::Owned(_) = text {
        warn!("document is not valid UTF-8, replacing invalid bytes");
    }
    text
}

/// Reads the `encoding` pseudo-attribute of the XML declaration, if any.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(bytes);
    match reader.read_event() {
        Ok(Event::Decl(decl)) => {
            let encoding = decl.encoding()?.ok()?;
            Some(String::from_utf8_lossy(&encoding).trim().to_ascii_lowercase())
        }
        _ => None,
    }
}

fn is_latin1(encoding: &str) -> bool {
    matches!(
        encoding,
        "iso-8859-1" | "iso8859-1" | "iso_8859-1" | "latin1" | "latin-1" | "l1"
    )
}

/// Returns the local name of the first element in the document.
fn root_element_name(xml_content: &str) -> Result<Option<String>, CatalogError> {
    let mut reader = Reader::from_str(xml_content);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                return Ok(Some(name));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

// --- Helper Functions (Public for use in the resolvers) ---

/// Parses a decimal attribute value into a u32.
pub fn parse_u32(attribute: &'static str, s: &str) -> Result<u32, CatalogError> {
    s.trim()
        .parse::<u32>()
        .map_err(|_| CatalogError::InvalidAttributeFormat {
            attribute,
            value: s.to_string(),
        })
}

/// Parses a decimal attribute value into a u32 no greater than `max`.
pub fn parse_bounded(attribute: &'static str, s: &str, max: u32) -> Result<u32, CatalogError> {
    match parse_u32(attribute, s)? {
        value if value <= max => Ok(value),
        _ => Err(CatalogError::InvalidAttributeFormat {
            attribute,
            value: s.to_string(),
        }),
    }
}

/// Parses an XML boolean text node. Anything but `false`/`0` counts as true.
pub fn parse_flag(s: &str) -> bool {
    !matches!(s.trim(), "false" | "0")
}
