// crates/homematic-catalog/src/error.rs

use core::fmt;
use core::num::ParseIntError;
use quick_xml::errors::serialize::DeError;
use quick_xml::Error as XmlError;

/// Errors that can occur while compiling device descriptions into a catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// An error from the underlying `quick-xml` deserializer.
    XmlParsing(DeError),

    /// An error from the underlying `quick-xml` reader during the root pre-check.
    XmlReading(XmlError),

    /// The document is well-formed but its root element does not belong to
    /// the selected dialect (e.g., a Homegear file fed to the legacy adapter).
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    /// A required XML element was missing (e.g., the supported device list).
    MissingElement { element: &'static str },

    /// A required attribute was missing (e.g., channel @index).
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An attribute (e.g., @index) had an invalid format.
    InvalidAttributeFormat {
        attribute: &'static str,
        value: String,
    },

    /// A channel has no fixed count and none could be inferred from the
    /// device label.
    UndeterminedChannelCount {
        device: String,
        function_type: String,
    },

    /// An error from `serde_json` while writing or loading a catalog.
    Serialization(serde_json::Error),
}

impl CatalogError {
    /// Returns `true` if the error must abort the whole compiler run.
    ///
    /// Schema errors only invalidate the file (or device) they were found in.
    pub fn is_fatal(&self) -> bool {
        match self {
            CatalogError::XmlParsing(_)
            | CatalogError::XmlReading(_)
            | CatalogError::UnexpectedRoot { .. }
            | CatalogError::Serialization(_) => true,
            CatalogError::MissingElement { .. }
            | CatalogError::MissingAttribute { .. }
            | CatalogError::InvalidAttributeFormat { .. }
            | CatalogError::UndeterminedChannelCount { .. } => false,
        }
    }
}

impl From<DeError> for CatalogError {
    fn from(e: DeError) -> Self {
        CatalogError::XmlParsing(e)
    }
}

impl From<XmlError> for CatalogError {
    fn from(e: XmlError) -> Self {
        CatalogError::XmlReading(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e)
    }
}

/// Converts `ParseIntError` (typically from reading channel indices) into a user-friendly error.
impl From<ParseIntError> for CatalogError {
    fn from(e: ParseIntError) -> Self {
        CatalogError::InvalidAttributeFormat {
            attribute: "numeric attribute",
            value: e.to_string(),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::XmlParsing(e) => write!(f, "XML parsing error: {}", e),
            CatalogError::XmlReading(e) => write!(f, "XML reading error: {}", e),
            CatalogError::UnexpectedRoot { expected, found } => write!(
                f,
                "Unexpected root element <{}>, expected <{}>",
                found, expected
            ),
            CatalogError::MissingElement { element } => {
                write!(f, "Missing required XML element: {}", element)
            }
            CatalogError::MissingAttribute { element, attribute } => {
                write!(f, "Missing required attribute {} on <{}>", attribute, element)
            }
            CatalogError::InvalidAttributeFormat { attribute, value } => {
                write!(f, "Invalid format for attribute {}: '{}'", attribute, value)
            }
            CatalogError::UndeterminedChannelCount {
                device,
                function_type,
            } => write!(
                f,
                "Could not determine channel count of function {} for device {}",
                function_type, device
            ),
            CatalogError::Serialization(e) => write!(f, "JSON serialization error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::XmlParsing(e) => Some(e),
            CatalogError::XmlReading(e) => Some(e),
            CatalogError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors raised by the runtime lookup helpers in [`crate::lookup`].
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// No writable parameter with this name exists on the device.
    UnknownParameter(String),

    /// The value cannot be coerced into the parameter's declared type.
    InvalidValue { parameter: String, reason: String },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::UnknownParameter(name) => write!(f, "Unknown parameter: {}", name),
            LookupError::InvalidValue { parameter, reason } => {
                write!(f, "Invalid value for {}: {}", parameter, reason)
            }
        }
    }
}

impl std::error::Error for LookupError {}
