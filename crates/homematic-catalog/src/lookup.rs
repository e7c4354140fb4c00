// crates/homematic-catalog/src/lookup.rs

//! Runtime helpers for consumers of a compiled catalog.
//!
//! Incoming device events are addressed by a topic ending in
//! `<channel>/<parameter>`. They are matched against a descriptor's `read`
//! list and collected into a JSON payload object. Outbound writes are
//! matched by parameter name against the `write` list and coerced to the
//! declared value type.

use crate::error::LookupError;
use crate::types::{DeviceDescriptor, ParamType, Parameter};
use serde_json::{Map, Number, Value};

/// Finds the descriptor that lists `alias` among its names.
pub fn find_descriptor<'a>(catalog: &'a [DeviceDescriptor], alias: &str) -> Option<&'a DeviceDescriptor> {
    catalog.iter().find(|d| d.has_name(alias))
}

/// Returns `(bare name, channel)` of every readable parameter.
pub fn readable_params(descriptor: &DeviceDescriptor) -> Vec<(&str, u32)> {
    descriptor
        .read
        .iter()
        .flatten()
        .map(|p| (p.bare_name(), p.channel))
        .collect()
}

/// Returns the writable parameters as stored in the catalog.
pub fn writable_params(descriptor: &DeviceDescriptor) -> &[Parameter] {
    descriptor.write.as_deref().unwrap_or_default()
}

// --- Event payloads ---

/// Builds an empty payload with one `null` slot per readable parameter.
///
/// Qualified names produce a nested object per channel, e.g.
/// `{"key_1": {"press_short": null}}`. All keys are lower-cased.
pub fn payload_template(descriptor: &DeviceDescriptor) -> Map<String, Value> {
    let mut payload = Map::new();
    for param in descriptor.read.iter().flatten() {
        *slot_mut(&mut payload, param) = Value::Null;
    }
    payload
}

/// Returns `true` if no slot of the payload, at any depth, is still `null`.
pub fn payload_is_complete(payload: &Map<String, Value>) -> bool {
    payload.values().all(|value| match value {
        Value::Null => false,
        Value::Object(nested) => payload_is_complete(nested),
        _ => true,
    })
}

/// Stores an event value into the payload.
///
/// The last two segments of `topic` select the channel and the bare
/// parameter name. Numeric values of enumerations are replaced by their
/// symbolic name when the mapping has one. Returns `false` if the topic does
/// not address a readable parameter of the device.
pub fn update_payload(
    descriptor: &DeviceDescriptor,
    payload: &mut Map<String, Value>,
    topic: &str,
    value: Value,
) -> bool {
    let mut segments = topic.rsplit('/');
    let (Some(target), Some(channel)) = (segments.next(), segments.next()) else {
        return false;
    };
    let Ok(channel) = channel.parse::<u32>() else {
        return false;
    };

    let Some(param) = descriptor
        .read
        .iter()
        .flatten()
        .find(|p| p.channel == channel && p.bare_name() == target)
    else {
        return false;
    };

    let value = match value.as_u64().and_then(|wire| param.symbol_for(wire)) {
        Some(symbol) => Value::String(symbol.to_string()),
        None => value,
    };
    *slot_mut(payload, param) = value;
    true
}

/// Returns the payload slot of a parameter, creating it if necessary.
fn slot_mut<'a>(payload: &'a mut Map<String, Value>, param: &Parameter) -> &'a mut Value {
    let key = param.bare_name().to_lowercase();
    let Some(namespace) = param.namespace() else {
        return payload.entry(key).or_insert(Value::Null);
    };

    let nested = payload
        .entry(namespace.to_lowercase())
        .or_insert_with(|| Value::Object(Map::new()));
    if !nested.is_object() {
        *nested = Value::Object(Map::new());
    }
    match nested {
        Value::Object(map) => map.entry(key).or_insert(Value::Null),
        // Replaced by an object above.
        other => other,
    }
}

// --- Outbound writes ---

/// A resolved and type-checked write to one device parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRequest {
    pub channel: u32,
    /// The bare parameter ID as the device knows it.
    pub parameter: String,
    pub value: Value,
}

/// Resolves a write by parameter name and coerces `value` to the declared
/// type.
///
/// # Errors
/// Returns `LookupError::UnknownParameter` if no writable parameter has this
/// name, and `LookupError::InvalidValue` if the value cannot be coerced.
pub fn coerce_write(
    descriptor: &DeviceDescriptor,
    name: &str,
    value: &Value,
) -> Result<WriteRequest, LookupError> {
    let param = writable_params(descriptor)
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| LookupError::UnknownParameter(name.to_string()))?;

    let invalid = |reason: &str| LookupError::InvalidValue {
        parameter: name.to_string(),
        reason: reason.to_string(),
    };

    let value = match param.param_type {
        None => value.clone(),
        Some(ParamType::Action) => Value::Bool(true),
        Some(ParamType::String) => match value {
            Value::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        },
        Some(ParamType::Boolean) => Value::Bool(coerce_bool(value).ok_or_else(|| invalid("expected a boolean"))?),
        Some(ParamType::Integer) => coerce_integer(param, value)
            .map(|i| Value::Number(i.into()))
            .ok_or_else(|| invalid("expected an integer or a known symbol"))?,
        Some(ParamType::Float) => coerce_float(value)
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| invalid("expected a number"))?,
    };

    Ok(WriteRequest {
        channel: param.channel,
        parameter: param.bare_name().to_string(),
        value,
    })
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_integer(param: &Parameter, value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                param
                    .mapping
                    .as_ref()?
                    .iter()
                    .position(|symbol| !symbol.is_empty() && symbol == s)
                    .and_then(|index| i64::try_from(index).ok())
            })
        }
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
