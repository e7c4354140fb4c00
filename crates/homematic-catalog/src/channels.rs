// crates/homematic-catalog/src/channels.rs

//! Expands channel functions into the ordered list of physical channel slots
//! of one device.

use crate::error::CatalogError;
use crate::tree::{ChannelCount, ChannelFunction, DeviceTree, MAX_CHANNEL_COUNT};
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// `"HM Remote 4 buttons"`, `"4-button"`, `"Switch actuator 2 channel"`.
static COUNT_BEFORE_KIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)(\d+)[ -](?:buttons?|single buttons|switches|channel)")
        .expect("channel count pattern is valid")
});

/// `"Remote 8"`, `"Button 2"`.
static COUNT_AFTER_KIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:button|remote) (\d+)").expect("channel count pattern is valid")
});

/// Single-channel device kinds.
static SINGLE_KIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)button|contact|switch|sensor").expect("channel count pattern is valid")
});

/// One physical channel slot of a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInstance<'a> {
    /// Function type, suffixed with `_<k>` if the type occurs more than once.
    pub name: String,
    pub channel: u32,
    /// The function this slot was expanded from.
    pub function: &'a ChannelFunction,
}

/// Enumerates the channels of `device`, skipping the maintenance function.
///
/// # Errors
/// Returns `CatalogError::UndeterminedChannelCount` if a function leaves its
/// count to the live device and the device label gives no usable hint, and
/// `CatalogError::InvalidAttributeFormat` for a fixed count above
/// `MAX_CHANNEL_COUNT`.
pub fn enumerate_channels<'a>(
    tree: &'a DeviceTree,
    device: &str,
) -> Result<Vec<ChannelInstance<'a>>, CatalogError> {
    // --- Pass 1: Expand every function into channel slots ---
    let mut slots: Vec<(u32, &'a ChannelFunction)> = Vec::new();
    for function in tree.functions.iter().filter(|f| !f.is_maintenance()) {
        let count = match function.count {
            ChannelCount::Fixed(count) if count > MAX_CHANNEL_COUNT => {
                return Err(CatalogError::InvalidAttributeFormat {
                    attribute: "count",
                    value: count.to_string(),
                });
            }
            ChannelCount::Fixed(count) => count,
            ChannelCount::FromDevice => {
                debug!(
                    "  - channel type \"{}\" has no fixed channel count",
                    function.function_type
                );
                tree.label_of(device).and_then(guess_channel_count).ok_or_else(|| {
                    CatalogError::UndeterminedChannelCount {
                        device: device.to_string(),
                        function_type: function.function_type.clone(),
                    }
                })?
            }
        };
        slots.extend((0..count).map(|offset| (function.start.saturating_add(offset), function)));
    }

    // --- Pass 2: Name the slots ---
    let mut totals: HashMap<&str, u32> = HashMap::new();
    for (_, function) in &slots {
        *totals.entry(function.function_type.as_str()).or_default() += 1;
    }

    let mut occurrences: HashMap<&str, u32> = HashMap::new();
    let channels = slots
        .into_iter()
        .map(|(channel, function)| {
            let function_type = function.function_type.as_str();
            let name = if totals.get(function_type).copied().unwrap_or_default() > 1 {
                let k = occurrences.entry(function_type).or_default();
                *k += 1;
                format!("{}_{}", function_type, k)
            } else {
                function_type.to_string()
            };
            ChannelInstance {
                name,
                channel,
                function,
            }
        })
        .collect();

    Ok(channels)
}

/// Guesses a channel count from a human readable device label.
///
/// Patterns are tried in a fixed priority order and the first match wins,
/// even if a later pattern would also match. Counts of zero or above
/// `MAX_CHANNEL_COUNT` are no usable hint.
pub fn guess_channel_count(label: &str) -> Option<u32> {
    let (count, hint) = if let Some(caps) = COUNT_BEFORE_KIND.captures(label) {
        (caps[1].parse().ok()?, caps.get(0)?.as_str())
    } else if let Some(caps) = COUNT_AFTER_KIND.captures(label) {
        (caps[1].parse().ok()?, caps.get(0)?.as_str())
    } else {
        (1, SINGLE_KIND.find(label)?.as_str())
    };

    if count == 0 || count > MAX_CHANNEL_COUNT {
        return None;
    }
    debug!("  -> guessed: {} (from \"{}\")", count, hint.trim());
    Some(count)
}
