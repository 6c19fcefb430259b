// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw records returned by the LVI cloud API.
//!
//! The service is loose with its JSON: numbers often arrive as strings, and
//! collections come either as arrays or as objects keyed `"0"`, `"1"`, ...
//! The records here accept both shapes and keep every value raw; decoding
//! into the typed model happens in [`crate::state`].
//!
//! # Examples
//!
//! ```
//! use lvi_lib::telemetry::{DeviceRecord, parse_records};
//!
//! let body = serde_json::json!({
//!     "data": {"devices": {"0": {"id_device": "7", "fan_speed": "3"}}}
//! });
//! let devices: Vec<DeviceRecord> = parse_records(&body, "/data/devices").unwrap();
//! assert_eq!(devices[0].fan_speed, Some(3));
//! ```

mod device;
mod home;
mod zone;

pub use device::DeviceRecord;
pub use home::Home;
pub use zone::ZoneRecord;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ParseError;

/// Returns the members of an array, or the values of an object ordered by
/// numeric key. Anything else yields nothing.
#[must_use]
pub fn collection(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by_key(|(k, _)| (k.parse::<i64>().unwrap_or(i64::MAX), (*k).clone()));
            entries.into_iter().map(|(_, v)| v).collect()
        }
        _ => Vec::new(),
    }
}

/// Decodes the collection found at `pointer` into records.
///
/// A missing or null collection decodes to an empty list.
///
/// # Errors
///
/// Returns [`ParseError::Json`] if a member does not match `T`.
pub fn parse_records<T: DeserializeOwned>(body: &Value, pointer: &str) -> Result<Vec<T>, ParseError> {
    body.pointer(pointer)
        .map(collection)
        .unwrap_or_default()
        .into_iter()
        .map(|item| T::deserialize(item).map_err(ParseError::Json))
        .collect()
}

/// Reads a JSON number or numeric string as an integer.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.round() as i64))
        }
        _ => None,
    }
}

/// Deserializes an optional integer from a number or a numeric string.
/// Unparsable values become `None`.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_i64))
}

/// Deserializes an optional string from a string or a number.
/// Empty strings become `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
