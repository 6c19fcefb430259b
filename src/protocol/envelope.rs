// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response envelope classification.
//!
//! Form variant bodies carry a nested result code:
//!
//! ```json
//! {"code": {"code": "1", "key": "OK", "value": "OK"}, "data": {}}
//! ```
//!
//! | `code.code` | Meaning |
//! |-------------|---------|
//! | `1` | success |
//! | `2` | command still processing on the device |
//! | `3` | token rejected / authentication failed |
//! | other | service error |
//!
//! Signed variant bodies carry an optional `errorCode`; absent or zero
//! means success, `101`/`3101` (or an `InterfaceAuthenticationFailure`
//! marker anywhere in the body) a rejected token or signature, and `3504`
//! an offline device.

use serde_json::Value;

use crate::config::Variant;
use crate::error::{Error, ParseError};

/// Form variant code for success.
pub const CODE_OK: &str = "1";
/// Form variant code for a command still being processed.
pub const CODE_PROCESSING: &str = "2";
/// Form variant code for rejected credentials or token.
pub const CODE_AUTH_FAILED: &str = "3";

const SIGNED_AUTH_FAILURE_MARKER: &str = "InterfaceAuthenticationFailure";
const SIGNED_TOKEN_CODES: [&str; 2] = ["101", "3101"];
const SIGNED_DEVICE_OFFLINE_CODE: &str = "3504";

/// Successful outcome of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Decoded JSON body.
    Data(Value),
    /// The service answered with an empty body.
    Empty,
}

impl Reply {
    /// Converts into the decoded body, `None` for an empty answer.
    #[must_use]
    pub fn into_data(self) -> Option<Value> {
        match self {
            Self::Data(value) => Some(value),
            Self::Empty => None,
        }
    }
}

/// Classifies a response body.
///
/// # Errors
///
/// - [`Error::TokenExpired`] if the token or signature was rejected
/// - [`Error::DeviceOffline`] for transient device conditions
/// - [`Error::Service`] for any other failure code
/// - [`Error::Parse`] if the body is not JSON or lacks a result code
pub fn classify(body: &str, variant: Variant) -> Result<Reply, Error> {
    if body.trim().is_empty() {
        return Ok(Reply::Empty);
    }

    if variant == Variant::Signed && body.contains(SIGNED_AUTH_FAILURE_MARKER) {
        return Err(Error::TokenExpired);
    }

    let value: Value = serde_json::from_str(body).map_err(ParseError::Json)?;

    match variant {
        Variant::Form => classify_form(value),
        Variant::Signed => classify_signed(value),
    }
}

fn classify_form(value: Value) -> Result<Reply, Error> {
    let code = result_code(&value)
        .ok_or_else(|| ParseError::MissingField("code.code".to_string()))?;

    match code.as_str() {
        CODE_OK => Ok(Reply::Data(value)),
        CODE_PROCESSING => Err(Error::DeviceOffline),
        CODE_AUTH_FAILED => Err(Error::TokenExpired),
        _ => Err(Error::Service {
            message: service_message(&value),
            code,
        }),
    }
}

fn classify_signed(value: Value) -> Result<Reply, Error> {
    let Some(code) = value.get("errorCode").and_then(scalar_string) else {
        return Ok(Reply::Data(value));
    };

    match code.as_str() {
        "0" => Ok(Reply::Data(value)),
        SIGNED_DEVICE_OFFLINE_CODE => Err(Error::DeviceOffline),
        c if SIGNED_TOKEN_CODES.contains(&c) => Err(Error::TokenExpired),
        _ => Err(Error::Service {
            message: service_message(&value),
            code,
        }),
    }
}

/// Extracts the form variant result code, if present.
pub(crate) fn result_code(value: &Value) -> Option<String> {
    value.pointer("/code/code").and_then(scalar_string)
}

/// Extracts a human readable message from an error body.
pub(crate) fn service_message(value: &Value) -> String {
    ["/code/value", "/code/key", "/error", "/errorMsg", "/message"]
        .iter()
        .find_map(|p| value.pointer(p).and_then(scalar_string))
        .unwrap_or_default()
}

/// Renders a JSON string or number as text. Null and containers yield `None`.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
