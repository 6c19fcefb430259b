// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire-level plumbing for the LVI cloud API.
//!
//! - [`HttpClient`]: form POSTs under a bounded timeout
//! - [`signing`]: password digest, nonce and request signature
//! - [`classify`]: maps a response body onto a [`Reply`] or a typed error
//!
//! Every request body is `application/x-www-form-urlencoded`, built from a
//! [`Payload`].

pub(crate) mod envelope;
mod http;
pub mod signing;

pub use envelope::{Reply, classify};
pub use http::HttpClient;

/// Ordered form fields of a request body.
///
/// # Examples
///
/// ```
/// use lvi_lib::protocol::Payload;
///
/// let payload = Payload::new()
///     .field("smarthome_id", "12")
///     .field("query[gv_mode]", 3);
///
/// assert_eq!(payload.get("query[gv_mode]"), Some("3"));
/// assert_eq!(payload.encode(), "smarthome_id=12&query%5Bgv_mode%5D=3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    fields: Vec<(String, String)>,
}

impl Payload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a field in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.fields.push((key.into(), value.to_string()));
    }

    /// Returns the first value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns all fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Returns `true` if no field was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encodes the fields as an URL-encoded form body.
    #[must_use]
    pub fn encode(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_encodes_to_empty_string() {
        assert!(Payload::new().is_empty());
        assert_eq!(Payload::new().encode(), "");
    }

    #[test]
    fn values_are_escaped() {
        let payload = Payload::new().field("email", "a b@example.com");
        assert_eq!(payload.encode(), "email=a%20b%40example.com");
    }

    #[test]
    fn get_returns_first_match() {
        let mut payload = Payload::new().field("k", "1");
        payload.push("k", "2");
        assert_eq!(payload.get("k"), Some("1"));
        assert_eq!(payload.fields().len(), 2);
        assert_eq!(payload.get("missing"), None);
    }
}
