// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the LVI cloud API.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CONNECTION, CONTENT_TYPE};

use crate::error::ProtocolError;
use crate::protocol::Payload;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Thin wrapper over a `reqwest` client that POSTs form bodies.
///
/// The timeout bounds each call as a whole. Server errors (5xx) and
/// connection failures surface as transient [`ProtocolError`]s; any other
/// status hands the body back for envelope classification.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a transport with the given per-call timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be created.
    pub fn new(timeout: Duration) -> Result<Self, ProtocolError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self { client, timeout })
    }

    /// Returns the per-call timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POSTs an already encoded form body with extra headers and returns
    /// the response text.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Timeout`] if the call exceeds the timeout,
    /// [`ProtocolError::ConnectionFailed`] on connection errors or 5xx
    /// statuses, and [`ProtocolError::Http`] for anything else.
    pub async fn post_form(
        &self,
        url: &str,
        body: String,
        headers: &[(&'static str, String)],
    ) -> Result<String, ProtocolError> {
        tracing::debug!(url = %url, "Sending HTTP request");

        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(CONNECTION, "Keep-Alive")
            .body(body);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let text = response.text().await.map_err(|e| self.map_error(e))?;

        tracing::debug!(status = status.as_u16(), len = text.len(), "Received HTTP response");

        Ok(text)
    }

    /// POSTs a [`Payload`] without extra headers.
    ///
    /// # Errors
    ///
    /// See [`post_form`](Self::post_form).
    pub async fn post_payload(&self, url: &str, payload: &Payload) -> Result<String, ProtocolError> {
        self.post_form(url, payload.encode(), &[]).await
    }

    #[allow(clippy::cast_possible_truncation)]
    fn map_error(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            ProtocolError::Timeout(self.timeout.as_millis() as u64)
        } else if err.is_connect() {
            ProtocolError::ConnectionFailed(err.to_string())
        } else {
            ProtocolError::Http(err)
        }
    }
}
