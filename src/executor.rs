// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated request execution with bounded retries.
//!
//! [`RequestExecutor::execute`] folds three failure modes into one retry
//! envelope:
//!
//! | Outcome | Action |
//! |---------|--------|
//! | timeout / connection error | retry |
//! | token or signature rejected | drop token, log in again, retry |
//! | device offline / processing | sleep the backoff, retry |
//! | service error code | fail |
//! | empty body | `Ok(None)` |
//!
//! Every attempt consumes the budget; once it is spent the last error is
//! returned.

use chrono::Utc;
use serde_json::Value;

use crate::config::{ClientConfig, Variant};
use crate::error::{Error, ProtocolError, Result};
use crate::protocol::signing::signed_headers;
use crate::protocol::{HttpClient, Payload, Reply, classify};
use crate::session::{Credentials, Session};

/// Issues API calls on behalf of a [`Session`].
#[derive(Debug)]
pub struct RequestExecutor {
    http: HttpClient,
    config: ClientConfig,
    session: Session,
}

impl RequestExecutor {
    /// Creates an executor with an unauthenticated session.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAddress`] if the base URL does not
    /// parse, or error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig, credentials: Credentials) -> std::result::Result<Self, ProtocolError> {
        reqwest::Url::parse(config.base_url())
            .map_err(|e| ProtocolError::InvalidAddress(format!("{}: {e}", config.base_url())))?;
        let http = HttpClient::new(config.timeout())?;
        Ok(Self {
            http,
            config,
            session: Session::new(credentials),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Logs in and stores the new token.
    ///
    /// # Errors
    ///
    /// See [`Session::authenticate`].
    pub async fn authenticate(&mut self) -> Result<()> {
        self.session.authenticate(&self.http, &self.config).await
    }

    /// Drops the session token.
    pub fn invalidate(&mut self) {
        self.session.invalidate();
    }

    /// Sends `payload` to the `command` endpoint.
    ///
    /// Returns `Ok(None)` when the service answers with an empty body.
    ///
    /// # Errors
    ///
    /// - [`Error::NoSession`] without a token; no request is sent
    /// - [`Error::Authentication`] if a required re-login fails
    /// - [`Error::Service`] / [`Error::Parse`] immediately
    /// - the last retryable error once `attempts` is spent
    pub async fn execute(
        &mut self,
        command: &str,
        payload: &Payload,
        attempts: u32,
    ) -> Result<Option<Value>> {
        if !self.session.has_token() {
            tracing::error!(command = %command, "No token");
            return Err(Error::NoSession);
        }

        if !self.session.is_token_valid() {
            tracing::info!(command = %command, "Session token expired, logging in again");
            self.authenticate().await?;
        }

        let attempts = attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let remaining = attempts - attempt;

            let err = match self.send(command, payload).await {
                Ok(reply) => return Ok(reply.into_data()),
                Err(e) => e,
            };

            match err {
                Error::TokenExpired => {
                    // The token stays cleared only if the new login fails
                    self.session.invalidate();
                    tracing::warn!(command = %command, attempt, "Token rejected, logging in again");
                    self.authenticate().await?;
                    if remaining == 0 {
                        tracing::error!(command = %command, attempt, "Token rejected, retries exhausted");
                        return Err(Error::TokenExpired);
                    }
                }
                Error::DeviceOffline if remaining > 0 => {
                    tracing::warn!(
                        command = %command,
                        attempt,
                        backoff_ms = u64::try_from(self.config.offline_backoff().as_millis()).unwrap_or(u64::MAX),
                        "Device offline, backing off"
                    );
                    tokio::time::sleep(self.config.offline_backoff()).await;
                }
                e if e.is_retryable() && remaining > 0 => {
                    tracing::warn!(command = %command, attempt, error = %e, "Request failed, retrying");
                }
                e => {
                    tracing::error!(command = %command, attempt, error = %e, "Error sending command");
                    return Err(e);
                }
            }
        }
    }

    async fn send(&self, command: &str, payload: &Payload) -> Result<Reply> {
        let (body, headers) = self.prepare(payload)?;
        let url = self.config.url(command);
        let text = self.http.post_form(&url, body, &headers).await?;
        classify(&text, self.config.variant())
    }

    /// Attaches the session to a request body.
    fn prepare(&self, payload: &Payload) -> Result<(String, Vec<(&'static str, String)>)> {
        let token = self.session.token().ok_or(Error::NoSession)?;

        match self.config.variant() {
            Variant::Form => {
                let mut payload = payload.clone();
                payload.push("token", token);
                payload.push("email", self.session.credentials().username());
                Ok((payload.encode(), Vec::new()))
            }
            Variant::Signed => {
                let user_id = self.session.user_id().ok_or(Error::NoSession)?;
                let body = payload.encode();
                let headers = signed_headers(token, user_id, body.len(), Utc::now().timestamp());
                Ok((body, headers))
            }
        }
    }
}
