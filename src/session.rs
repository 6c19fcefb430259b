// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session state and login.
//!
//! Credentials live in memory only, for the lifetime of the [`Session`].
//! A failed login never touches the previously held token.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

use crate::config::{ClientConfig, Variant};
use crate::error::{Error, ParseError, Result};
use crate::protocol::envelope::{CODE_AUTH_FAILED, CODE_OK, result_code, scalar_string};
use crate::protocol::signing::password_digest;
use crate::protocol::{HttpClient, Payload};

/// Format of the token expiry reported at login.
pub const TOKEN_EXPIRY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Account credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username (account e-mail).
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Builds the login form for a backend variant.
    ///
    /// The form variant sends the MD5 hex digest of the password, the signed
    /// variant the password itself.
    #[must_use]
    pub fn login_payload(&self, variant: Variant) -> Payload {
        let password = match variant {
            Variant::Form => password_digest(&self.password),
            Variant::Signed => self.password.clone(),
        };
        Payload::new()
            .field("email", &self.username)
            .field("password", password)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token, user id and expiry granted by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    /// Session token.
    pub token: String,
    /// Service user id.
    pub user_id: String,
    /// Token expiry, when reported.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthGrant {
    /// Decodes a login response body.
    ///
    /// The form variant requires a token expiry; the signed variant accepts
    /// its absence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] for an empty body, a rejected login,
    /// a body that is not JSON, or a missing token, user id or expiry, and
    /// [`Error::Parse`] for an unreadable expiry.
    pub fn from_body(body: &str, variant: Variant) -> Result<Self> {
        if body.trim().is_empty() {
            return Err(Error::Authentication("empty response".to_string()));
        }

        let value: Value = serde_json::from_str(body).map_err(|e| {
            tracing::debug!(error = %e, "Login response is not JSON");
            Error::Authentication("malformed response".to_string())
        })?;

        match variant {
            Variant::Form => Self::from_form(&value),
            Variant::Signed => Self::from_signed(&value),
        }
    }

    fn from_form(value: &Value) -> Result<Self> {
        match result_code(value).as_deref() {
            Some(CODE_OK) => {}
            Some(CODE_AUTH_FAILED) => {
                return Err(Error::Authentication("credentials rejected".to_string()));
            }
            Some(code) => {
                return Err(Error::Authentication(format!("unexpected result code {code}")));
            }
            None => return Err(Error::Authentication("malformed response".to_string())),
        }

        let token = required(value, "/data/token", "token")?;
        let user_id = required(value, "/data/user_infos/user_id", "user id")?;
        let expiry = required(value, "/data/user_infos/token_expire", "token expiry")?;

        Ok(Self {
            token,
            user_id,
            expires_at: Some(parse_expiry(&expiry)?),
        })
    }

    fn from_signed(value: &Value) -> Result<Self> {
        if let Some(code) = value.get("errorCode").and_then(scalar_string) {
            if code != "0" {
                return Err(Error::Authentication(format!("login refused with code {code}")));
            }
        }

        let token = required(value, "/data/token", "token")?;
        let user_id = required(value, "/data/userId", "user id")?;
        let expires_at = value
            .pointer("/data/tokenExpire")
            .and_then(scalar_string)
            .map(|s| parse_expiry(&s))
            .transpose()?;

        Ok(Self {
            token,
            user_id,
            expires_at,
        })
    }
}

fn required(value: &Value, pointer: &str, what: &str) -> Result<String> {
    value
        .pointer(pointer)
        .and_then(scalar_string)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Authentication(format!("no {what} in response")))
}

/// Parses a `YYYY-MM-DD HH:MM:SS` expiry, interpreted as UTC.
///
/// # Errors
///
/// Returns [`ParseError::InvalidValue`] if the string does not match.
pub fn parse_expiry(raw: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), TOKEN_EXPIRY_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            ParseError::InvalidValue {
                field: "token_expire".to_string(),
                message: e.to_string(),
            }
            .into()
        })
}

/// In-memory session for one account.
#[derive(Debug, Clone)]
pub struct Session {
    credentials: Credentials,
    token: Option<String>,
    token_expiry: Option<DateTime<Utc>>,
    user_id: Option<String>,
}

impl Session {
    /// Creates an unauthenticated session.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token: None,
            token_expiry: None,
            user_id: None,
        }
    }

    /// Returns the credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the current token.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the user id of the last successful login.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Returns the token expiry, when known.
    #[must_use]
    pub fn token_expiry(&self) -> Option<DateTime<Utc>> {
        self.token_expiry
    }

    /// Returns `true` if a token is held, regardless of expiry.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returns `true` if a token is held and has not expired.
    #[must_use]
    pub fn is_token_valid(&self) -> bool {
        self.is_token_valid_at(Utc::now())
    }

    /// Same as [`is_token_valid`](Self::is_token_valid) against a given clock.
    #[must_use]
    pub fn is_token_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.token, self.token_expiry) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(_), Some(expiry)) => now < expiry,
        }
    }

    /// Drops the token.
    pub fn invalidate(&mut self) {
        self.token = None;
    }

    /// Stores a login grant.
    pub fn apply(&mut self, grant: AuthGrant) {
        self.token = Some(grant.token);
        self.user_id = Some(grant.user_id);
        self.token_expiry = grant.expires_at;
    }

    /// Logs in, retrying transport failures up to the configured budget.
    ///
    /// # Errors
    ///
    /// Returns the last transport error once the budget is exhausted, or
    /// the first authentication/parse error.
    pub async fn authenticate(&mut self, http: &HttpClient, config: &ClientConfig) -> Result<()> {
        let url = config.url(&config.endpoints().auth);
        let payload = self.credentials.login_payload(config.variant());
        let attempts = config.auth_attempts();

        let mut attempt = 0;
        loop {
            attempt += 1;
            match http.post_payload(&url, &payload).await {
                Ok(body) => {
                    let grant = AuthGrant::from_body(&body, config.variant()).inspect_err(|e| {
                        tracing::error!(error = %e, "Authentication failed");
                    })?;
                    tracing::info!(user_id = %grant.user_id, "Authenticated");
                    self.apply(grant);
                    return Ok(());
                }
                Err(e) if e.is_transient() && attempt < attempts => {
                    tracing::warn!(attempt, error = %e, "Login attempt failed, retrying");
                }
                Err(e) => {
                    tracing::error!(attempt, error = %e, "Error connecting to the service");
                    return Err(e.into());
                }
            }
        }
    }
}
