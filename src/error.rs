// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the LVI client.
//!
//! Transport failures and token expiry are recovered inside the request
//! executor while their retry budgets last. Every other kind reaches the
//! caller as a definitive failure.

use thiserror::Error;

use crate::types::DeviceId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// No session token is held; authenticate first.
    #[error("no session token, authenticate first")]
    NoSession,

    /// Credentials were rejected or the auth response was malformed.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Error occurred during transport (timeout, connection, HTTP status).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while decoding a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The service rejected the session token or request signature.
    #[error("session token rejected by the service")]
    TokenExpired,

    /// The target device is temporarily unreachable by the service.
    #[error("device is temporarily offline")]
    DeviceOffline,

    /// The service answered with a non-retryable error code.
    #[error("service error {code}: {message}")]
    Service {
        /// Result code reported by the service.
        code: String,
        /// Message reported by the service, if any.
        message: String,
    },

    /// Command target is not in the device registry.
    #[error("unknown device: {0}")]
    UnknownDevice(DeviceId),

    /// Local heater state lacks a value the command needs.
    #[error("cannot command {device_id}: {reason}")]
    InconsistentState {
        /// The targeted device.
        device_id: DeviceId,
        /// What is missing.
        reason: String,
    },

    /// The blocking runtime could not be started.
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    /// The account has no home to read rooms or devices from.
    #[error("no home registered on this account")]
    NoHome,
}

impl Error {
    /// Returns `true` if the request executor may retry after this error.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Protocol(err) => err.is_transient(),
            Self::TokenExpired | Self::DeviceOffline => true,
            _ => false,
        }
    }
}

/// Errors related to HTTP transport.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the service failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid base URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl ProtocolError {
    /// Returns `true` for timeouts and connection-level failures.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::ConnectionFailed(_) => true,
            Self::Http(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            Self::InvalidAddress(_) => false,
        }
    }
}

/// Errors related to decoding service responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
