// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client configuration.

use std::time::Duration;

/// Backend protocol variant.
///
/// The variant selects both the password encoding used at login and the way
/// every later request carries the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// MD5 hex digest of the password at login; `token` and `email` form
    /// fields on every request.
    #[default]
    Form,
    /// Raw password at login; SHA-1 signed headers on every request.
    Signed,
}

/// What to do with registry entries absent from the latest fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrunePolicy {
    /// Keep stale rooms and heaters.
    #[default]
    Retain,
    /// Drop rooms and heaters the service no longer reports.
    Prune,
}

/// Paths of the service endpoints, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Login.
    pub auth: String,
    /// User profile including the list of homes.
    pub homes: String,
    /// Zones and devices of one home.
    pub home: String,
    /// Per-device error report of one home.
    pub device_errors: String,
    /// Command push.
    pub command: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth: "user/auth".to_string(),
            homes: "user/read".to_string(),
            home: "smarthome/read".to_string(),
            device_errors: "smarthome/errors".to_string(),
            command: "query/push".to_string(),
        }
    }
}

/// Configuration for a [`Client`](crate::Client).
///
/// # Examples
///
/// ```
/// use lvi_lib::{ClientConfig, Variant};
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .with_variant(Variant::Signed)
///     .with_timeout(Duration::from_secs(5))
///     .with_request_attempts(2);
///
/// assert_eq!(config.variant(), Variant::Signed);
/// assert_eq!(config.request_attempts(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    variant: Variant,
    endpoints: Endpoints,
    timeout: Duration,
    request_attempts: u32,
    auth_attempts: u32,
    offline_backoff: Duration,
    throttle_interval: Duration,
    prune: PrunePolicy,
}

impl ClientConfig {
    /// Default service base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://e3.lvi.eu/api/v0.1/human";
    /// Default per-call timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default attempt budget for API requests.
    pub const DEFAULT_REQUEST_ATTEMPTS: u32 = 3;
    /// Default attempt budget for login.
    pub const DEFAULT_AUTH_ATTEMPTS: u32 = 3;
    /// Default sleep before retrying a device-offline answer.
    pub const DEFAULT_OFFLINE_BACKOFF: Duration = Duration::from_secs(2);
    /// Default minimum interval between two refreshes of the same kind.
    pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_secs(2);

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            variant: Variant::default(),
            endpoints: Endpoints::default(),
            timeout: Self::DEFAULT_TIMEOUT,
            request_attempts: Self::DEFAULT_REQUEST_ATTEMPTS,
            auth_attempts: Self::DEFAULT_AUTH_ATTEMPTS,
            offline_backoff: Self::DEFAULT_OFFLINE_BACKOFF,
            throttle_interval: Self::DEFAULT_THROTTLE_INTERVAL,
            prune: PrunePolicy::default(),
        }
    }

    /// Sets the service base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the backend variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the endpoint paths.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the attempt budget for API requests. Zero is raised to one.
    #[must_use]
    pub fn with_request_attempts(mut self, attempts: u32) -> Self {
        self.request_attempts = attempts.max(1);
        self
    }

    /// Sets the attempt budget for login. Zero is raised to one.
    #[must_use]
    pub fn with_auth_attempts(mut self, attempts: u32) -> Self {
        self.auth_attempts = attempts.max(1);
        self
    }

    /// Sets the backoff applied before retrying a device-offline answer.
    #[must_use]
    pub fn with_offline_backoff(mut self, backoff: Duration) -> Self {
        self.offline_backoff = backoff;
        self
    }

    /// Sets the minimum interval between refreshes of the same kind.
    #[must_use]
    pub fn with_throttle_interval(mut self, interval: Duration) -> Self {
        self.throttle_interval = interval;
        self
    }

    /// Sets the stale-entry policy of the registry.
    #[must_use]
    pub fn with_prune_policy(mut self, prune: PrunePolicy) -> Self {
        self.prune = prune;
        self
    }

    /// Returns the base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the backend variant.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the endpoint paths.
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns the per-call timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the request attempt budget.
    #[must_use]
    pub fn request_attempts(&self) -> u32 {
        self.request_attempts
    }

    /// Returns the login attempt budget.
    #[must_use]
    pub fn auth_attempts(&self) -> u32 {
        self.auth_attempts
    }

    /// Returns the device-offline backoff.
    #[must_use]
    pub fn offline_backoff(&self) -> Duration {
        self.offline_backoff
    }

    /// Returns the refresh throttle interval.
    #[must_use]
    pub fn throttle_interval(&self) -> Duration {
        self.throttle_interval
    }

    /// Returns the stale-entry policy.
    #[must_use]
    pub fn prune_policy(&self) -> PrunePolicy {
        self.prune
    }

    /// Builds the absolute URL of an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
