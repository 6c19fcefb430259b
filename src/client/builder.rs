// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client builder.

use std::time::Duration;

use crate::client::Client;
use crate::config::{ClientConfig, PrunePolicy, Variant};
use crate::error::Result;
use crate::session::Credentials;

/// Builder for a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use lvi_lib::{Client, Variant};
/// use std::time::Duration;
///
/// # async fn example() -> lvi_lib::Result<()> {
/// // Logs in before returning
/// let client = Client::builder("me@example.com", "secret")
///     .timeout(Duration::from_secs(5))
///     .build()
///     .await?;
///
/// // No network access
/// let offline = Client::builder("me@example.com", "secret")
///     .variant(Variant::Signed)
///     .build_without_auth()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    credentials: Credentials,
    config: ClientConfig,
}

impl ClientBuilder {
    pub(crate) fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            config: ClientConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the service base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Sets the backend variant.
    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.config = self.config.with_variant(variant);
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Sets the stale-entry policy.
    #[must_use]
    pub fn prune_policy(mut self, prune: PrunePolicy) -> Self {
        self.config = self.config.with_prune_policy(prune);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn current_config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the client and logs in.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created or the login fails.
    pub async fn build(self) -> Result<Client> {
        let mut client = self.build_without_auth()?;
        client.authenticate().await?;
        Ok(client)
    }

    /// Builds the client without logging in.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build_without_auth(self) -> Result<Client> {
        Client::new(self.credentials, self.config)
    }
}
