// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for the LVI cloud service.
//!
//! A [`Client`] owns one session, one registry of rooms and heaters, and
//! the refresh throttles. Methods take `&mut self`: calls into one client
//! are sequential and nothing inside is locked.
//!
//! ```no_run
//! use lvi_lib::{Client, Preset};
//!
//! # async fn example() -> lvi_lib::Result<()> {
//! let mut client = Client::builder("me@example.com", "secret").build().await?;
//!
//! client.refresh_all().await?;
//! let ids: Vec<_> = client.heaters().map(|h| h.device_id.clone()).collect();
//! for id in &ids {
//!     client.set_preset(id, Preset::Eco).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod control;
mod refresh;
mod topology;

pub use builder::ClientBuilder;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::executor::RequestExecutor;
use crate::session::{Credentials, Session};
use crate::state::{Heater, Registry, Room};
use crate::telemetry::Home;
use crate::throttle::Throttle;
use crate::types::{DeviceId, ZoneNumber};

/// Client for one LVI account.
#[derive(Debug)]
pub struct Client {
    executor: RequestExecutor,
    registry: Registry,
    home: Option<Home>,
    refresh_all_gate: Throttle,
    refresh_devices_gate: Throttle,
}

impl Client {
    /// Returns a builder for an account.
    #[must_use]
    pub fn builder(username: impl Into<String>, password: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(Credentials::new(username, password))
    }

    /// Creates an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let throttle = config.throttle_interval();
        let executor = RequestExecutor::new(config, credentials)?;
        Ok(Self {
            executor,
            registry: Registry::new(),
            home: None,
            refresh_all_gate: Throttle::new(throttle),
            refresh_devices_gate: Throttle::new(throttle),
        })
    }

    /// Logs in.
    ///
    /// A failed login leaves the previous session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`](crate::Error::Authentication) if the
    /// service rejects the credentials or answers malformed, or the last
    /// transport error once the login budget is spent.
    pub async fn authenticate(&mut self) -> Result<()> {
        self.executor.authenticate().await
    }

    /// Ends the session. Later requests fail with
    /// [`Error::NoSession`](crate::Error::NoSession) until the next login.
    pub fn close(&mut self) {
        self.executor.invalidate();
        self.refresh_all_gate.reset();
        self.refresh_devices_gate.reset();
        tracing::debug!("Session closed");
    }

    /// Returns `true` if a non-expired token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.executor.session().is_token_valid()
    }

    /// Returns the session.
    #[must_use]
    pub fn session(&self) -> &Session {
        self.executor.session()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.executor.config()
    }

    /// Returns the home rooms and devices are read from, once known.
    #[must_use]
    pub fn home(&self) -> Option<&Home> {
        self.home.as_ref()
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns a known heater.
    #[must_use]
    pub fn get_device(&self, id: &DeviceId) -> Option<&Heater> {
        self.registry.heater(id)
    }

    /// Returns all known heaters.
    pub fn heaters(&self) -> impl Iterator<Item = &Heater> {
        self.registry.heaters()
    }

    /// Returns all known rooms.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.registry.rooms()
    }

    /// Returns a known room.
    #[must_use]
    pub fn get_room(&self, zone: ZoneNumber) -> Option<&Room> {
        self.registry.room(zone)
    }
}
