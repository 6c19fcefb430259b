// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Blocking adapter over [`crate::Client`].
//!
//! Owns a current-thread tokio runtime and drives each async call to
//! completion. Must not be used from inside another tokio runtime.
//!
//! ```no_run
//! use lvi_lib::blocking;
//!
//! # fn example() -> lvi_lib::Result<()> {
//! let mut client = blocking::Client::connect(lvi_lib::Client::builder("me@example.com", "secret"))?;
//! client.refresh_all()?;
//! for heater in client.heaters() {
//!     println!("{:?}: {:?} °C", heater.display_name, heater.current_temp);
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::future::Future;

use tokio::runtime::{Builder, Runtime};

use crate::client::ClientBuilder;
use crate::error::Result;
use crate::state::{Heater, Room};
use crate::telemetry::Home;
use crate::types::{DeviceId, Preset};

/// Synchronous wrapper around an async [`crate::Client`].
#[derive(Debug)]
pub struct Client {
    inner: crate::Client,
    runtime: Runtime,
}

impl Client {
    /// Wraps an existing async client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Runtime`](crate::Error::Runtime) if the runtime
    /// cannot be started.
    pub fn new(inner: crate::Client) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    /// Builds a client from `builder` and logs in.
    ///
    /// # Errors
    ///
    /// Returns error if the runtime cannot be started, the HTTP client
    /// cannot be created, or the login fails.
    pub fn connect(builder: ClientBuilder) -> Result<Self> {
        let mut client = Self::new(builder.build_without_auth()?)?;
        client.authenticate()?;
        Ok(client)
    }

    /// Returns the wrapped async client.
    #[must_use]
    pub fn inner(&self) -> &crate::Client {
        &self.inner
    }

    /// Unwraps the async client.
    #[must_use]
    pub fn into_inner(self) -> crate::Client {
        self.inner
    }

    fn block_on<F: Future>(runtime: &Runtime, future: F) -> F::Output {
        runtime.block_on(future)
    }

    /// See [`crate::Client::authenticate`].
    ///
    /// # Errors
    ///
    /// Same as the async method.
    pub fn authenticate(&mut self) -> Result<()> {
        Self::block_on(&self.runtime, self.inner.authenticate())
    }

    /// See [`crate::Client::close`].
    pub fn close(&mut self) {
        self.inner.close();
    }

    /// See [`crate::Client::list_homes`].
    ///
    /// # Errors
    ///
    /// Same as the async method.
    pub fn list_homes(&mut self) -> Result<Vec<Home>> {
        Self::block_on(&self.runtime, self.inner.list_homes())
    }

    /// See [`crate::Client::refresh_rooms`].
    ///
    /// # Errors
    ///
    /// Same as the async method.
    pub fn refresh_rooms(&mut self) -> Result<usize> {
        Self::block_on(&self.runtime, self.inner.refresh_rooms())
    }

    /// See [`crate::Client::refresh_device_errors`].
    ///
    /// # Errors
    ///
    /// Same as the async method.
    pub fn refresh_device_errors(&mut self) -> Result<HashSet<DeviceId>> {
        Self::block_on(&self.runtime, self.inner.refresh_device_errors())
    }

    /// See [`crate::Client::refresh_devices`].
    ///
    /// # Errors
    ///
    /// Same as the async method.
    pub fn refresh_devices(&mut self) -> Result<bool> {
        Self::block_on(&self.runtime, self.inner.refresh_devices())
    }

    /// See [`crate::Client::refresh_all`].
    ///
    /// # Errors
    ///
    /// Same as the async method.
    pub fn refresh_all(&mut self) -> Result<bool> {
        Self::block_on(&self.runtime, self.inner.refresh_all())
    }

    /// See [`crate::Client::set_temperature`].
    ///
    /// # Errors
    ///
    /// Same as the async method.
    pub fn set_temperature(&mut self, id: &DeviceId, celsius: f64) -> Result<()> {
        Self::block_on(&self.runtime, self.inner.set_temperature(id, celsius))
    }

    /// See [`crate::Client::set_preset`].
    ///
    /// # Errors
    ///
    /// Same as the async method.
    pub fn set_preset(&mut self, id: &DeviceId, preset: impl Into<Preset>) -> Result<()> {
        Self::block_on(&self.runtime, self.inner.set_preset(id, preset))
    }

    /// See [`crate::Client::set_power`].
    ///
    /// # Errors
    ///
    /// Same as the async method.
    pub fn set_power(&mut self, id: &DeviceId, on: bool) -> Result<()> {
        Self::block_on(&self.runtime, self.inner.set_power(id, on))
    }

    /// See [`crate::Client::get_device`].
    #[must_use]
    pub fn get_device(&self, id: &DeviceId) -> Option<&Heater> {
        self.inner.get_device(id)
    }

    /// See [`crate::Client::heaters`].
    pub fn heaters(&self) -> impl Iterator<Item = &Heater> {
        self.inner.heaters()
    }

    /// See [`crate::Client::rooms`].
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.inner.rooms()
    }
}
