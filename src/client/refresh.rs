// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Throttled device and topology refresh.

use std::collections::HashSet;

use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::telemetry::{DeviceRecord, parse_records};
use crate::types::DeviceId;

impl Client {
    /// Refreshes every heater of the current home.
    ///
    /// Reads the error report first, then the device list, and replaces
    /// each reported heater in the registry. Heaters missing from the list
    /// are kept unless pruning is configured.
    ///
    /// Returns `false` without touching the network if the previous device
    /// refresh started less than the throttle interval ago.
    ///
    /// # Errors
    ///
    /// Returns the first failing request's error.
    pub async fn refresh_devices(&mut self) -> Result<bool> {
        if !self.refresh_devices_gate.try_acquire() {
            tracing::debug!("Device refresh throttled");
            return Ok(false);
        }
        self.fetch_devices().await?;
        Ok(true)
    }

    /// Refreshes rooms, then heaters.
    ///
    /// Rooms and devices come from a single home read; the error report is
    /// fetched in between. Throttled independently of
    /// [`refresh_devices`](Self::refresh_devices).
    ///
    /// # Errors
    ///
    /// Returns the first failing request's error.
    pub async fn refresh_all(&mut self) -> Result<bool> {
        if !self.refresh_all_gate.try_acquire() {
            tracing::debug!("Full refresh throttled");
            return Ok(false);
        }
        let Some(body) = self.read_home().await? else {
            tracing::debug!("No home data");
            return Ok(true);
        };
        self.apply_rooms(&body)?;
        let errors = self.refresh_device_errors().await?;
        self.apply_devices(&body, &errors)?;
        Ok(true)
    }

    async fn fetch_devices(&mut self) -> Result<usize> {
        let errors = self.refresh_device_errors().await?;

        let Some(body) = self.read_home().await? else {
            tracing::debug!("No device data");
            return Ok(0);
        };
        self.apply_devices(&body, &errors)
    }

    fn apply_devices(&mut self, body: &Value, errors: &HashSet<DeviceId>) -> Result<usize> {
        let records: Vec<DeviceRecord> = parse_records(body, "/data/devices")?;
        let prune = self.config().prune_policy();
        let written = self.registry.merge_devices(&records, errors, prune);
        tracing::info!(count = written, "Refreshed heaters");
        Ok(written)
    }
}
