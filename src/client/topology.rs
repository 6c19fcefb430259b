// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Homes, rooms and the device error report.

use std::collections::HashSet;

use serde_json::Value;

use crate::client::Client;
use crate::error::{Error, Result};
use crate::protocol::Payload;
use crate::protocol::envelope::scalar_string;
use crate::telemetry::{Home, ZoneRecord, collection, parse_records};
use crate::types::DeviceId;

impl Client {
    /// Lists the homes of the account.
    ///
    /// The first home carrying an id becomes the home rooms and devices are
    /// read from. An empty answer yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the list cannot be decoded.
    pub async fn list_homes(&mut self) -> Result<Vec<Home>> {
        let path = self.config().endpoints().homes.clone();
        let Some(body) = self.execute(&path, &Payload::new()).await? else {
            return Ok(Vec::new());
        };

        let homes: Vec<Home> = parse_records(&body, "/data/smarthomes")?;
        self.home = homes.iter().find(|h| h.smarthome_id.is_some()).cloned();
        tracing::debug!(count = homes.len(), "Listed homes");
        Ok(homes)
    }

    /// Fetches the zones of the current home into the registry.
    ///
    /// Returns the number of rooms written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoHome`] if the account has no home, or the request
    /// error.
    pub async fn refresh_rooms(&mut self) -> Result<usize> {
        let Some(body) = self.read_home().await? else {
            return Ok(0);
        };
        self.apply_rooms(&body)
    }

    /// Merges the zones of a home read body into the registry.
    pub(super) fn apply_rooms(&mut self, body: &Value) -> Result<usize> {
        let zones: Vec<ZoneRecord> = parse_records(body, "/data/zones")?;
        let prune = self.config().prune_policy();
        let written = self.registry.merge_rooms(&zones, prune);
        tracing::debug!(count = written, "Refreshed rooms");
        Ok(written)
    }

    /// Fetches the ids of the devices currently reporting errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoHome`] if the account has no home, or the request
    /// error.
    pub async fn refresh_device_errors(&mut self) -> Result<HashSet<DeviceId>> {
        let smarthome_id = self.home_id().await?;
        let path = self.config().endpoints().device_errors.clone();
        let payload = Payload::new().field("smarthome_id", smarthome_id);

        let Some(body) = self.execute(&path, &payload).await? else {
            return Ok(HashSet::new());
        };

        let errors: HashSet<DeviceId> = body
            .pointer("/data/errors")
            .map(collection)
            .unwrap_or_default()
            .into_iter()
            .filter_map(error_device_id)
            .collect();
        if !errors.is_empty() {
            tracing::warn!(count = errors.len(), "Devices reporting errors");
        }
        Ok(errors)
    }

    /// Reads zones and devices of the current home.
    pub(super) async fn read_home(&mut self) -> Result<Option<Value>> {
        let smarthome_id = self.home_id().await?;
        let path = self.config().endpoints().home.clone();
        let payload = Payload::new().field("smarthome_id", smarthome_id);
        self.execute(&path, &payload).await
    }

    /// Returns the current home id, listing homes on first use.
    async fn home_id(&mut self) -> Result<String> {
        if self.home.is_none() {
            self.list_homes().await?;
        }
        self.home
            .as_ref()
            .and_then(|h| h.smarthome_id.clone())
            .ok_or(Error::NoHome)
    }

    pub(super) async fn execute(&mut self, path: &str, payload: &Payload) -> Result<Option<Value>> {
        let attempts = self.config().request_attempts();
        self.executor.execute(path, payload, attempts).await
    }
}

/// Accepts `{"id_device": ...}` objects or bare ids.
fn error_device_id(entry: &Value) -> Option<DeviceId> {
    entry
        .get("id_device")
        .and_then(scalar_string)
        .or_else(|| scalar_string(entry))
        .map(DeviceId::new)
}
