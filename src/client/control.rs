// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater commands.
//!
//! Preset and power commands write the new `gv_mode` into the local heater
//! before the request is sent. A failed send does not roll it back; the
//! next device refresh restores the reported state.

use crate::client::Client;
use crate::command::HeaterCommand;
use crate::error::{Error, Result};
use crate::state::Heater;
use crate::types::{DeviceId, Preset};

impl Client {
    /// Sets comfort and manual setpoints of a heater to `celsius`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDevice`] (logged, nothing sent) if the heater
    /// is not in the registry, [`Error::InconsistentState`] if its home is
    /// unknown, or the request error.
    pub async fn set_temperature(&mut self, id: &DeviceId, celsius: f64) -> Result<()> {
        let heater = self.known(id)?;
        let command = HeaterCommand::temperature(heater, celsius)?;
        tracing::info!(device_id = %id, celsius, "Setting temperature");
        self.dispatch(&command).await
    }

    /// Switches a heater to a preset.
    ///
    /// Accepts a [`Preset`] or a preset name; unknown names select frost
    /// guard.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownDevice`] if the heater is not in the registry,
    /// [`Error::InconsistentState`] if a setpoint the preset needs is
    /// unknown, or the request error.
    pub async fn set_preset(&mut self, id: &DeviceId, preset: impl Into<Preset>) -> Result<()> {
        let preset = preset.into();
        let command = HeaterCommand::preset(self.known(id)?, preset)?;
        self.apply_mode(id, &command);
        tracing::info!(device_id = %id, preset = %preset, "Setting preset");
        self.dispatch(&command).await
    }

    /// Switches a heater on or off.
    ///
    /// Off forces the manual setpoint to 0; on only changes the mode.
    ///
    /// # Errors
    ///
    /// Same as [`set_preset`](Self::set_preset).
    pub async fn set_power(&mut self, id: &DeviceId, on: bool) -> Result<()> {
        let command = HeaterCommand::power(self.known(id)?, on)?;
        self.apply_mode(id, &command);
        tracing::info!(device_id = %id, on, "Setting power");
        self.dispatch(&command).await
    }

    fn known(&self, id: &DeviceId) -> Result<&Heater> {
        self.registry.heater(id).ok_or_else(|| {
            tracing::warn!(device_id = %id, "Command for unknown device ignored");
            Error::UnknownDevice(id.clone())
        })
    }

    fn apply_mode(&mut self, id: &DeviceId, command: &HeaterCommand) {
        if let (Some(heater), Some(mode)) = (self.registry.heater_mut(id), command.mode()) {
            heater.gv_mode = Some(mode);
        }
    }

    async fn dispatch(&mut self, command: &HeaterCommand) -> Result<()> {
        let path = self.config().endpoints().command.clone();
        self.execute(&path, &command.to_payload()).await?;
        Ok(())
    }
}
