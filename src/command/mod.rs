// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater control commands.
//!
//! A command is one push to the command endpoint carrying a mode code and
//! a set of setpoints in device units.
//!
//! | Preset | `gv_mode`/`nv_mode` | Setpoints sent |
//! |--------|---------------------|----------------|
//! | [`Preset::Comfort`] | 0 | comfort, manual |
//! | [`Preset::Program`] | 8 | manual |
//! | [`Preset::Eco`] | 3 | eco, manual |
//! | [`Preset::Boost`] | 4 | boost, manual, 7200 s duration |
//! | [`Preset::Off`] | 1 | manual forced to 0 |
//! | [`Preset::FrostGuard`] | 2 | manual, frost guard |
//!
//! The manual setpoint follows the preset's own setpoint, except for
//! `Program` which keeps the current manual setpoint.
//!
//! # Examples
//!
//! ```
//! use lvi_lib::command::HeaterCommand;
//! use lvi_lib::types::{DeviceId, Preset};
//!
//! let cmd = HeaterCommand::new("55", DeviceId::new("C01"))
//!     .with_mode(Preset::Eco.mode_code())
//!     .with_setpoint(lvi_lib::command::Setpoint::Eco, 554);
//!
//! let payload = cmd.to_payload();
//! assert_eq!(payload.get("query[gv_mode]"), Some("3"));
//! assert_eq!(payload.get("query[consigne_eco]"), Some("554"));
//! ```

use crate::error::{Error, Result};
use crate::protocol::Payload;
use crate::state::Heater;
use crate::types::{DeviceId, Preset, celsius_to_device_units};

/// Boost duration sent with [`Preset::Boost`], in seconds.
pub const BOOST_DURATION_SECS: u32 = 7200;

/// Value of the `context` field of every command.
pub const COMMAND_CONTEXT: u32 = 1;

/// Validity of a queued command on the gateway, in milliseconds.
pub const COMMAND_PEREMPTION_MS: u32 = 15_000;

/// A setpoint field of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setpoint {
    /// `consigne_confort`
    Comfort,
    /// `consigne_hg`
    FrostGuard,
    /// `consigne_eco`
    Eco,
    /// `consigne_boost`
    Boost,
    /// `consigne_manuel`
    Manual,
}

impl Setpoint {
    /// Returns the form field name.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Comfort => "query[consigne_confort]",
            Self::FrostGuard => "query[consigne_hg]",
            Self::Eco => "query[consigne_eco]",
            Self::Boost => "query[consigne_boost]",
            Self::Manual => "query[consigne_manuel]",
        }
    }

    /// Returns the heater's current value of this setpoint, in device units.
    #[must_use]
    pub fn current(&self, heater: &Heater) -> Option<i64> {
        let units = &heater.setpoint_units;
        match self {
            Self::Comfort => units.comfort,
            Self::FrostGuard => units.frost_guard,
            Self::Eco => units.eco,
            Self::Boost => units.boost,
            Self::Manual => units.manual,
        }
    }
}

/// One control push for one heater.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaterCommand {
    smarthome_id: String,
    device_id: DeviceId,
    mode: Option<i64>,
    setpoints: Vec<(Setpoint, i64)>,
    boost_duration: Option<u32>,
}

impl HeaterCommand {
    /// Creates an empty command for a device of a home.
    #[must_use]
    pub fn new(smarthome_id: impl Into<String>, device_id: DeviceId) -> Self {
        Self {
            smarthome_id: smarthome_id.into(),
            device_id,
            mode: None,
            setpoints: Vec::new(),
            boost_duration: None,
        }
    }

    /// Sets the mode code sent as both `gv_mode` and `nv_mode`.
    #[must_use]
    pub fn with_mode(mut self, mode: i64) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Adds a setpoint in device units.
    #[must_use]
    pub fn with_setpoint(mut self, setpoint: Setpoint, units: i64) -> Self {
        self.setpoints.push((setpoint, units));
        self
    }

    /// Sets the boost duration.
    #[must_use]
    pub fn with_boost_duration(mut self, secs: u32) -> Self {
        self.boost_duration = Some(secs);
        self
    }

    /// Command writing comfort and manual setpoints to `celsius`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentState`] if the heater has no home id.
    pub fn temperature(heater: &Heater, celsius: f64) -> Result<Self> {
        let units = celsius_to_device_units(celsius);
        Ok(Self::for_heater(heater)?
            .with_setpoint(Setpoint::Comfort, units)
            .with_setpoint(Setpoint::Manual, units))
    }

    /// Command switching a heater to `preset`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentState`] if the heater has no home id or
    /// lacks a setpoint the preset needs.
    pub fn preset(heater: &Heater, preset: Preset) -> Result<Self> {
        let cmd = Self::for_heater(heater)?.with_mode(preset.mode_code());

        let cmd = match preset {
            Preset::Comfort => cmd.follow(heater, Setpoint::Comfort)?,
            Preset::Eco => cmd.follow(heater, Setpoint::Eco)?,
            Preset::Boost => cmd
                .follow(heater, Setpoint::Boost)?
                .with_boost_duration(BOOST_DURATION_SECS),
            Preset::FrostGuard => cmd.follow(heater, Setpoint::FrostGuard)?,
            Preset::Program => {
                let manual = required(heater, Setpoint::Manual)?;
                cmd.with_setpoint(Setpoint::Manual, manual)
            }
            Preset::Off => cmd.with_setpoint(Setpoint::Manual, 0),
        };
        Ok(cmd)
    }

    /// Command switching a heater on (mode 0, setpoints untouched) or off
    /// (mode 1, manual setpoint 0).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InconsistentState`] if the heater has no home id.
    pub fn power(heater: &Heater, on: bool) -> Result<Self> {
        let cmd = Self::for_heater(heater)?;
        Ok(if on {
            cmd.with_mode(Preset::Comfort.mode_code())
        } else {
            cmd.with_mode(Preset::Off.mode_code())
                .with_setpoint(Setpoint::Manual, 0)
        })
    }

    /// Returns the target device.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    /// Returns the mode code, if the command changes it.
    #[must_use]
    pub fn mode(&self) -> Option<i64> {
        self.mode
    }

    /// Serializes the command into form fields.
    #[must_use]
    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new()
            .field("smarthome_id", &self.smarthome_id)
            .field("query[id_device]", &self.device_id);
        if let Some(mode) = self.mode {
            payload.push("query[gv_mode]", mode);
            payload.push("query[nv_mode]", mode);
        }
        for (setpoint, units) in &self.setpoints {
            payload.push(setpoint.field(), units);
        }
        if let Some(secs) = self.boost_duration {
            payload.push("query[time_boost]", secs);
        }
        payload
            .field("context", COMMAND_CONTEXT)
            .field("peremption", COMMAND_PEREMPTION_MS)
    }

    fn for_heater(heater: &Heater) -> Result<Self> {
        let smarthome_id = heater
            .smarthome_id
            .clone()
            .ok_or_else(|| Error::InconsistentState {
                device_id: heater.device_id.clone(),
                reason: "no smarthome id".to_string(),
            })?;
        Ok(Self::new(smarthome_id, heater.device_id.clone()))
    }

    /// Sends `setpoint` and the manual setpoint, both at the heater's
    /// current value of `setpoint`.
    fn follow(self, heater: &Heater, setpoint: Setpoint) -> Result<Self> {
        let units = required(heater, setpoint)?;
        Ok(self
            .with_setpoint(setpoint, units)
            .with_setpoint(Setpoint::Manual, units))
    }
}

fn required(heater: &Heater, setpoint: Setpoint) -> Result<i64> {
    setpoint
        .current(heater)
        .ok_or_else(|| Error::InconsistentState {
            device_id: heater.device_id.clone(),
            reason: format!("{} unknown", setpoint.field()),
        })
}
