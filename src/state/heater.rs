// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heaters.

use std::collections::{BTreeMap, HashSet};

use crate::telemetry::DeviceRecord;
use crate::types::{DeviceId, Preset, ZoneNumber, device_units_to_celsius};

use super::Room;

/// Setpoints as reported by the service, in device units.
///
/// Preset commands send these back unchanged, so a setpoint that is not a
/// whole degree survives a preset switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetpointUnits {
    /// Comfort setpoint.
    pub comfort: Option<i64>,
    /// Frost-guard setpoint.
    pub frost_guard: Option<i64>,
    /// Eco setpoint.
    pub eco: Option<i64>,
    /// Boost setpoint.
    pub boost: Option<i64>,
    /// Manual setpoint.
    pub manual: Option<i64>,
}

/// A heater with decoded temperatures and derived flags.
///
/// All setpoints and temperatures are in Celsius, rounded to whole degrees.
/// The undecoded setpoints are kept in [`setpoint_units`](Self::setpoint_units).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heater {
    /// Device id; the registry key.
    pub device_id: DeviceId,
    /// Service record id.
    pub record_id: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Room of the heater, set only if it was known when the heater was merged.
    pub room: Option<ZoneNumber>,
    /// Zone number reported by the service.
    pub zone_number: Option<ZoneNumber>,

    /// Measured room temperature.
    pub current_temp: Option<i64>,
    /// Comfort setpoint.
    pub comfort_setpoint: Option<i64>,
    /// Frost-guard setpoint.
    pub frost_guard_setpoint: Option<i64>,
    /// Eco setpoint.
    pub eco_setpoint: Option<i64>,
    /// Boost setpoint.
    pub boost_setpoint: Option<i64>,
    /// Manual setpoint; `0` when switched off.
    pub manual_setpoint: Option<i64>,
    /// Lowest accepted setpoint.
    pub min_setpoint: Option<i64>,
    /// Highest accepted setpoint.
    pub max_setpoint: Option<i64>,
    /// Setpoints in device units.
    pub setpoint_units: SetpointUnits,

    /// Start time of the running boost.
    pub boost_start: Option<String>,
    /// Boost duration in seconds.
    pub boost_duration: Option<i64>,
    /// Mode code echoed by the device.
    pub nv_mode: Option<i64>,
    /// Mode code selected by the user; see [`Preset::from_mode_code`].
    pub gv_mode: Option<i64>,

    /// Air sensor temperature.
    pub air_temp: Option<i64>,
    /// Floor sensor temperature.
    pub ground_temp: Option<i64>,

    /// `0` when off, `1` otherwise. See [`derive_power_status`].
    pub power_status: u8,
    /// `0` when the fan is stopped, `1` otherwise.
    pub fan_status: u8,
    /// `false` while the device shows up in the error report.
    pub available: bool,

    /// Raw on/off flag.
    pub on_off: Option<i64>,
    /// Indicator light brightness, in percent.
    pub light_percent: Option<i64>,
    /// Communication status with the gateway.
    pub status_com: Option<i64>,
    /// `1` while heating.
    pub heating_up: Option<i64>,
    /// Heating or cooling mode.
    pub heat_cool: Option<i64>,
    /// Rated power in watts.
    pub power_rating: Option<i64>,
    /// Raw fan speed.
    pub fan_speed: Option<i64>,

    /// Home the heater belongs to; required to send commands.
    pub smarthome_id: Option<String>,
    /// Product bundle id.
    pub bundle_id: Option<String>,
    /// Last update reported by the service.
    pub updated_at: Option<String>,
}

impl Heater {
    /// Builds a heater from a telemetry record.
    ///
    /// The room is linked only if `rooms` holds the record's zone number.
    /// Returns `None` for records without `id_device`.
    #[must_use]
    pub fn from_record(
        record: &DeviceRecord,
        rooms: &BTreeMap<ZoneNumber, Room>,
        errors: &HashSet<DeviceId>,
    ) -> Option<Self> {
        let device_id = DeviceId::new(record.id_device.clone()?);
        let zone_number = record.num_zone.map(ZoneNumber::new);
        let room = zone_number.filter(|zone| rooms.contains_key(zone));
        let celsius = |units: Option<i64>| units.map(device_units_to_celsius);

        Some(Self {
            available: !errors.contains(&device_id),
            device_id,
            record_id: record.id.clone(),
            display_name: record.nom_appareil.clone(),
            room,
            zone_number,
            current_temp: celsius(record.current_temp),
            comfort_setpoint: celsius(record.consigne_confort),
            frost_guard_setpoint: celsius(record.consigne_hg),
            eco_setpoint: celsius(record.consigne_eco),
            boost_setpoint: celsius(record.consigne_boost),
            manual_setpoint: celsius(record.consigne_manuel),
            min_setpoint: celsius(record.min_set_point),
            max_setpoint: celsius(record.max_set_point),
            setpoint_units: SetpointUnits {
                comfort: record.consigne_confort,
                frost_guard: record.consigne_hg,
                eco: record.consigne_eco,
                boost: record.consigne_boost,
                manual: record.consigne_manuel,
            },
            boost_start: record.date_start_boost.clone(),
            boost_duration: record.time_boost,
            nv_mode: record.nv_mode,
            gv_mode: record.gv_mode,
            air_temp: celsius(record.temperature_air),
            ground_temp: celsius(record.temperature_sol),
            power_status: derive_power_status(
                record.consigne_manuel,
                record.nv_mode,
                record.gv_mode,
            ),
            fan_status: derive_fan_status(record.fan_speed),
            on_off: record.on_off,
            light_percent: record.pourcent_light,
            status_com: record.status_com,
            heating_up: record.heating_up,
            heat_cool: record.heat_cool,
            power_rating: record.puissance_app,
            fan_speed: record.fan_speed,
            smarthome_id: record.smarthome_id.clone(),
            bundle_id: record.bundle_id.clone(),
            updated_at: record.date_update.clone(),
        })
    }

    /// Returns `true` unless the heater reads as switched off.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power_status == 1
    }

    /// Returns the preset matching the current `gv_mode`.
    #[must_use]
    pub fn preset(&self) -> Option<Preset> {
        self.gv_mode.and_then(Preset::from_mode_code)
    }
}

/// Derives the power flag: `0` iff the manual setpoint is `0`, `nv_mode` is
/// `0` and `gv_mode` is `1`; `1` otherwise.
#[must_use]
pub fn derive_power_status(manual: Option<i64>, nv_mode: Option<i64>, gv_mode: Option<i64>) -> u8 {
    u8::from(!(manual == Some(0) && nv_mode == Some(0) && gv_mode == Some(1)))
}

/// Derives the fan flag: `0` iff the reported fan speed is `0`.
#[must_use]
pub fn derive_fan_status(fan_speed: Option<i64>) -> u8 {
    u8::from(fan_speed != Some(0))
}
