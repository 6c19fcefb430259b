// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heater telemetry records.

use serde::Deserialize;

use super::{lenient_i64, lenient_string};

/// A heater as reported by the home read endpoint.
///
/// Temperatures are in device units; see
/// [`device_units_to_celsius`](crate::types::device_units_to_celsius).
/// Field names follow the wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceRecord {
    /// Record id, distinct from `id_device`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Device id used to address commands.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id_device: Option<String>,
    /// Display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub nom_appareil: Option<String>,
    /// Zone the heater belongs to.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub num_zone: Option<i64>,
    /// Appliance model id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id_appareil: Option<String>,

    /// Measured room temperature.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub current_temp: Option<i64>,
    /// Comfort setpoint.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub consigne_confort: Option<i64>,
    /// Frost-guard setpoint.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub consigne_hg: Option<i64>,
    /// Eco setpoint.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub consigne_eco: Option<i64>,
    /// Boost setpoint.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub consigne_boost: Option<i64>,
    /// Manual setpoint; `0` when the heater is switched off.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub consigne_manuel: Option<i64>,
    /// Lowest setpoint the heater accepts.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub min_set_point: Option<i64>,
    /// Highest setpoint the heater accepts.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub max_set_point: Option<i64>,

    /// Start time of the running boost.
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_start_boost: Option<String>,
    /// Boost duration in seconds.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub time_boost: Option<i64>,
    /// Mode code echoed by the device.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub nv_mode: Option<i64>,
    /// Mode code selected by the user; see [`Preset`](crate::Preset).
    #[serde(default, deserialize_with = "lenient_i64")]
    pub gv_mode: Option<i64>,

    /// Air sensor temperature.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub temperature_air: Option<i64>,
    /// Floor sensor temperature.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub temperature_sol: Option<i64>,

    /// Raw on/off flag.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub on_off: Option<i64>,
    /// Indicator light brightness, in percent.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub pourcent_light: Option<i64>,
    /// Communication status with the gateway.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub status_com: Option<i64>,
    /// Global reception status.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub recep_status_global: Option<i64>,
    /// Rated power in watts.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub puissance_app: Option<i64>,
    /// `1` while the heater is heating.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub heating_up: Option<i64>,
    /// Heating or cooling mode.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub heat_cool: Option<i64>,
    /// Fan speed; `0` when the fan is stopped.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub fan_speed: Option<i64>,

    /// Home the heater belongs to.
    #[serde(default, deserialize_with = "lenient_string")]
    pub smarthome_id: Option<String>,
    /// Product bundle id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub bundle_id: Option<String>,
    /// Last update as reported by the service.
    #[serde(default, deserialize_with = "lenient_string")]
    pub date_update: Option<String>,
}
