// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the client.
//!
//! - [`DeviceId`] / [`ZoneNumber`] - registry keys
//! - [`Preset`] - named operating modes and their mode codes
//! - [`celsius_to_device_units`] / [`device_units_to_celsius`] - temperature codec

mod device_id;
mod preset;
mod temperature;

pub use device_id::{DeviceId, ZoneNumber};
pub use preset::Preset;
pub use temperature::{
    UNITS_AT_FIVE_CELSIUS, UNITS_PER_DEGREE, celsius_to_device_units, device_units_to_celsius,
};
