// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion between the service's fixed-point temperature units and Celsius.
//!
//! The service encodes setpoints and sensor readings as
//! `410 + (celsius - 5) * 18`. Values below 410 are passed through
//! unchanged when decoding, so a value that is already in Celsius (or is
//! malformed) is never decoded twice. The two functions are therefore not
//! exact inverses.
//!
//! Rounding is half-to-even on both sides.
//!
//! # Examples
//!
//! ```
//! use lvi_lib::types::{celsius_to_device_units, device_units_to_celsius};
//!
//! assert_eq!(celsius_to_device_units(5.0), 410);
//! assert_eq!(celsius_to_device_units(25.0), 770);
//! assert_eq!(device_units_to_celsius(770), 25);
//! assert_eq!(device_units_to_celsius(100), 100);
//! ```

/// Device units corresponding to 5 °C, the lower bound of the encoding.
pub const UNITS_AT_FIVE_CELSIUS: i64 = 410;

/// Device units per degree Celsius.
pub const UNITS_PER_DEGREE: i64 = 18;

/// Encodes a Celsius temperature into device units.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn celsius_to_device_units(celsius: f64) -> i64 {
    let units = UNITS_AT_FIVE_CELSIUS as f64 + (celsius - 5.0) * UNITS_PER_DEGREE as f64;
    units.round_ties_even() as i64
}

/// Decodes device units into Celsius.
///
/// Values below [`UNITS_AT_FIVE_CELSIUS`] are returned unchanged.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn device_units_to_celsius(units: i64) -> i64 {
    if units < UNITS_AT_FIVE_CELSIUS {
        return units;
    }
    let celsius = (units - UNITS_AT_FIVE_CELSIUS) as f64 / UNITS_PER_DEGREE as f64 + 5.0;
    celsius.round_ties_even() as i64
}
