// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed home model and the registry that reconciles telemetry into it.
//!
//! A [`Registry`] belongs to one client. Each device refresh replaces the
//! reported [`Heater`] entries wholesale, with temperatures decoded to
//! Celsius and the power, fan and availability flags derived.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashSet;
//! use lvi_lib::PrunePolicy;
//! use lvi_lib::state::Registry;
//! use lvi_lib::telemetry::DeviceRecord;
//! use lvi_lib::types::DeviceId;
//!
//! let record: DeviceRecord = serde_json::from_str(
//!     r#"{"id_device":"7","consigne_confort":"716","fan_speed":"0"}"#,
//! ).unwrap();
//!
//! let mut registry = Registry::new();
//! registry.merge_devices(&[record], &HashSet::new(), PrunePolicy::Retain);
//!
//! let heater = registry.heater(&DeviceId::new("7")).unwrap();
//! assert_eq!(heater.comfort_setpoint, Some(22));
//! assert_eq!(heater.fan_status, 0);
//! assert!(heater.available);
//! ```

mod heater;
mod registry;
mod room;

pub use heater::{Heater, SetpointUnits, derive_fan_status, derive_power_status};
pub use registry::Registry;
pub use room::Room;
