// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `LVI` Lib - A Rust client for LVI cloud-connected electric heaters.
//!
//! This library logs into the LVI cloud service, reads the account's home,
//! rooms and heaters, and sends heater commands.
//!
//! # Supported Features
//!
//! - **Session**: login, token expiry tracking, transparent re-login
//! - **Topology**: homes, rooms (zones), device error report
//! - **Heater state**: temperatures in °C, presets, power and fan status
//! - **Control**: setpoint, preset and power commands
//!
//! Two backend variants are supported, selected with [`Variant`]: the form
//! API (token sent in the body) and the signed API (token signed into
//! request headers).
//!
//! # Quick Start
//!
//! ```no_run
//! use lvi_lib::{Client, Preset};
//!
//! #[tokio::main]
//! async fn main() -> lvi_lib::Result<()> {
//!     let mut client = Client::builder("me@example.com", "secret")
//!         .build()
//!         .await?;
//!
//!     client.refresh_all().await?;
//!
//!     let ids: Vec<_> = client.heaters().map(|h| h.device_id.clone()).collect();
//!     for id in &ids {
//!         client.set_temperature(id, 20.5).await?;
//!         client.set_preset(id, Preset::Comfort).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Temperatures
//!
//! Heaters report temperatures in device units. The codec is exposed for
//! callers that read raw records:
//!
//! ```
//! use lvi_lib::{celsius_to_device_units, device_units_to_celsius};
//!
//! assert_eq!(celsius_to_device_units(20.0), 680);
//! assert_eq!(device_units_to_celsius(680), 20);
//! ```

pub mod blocking;
mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod protocol;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod throttle;
pub mod types;

pub use client::{Client, ClientBuilder};
pub use command::{HeaterCommand, Setpoint};
pub use config::{ClientConfig, Endpoints, PrunePolicy, Variant};
pub use error::{Error, ParseError, ProtocolError, Result};
pub use session::{Credentials, Session};
pub use state::{Heater, Registry, Room};
pub use telemetry::Home;
pub use types::{DeviceId, Preset, ZoneNumber, celsius_to_device_units, device_units_to_celsius};
