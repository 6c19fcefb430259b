// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Home ("smarthome") summaries.

use serde::Deserialize;

use super::{lenient_i64, lenient_string};

/// Summary of a home as listed in the user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Home {
    /// Home identifier, sent back as `smarthome_id`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub smarthome_id: Option<String>,
    /// MAC address of the home gateway.
    #[serde(default, deserialize_with = "lenient_string")]
    pub mac_address: Option<String>,
    /// User label of the home.
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: Option<String>,
    /// Mode applied to the whole home.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub general_mode: Option<i64>,
    /// Holiday mode flag.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub holiday_mode: Option<i64>,
    /// Gateway synchronisation flag.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub sync_flag: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_home() {
        let json = r#"{"smarthome_id":"9","mac_address":"AA:BB","label":"Cabin","general_mode":"0","holiday_mode":0,"sync_flag":"1"}"#;
        let home: Home = serde_json::from_str(json).unwrap();
        assert_eq!(home.smarthome_id.as_deref(), Some("9"));
        assert_eq!(home.label.as_deref(), Some("Cabin"));
        assert_eq!(home.general_mode, Some(0));
        assert_eq!(home.sync_flag, Some(1));
    }

    #[test]
    fn numeric_id_becomes_string() {
        let home: Home = serde_json::from_str(r#"{"smarthome_id":12}"#).unwrap();
        assert_eq!(home.smarthome_id.as_deref(), Some("12"));
    }
}
