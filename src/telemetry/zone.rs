// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone (room) records.

use serde::Deserialize;

use super::{lenient_i64, lenient_string};

/// A zone as reported by the home read endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ZoneRecord {
    /// Record id.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Zone id; some deployments send it next to or instead of `id`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub zone_id: Option<String>,
    /// User label of the zone.
    #[serde(default, deserialize_with = "lenient_string")]
    pub zone_label: Option<String>,
    /// Zone number, referenced by devices.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub num_zone: Option<i64>,
    /// Label of the zone type.
    #[serde(default, deserialize_with = "lenient_string")]
    pub label_zone_type: Option<String>,
    /// Icon id of the zone type.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub picto_zone_type: Option<i64>,
    /// Picture id chosen for the zone.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub zone_img_id: Option<i64>,
    /// Display position in the app.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub address_position: Option<i64>,
}

impl ZoneRecord {
    /// Returns `zone_id`, falling back to `id`.
    #[must_use]
    pub fn effective_id(&self) -> Option<&str> {
        self.zone_id.as_deref().or(self.id.as_deref())
    }
}
