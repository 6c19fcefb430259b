// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rooms.

use crate::telemetry::ZoneRecord;
use crate::types::ZoneNumber;

/// A room (zone) of the home, keyed by its zone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Service id of the zone.
    pub zone_id: Option<String>,
    /// User label.
    pub name: Option<String>,
    /// Zone number; the registry key.
    pub zone_number: ZoneNumber,
    /// Label of the zone type (kitchen, bedroom, ...).
    pub zone_type_label: Option<String>,
    /// Icon of the zone type.
    pub zone_type_icon_id: Option<i64>,
    /// Picture chosen for the zone.
    pub image_id: Option<i64>,
    /// Position of the zone in the app.
    pub address_position: Option<i64>,
}

impl Room {
    /// Builds a room from a zone record. Records without a zone number are
    /// skipped.
    #[must_use]
    pub fn from_record(record: &ZoneRecord) -> Option<Self> {
        let zone_number = ZoneNumber::new(record.num_zone?);
        Some(Self {
            zone_id: record.effective_id().map(str::to_string),
            name: record.zone_label.clone(),
            zone_number,
            zone_type_label: record.label_zone_type.clone(),
            zone_type_icon_id: record.picto_zone_type,
            image_id: record.zone_img_id,
            address_position: record.address_position,
        })
    }
}
