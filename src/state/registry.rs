// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room and heater registry.

use std::collections::{BTreeMap, HashSet};

use crate::config::PrunePolicy;
use crate::telemetry::{DeviceRecord, ZoneRecord};
use crate::types::{DeviceId, ZoneNumber};

use super::{Heater, Room};

/// Rooms keyed by zone number and heaters keyed by device id.
///
/// Entries are overwritten in place on every merge. Under
/// [`PrunePolicy::Retain`] entries missing from a later fetch stay as they
/// were.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    rooms: BTreeMap<ZoneNumber, Room>,
    heaters: BTreeMap<DeviceId, Heater>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all rooms ordered by zone number.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Returns the room with the given zone number.
    #[must_use]
    pub fn room(&self, zone: ZoneNumber) -> Option<&Room> {
        self.rooms.get(&zone)
    }

    /// Returns all heaters ordered by device id.
    pub fn heaters(&self) -> impl Iterator<Item = &Heater> {
        self.heaters.values()
    }

    /// Returns the heater with the given id.
    #[must_use]
    pub fn heater(&self, id: &DeviceId) -> Option<&Heater> {
        self.heaters.get(id)
    }

    /// Returns the heater with the given id for in-place updates.
    pub fn heater_mut(&mut self, id: &DeviceId) -> Option<&mut Heater> {
        self.heaters.get_mut(id)
    }

    /// Returns the heaters linked to a room.
    pub fn heaters_in(&self, zone: ZoneNumber) -> impl Iterator<Item = &Heater> {
        self.heaters.values().filter(move |h| h.room == Some(zone))
    }

    /// Creates or overwrites rooms from zone records.
    ///
    /// Returns the number of rooms written.
    pub fn merge_rooms(&mut self, records: &[ZoneRecord], prune: PrunePolicy) -> usize {
        let fresh: Vec<Room> = records.iter().filter_map(Room::from_record).collect();

        if prune == PrunePolicy::Prune {
            let seen: HashSet<ZoneNumber> = fresh.iter().map(|r| r.zone_number).collect();
            self.rooms.retain(|zone, _| seen.contains(zone));
        }

        let count = fresh.len();
        for room in fresh {
            self.rooms.insert(room.zone_number, room);
        }
        tracing::debug!(count, total = self.rooms.len(), "Merged rooms");
        count
    }

    /// Creates or replaces heaters from device records.
    ///
    /// Each heater is rebuilt from its record alone; nothing carries over
    /// from the previous entry. `errors` lists the devices currently
    /// reporting errors.
    ///
    /// Returns the number of heaters written.
    pub fn merge_devices(
        &mut self,
        records: &[DeviceRecord],
        errors: &HashSet<DeviceId>,
        prune: PrunePolicy,
    ) -> usize {
        let fresh: Vec<Heater> = records
            .iter()
            .filter_map(|record| {
                let heater = Heater::from_record(record, &self.rooms, errors);
                if heater.is_none() {
                    tracing::warn!("Skipping device record without id_device");
                }
                heater
            })
            .collect();

        if prune == PrunePolicy::Prune {
            let seen: HashSet<&DeviceId> = fresh.iter().map(|h| &h.device_id).collect();
            self.heaters.retain(|id, _| seen.contains(id));
        }

        let count = fresh.len();
        for heater in fresh {
            if heater.zone_number.is_some() && heater.room.is_none() {
                tracing::debug!(device_id = %heater.device_id, "Heater zone not in registry");
            }
            self.heaters.insert(heater.device_id.clone(), heater);
        }
        tracing::debug!(count, total = self.heaters.len(), "Merged heaters");
        count
    }

    /// Removes every room and heater.
    pub fn clear(&mut self) {
        self.rooms.clear();
        self.heaters.clear();
    }
}
