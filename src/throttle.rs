// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimum-interval gate for refresh operations.

use std::time::Duration;

use tokio::time::Instant;

/// Lets an operation through at most once per interval.
///
/// Each operation kind owns its own `Throttle`; gates never share state.
/// Uses the tokio clock, so a paused test runtime controls it.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Creates an open gate.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns the minimum interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` and stamps the current time if the last pass was at
    /// least one interval ago; returns `false` otherwise.
    pub fn try_acquire(&mut self) -> bool {
        let now = Instant::now();
        if let Some(last) = self.last {
            if now.duration_since(last) < self.interval {
                return false;
            }
        }
        self.last = Some(now);
        true
    }

    /// Forgets the last pass.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
