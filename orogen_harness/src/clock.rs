// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A hand-cranked frame clock.

use orogen_core::time::Timestamp;

/// Produces frame timestamps under test control.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptedClock {
    now_ms: f64,
}

impl ScriptedClock {
    /// A clock starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current timestamp.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.now_ms)
    }

    /// Moves the clock forward and returns the new timestamp.
    pub fn advance(&mut self, millis: f64) -> Timestamp {
        self.now_ms += millis;
        self.now()
    }
}
