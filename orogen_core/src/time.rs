// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host timestamps and tick intervals.
//!
//! [`Timestamp`] is a point in time in milliseconds, as delivered by the host
//! once per frame (e.g. a display-link callback's timestamp). The origin is
//! host-defined; only differences between consecutive timestamps matter.
//!
//! [`TickInterval`] is the length of one logical tick in milliseconds. The
//! scheduler consumes whole intervals from its lag accumulator regardless of
//! how irregularly the host delivers timestamps.

use core::fmt;
use core::ops::{Add, Sub};

/// A point in time, in milliseconds since a host-defined origin.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestamp(f64);

impl Timestamp {
    /// Creates a timestamp from a millisecond value.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> f64 {
        self.0
    }

    /// Returns the interval elapsed since an earlier timestamp, or zero if
    /// `earlier` is after `self` (a non-monotonic host clock must never feed
    /// negative time into the lag accumulator).
    #[inline]
    #[must_use]
    pub fn saturating_since(self, earlier: Self) -> TickInterval {
        TickInterval((self.0 - earlier.0).max(0.0))
    }
}

impl Add<TickInterval> for Timestamp {
    type Output = Self;

    #[inline]
    fn add(self, rhs: TickInterval) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Timestamp {
    type Output = TickInterval;

    #[inline]
    fn sub(self, rhs: Self) -> TickInterval {
        TickInterval(self.0 - rhs.0)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms)", self.0)
    }
}

/// A duration in milliseconds, typically the length of one logical tick.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct TickInterval(f64);

impl TickInterval {
    /// One tick at 60 logical ticks per second.
    pub const SIXTY_HZ: Self = Self(1000.0 / 60.0);

    /// Creates an interval from a millisecond value.
    ///
    /// # Panics
    ///
    /// Panics if `millis` is not strictly positive (the scheduler divides by
    /// the interval).
    #[inline]
    #[must_use]
    pub fn from_millis(millis: f64) -> Self {
        assert!(millis > 0.0, "tick interval must be positive");
        Self(millis)
    }

    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> f64 {
        self.0
    }
}

impl Add for TickInterval {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TickInterval {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Debug for TickInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TickInterval({}ms)", self.0)
    }
}
