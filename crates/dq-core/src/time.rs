//! Shift time model.
//!
//! # Design
//!
//! All pipeline arithmetic runs in fractional hours since midnight, wrapped
//! in the [`Hours`] newtype. Configuration and recommendations exchange
//! departure times as `"H:MM"` clock strings; [`parse_clock`] and
//! [`format_clock`] convert at the boundary.
//!
//! A morning haul shift fits comfortably in `f64` hours (waits are reported
//! in minutes, so sub-second precision is irrelevant), and keeping one unit
//! end to end means no conversion sites inside the hot loop.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

// ── Hours ────────────────────────────────────────────────────────────────────

/// A duration or time-of-day in fractional hours.
///
/// The inner value is `pub` for direct arithmetic at call sites that need it,
/// but most code should stay on the operator impls and accessors.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hours(pub f64);

impl Hours {
    pub const ZERO: Hours = Hours(0.0);

    /// The same span expressed in minutes.
    #[inline]
    pub fn minutes(self) -> f64 {
        self.0 * 60.0
    }

    /// Larger of the two spans. Used for the `max(0, free − arrival)` clamp.
    #[inline]
    pub fn max(self, other: Hours) -> Hours {
        if self.0 >= other.0 { self } else { other }
    }

    /// Total ordering for sorting event lists (`f64::total_cmp` semantics).
    #[inline]
    pub fn total_cmp(&self, other: &Hours) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Hours {
    type Output = Hours;
    #[inline]
    fn add(self, rhs: Hours) -> Hours {
        Hours(self.0 + rhs.0)
    }
}

impl AddAssign for Hours {
    #[inline]
    fn add_assign(&mut self, rhs: Hours) {
        self.0 += rhs.0;
    }
}

impl Sub for Hours {
    type Output = Hours;
    /// May go negative (arrival after a server frees up); callers clamp.
    #[inline]
    fn sub(self, rhs: Hours) -> Hours {
        Hours(self.0 - rhs.0)
    }
}

impl Mul<f64> for Hours {
    type Output = Hours;
    #[inline]
    fn mul(self, rhs: f64) -> Hours {
        Hours(self.0 * rhs)
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}h", self.0)
    }
}

// ── Clock strings ────────────────────────────────────────────────────────────

/// Departure used when a route's clock string fails to parse.
pub const DEFAULT_DEPARTURE: Hours = Hours(7.0);

/// Parse an `"H:MM"` clock string into hours since midnight.
///
/// Exactly two `:`-separated unsigned integer fields parse; anything else
/// returns `None`. Minutes beyond 59 and hours beyond 23 are accepted as-is
/// (shift arithmetic is plain fractional hours, not wall-clock time).
pub fn parse_clock(s: &str) -> Option<Hours> {
    let (h, m) = s.split_once(':')?;
    if m.contains(':') {
        return None;
    }
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    Some(Hours(f64::from(h) + f64::from(m) / 60.0))
}

/// Format hours since midnight back to an `"H:MM"` clock string.
///
/// Rounds to the nearest minute; negative inputs clamp to `"0:00"`.
pub fn format_clock(time: Hours) -> String {
    let total_minutes = (time.0 * 60.0).round().max(0.0) as u64;
    format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}
