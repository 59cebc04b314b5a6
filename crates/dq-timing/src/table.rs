//! The in-memory route timing table and the speed-rescaling resolver.
//!
//! # Distance rescaling
//!
//! The table's travel columns were recorded at a fixed reference speed of
//! 25 km/h. A stored time is therefore an encoded distance:
//!
//!   distance_km = stored_hours × 25
//!   travel_hours = distance_km / user_speed
//!
//! so changing the user-selected speed scales a leg by distance, not by the
//! originally recorded duration. Components with no stored value fall back
//! to the documented defaults below, with travel legs defaulting to a 40 km
//! generic distance over the same speed.

use rustc_hash::FxHashMap;
use tracing::trace;

use dq_core::{Hours, SimParams};

// ── Constants ────────────────────────────────────────────────────────────────

/// Speed at which the table's travel columns were recorded (km/h).
pub const REFERENCE_SPEED_KMH: f64 = 25.0;

/// Fallbacks for components missing from the table (hours / km).
pub const DEFAULT_WAIT_FOR_LOADING: f64 = 0.10;
pub const DEFAULT_SPOT_AT_LOADING: f64 = 0.02;
pub const DEFAULT_LOADING: f64 = 0.25;
pub const DEFAULT_LEG_DISTANCE_KM: f64 = 40.0;
pub const DEFAULT_DUMPING: f64 = 0.10;
/// Historically recorded dump-queue wait, cycle breakdowns only. The live
/// pipeline computes its own wait.
pub const DEFAULT_RECORDED_DUMP_WAIT: f64 = 0.50;

// ── Row payload ──────────────────────────────────────────────────────────────

/// Per-route component times as recorded in the source table.
///
/// `None` means the cell was blank; the resolver substitutes defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TripTimes {
    pub parking_to_loading: Option<Hours>,
    pub wait_for_loading:   Option<Hours>,
    pub spot_at_loading:    Option<Hours>,
    pub loading:            Option<Hours>,
    pub loading_to_dump:    Option<Hours>,
    /// Recorded queue wait at the dump. Used by the cycle breakdown only.
    pub wait_for_dumping:   Option<Hours>,
    pub dumping:            Option<Hours>,
    pub dump_spotting:      Option<Hours>,
    /// Unloaded return leg, dump → parking. Used by the cycle breakdown only.
    pub empty_return:       Option<Hours>,
}

impl TripTimes {
    /// The all-blank row. Resolving against it yields pure defaults, which
    /// is exactly the no-match behavior.
    pub const EMPTY: TripTimes = TripTimes {
        parking_to_loading: None,
        wait_for_loading:   None,
        spot_at_loading:    None,
        loading:            None,
        loading_to_dump:    None,
        wait_for_dumping:   None,
        dumping:            None,
        dump_spotting:      None,
        empty_return:       None,
    };
}

// ── Resolved output ──────────────────────────────────────────────────────────

/// What the pipeline needs per route: time to reach the dump, time on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegTimes {
    /// Parking → loader → loaded → dump, including loader wait/spot/load.
    pub travel:  Hours,
    /// Dumping plus dump spotting.
    pub service: Hours,
}

// ── TimingTable ──────────────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
struct TripKey {
    parking: String,
    loading: String,
    dump:    String,
}

impl TripKey {
    fn new(parking: &str, loading: &str, dump: &str) -> Self {
        Self {
            parking: canon(parking),
            loading: canon(loading),
            dump:    canon(dump),
        }
    }
}

/// Read-only timing table keyed by case-insensitive (parking, loading, dump).
///
/// The source rows also carry a contractor column; it is provenance only and
/// never part of the key. Later rows for the same triple overwrite earlier
/// ones.
#[derive(Clone, Debug, Default)]
pub struct TimingTable {
    rows: FxHashMap<TripKey, TripTimes>,
}

impl TimingTable {
    /// An empty table. Every resolution then uses the default components.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn insert(&mut self, parking: &str, loading: &str, dump: &str, times: TripTimes) {
        self.rows.insert(TripKey::new(parking, loading, dump), times);
    }

    /// Exact (case-insensitive) row lookup.
    pub fn get(&self, parking: &str, loading: &str, dump: &str) -> Option<&TripTimes> {
        self.rows.get(&TripKey::new(parking, loading, dump))
    }

    /// Travel and service time for a route under the given speeds.
    ///
    /// Total function: a missing row or blank cells degrade to defaults,
    /// never to an error, and both outputs are clamped non-negative.
    pub fn resolve(&self, parking: &str, loading: &str, dump: &str, params: &SimParams) -> LegTimes {
        let row = match self.get(parking, loading, dump) {
            Some(r) => r,
            None => {
                trace!(parking, loading, dump, "no timing row, resolving from defaults");
                &TripTimes::EMPTY
            }
        };

        let travel = leg(row.parking_to_loading, params.empty_speed_kmh)
            + component(row.wait_for_loading, DEFAULT_WAIT_FOR_LOADING)
            + component(row.spot_at_loading, DEFAULT_SPOT_AT_LOADING)
            + component(row.loading, DEFAULT_LOADING)
            + leg(row.loading_to_dump, params.loaded_speed_kmh);
        let service =
            component(row.dumping, DEFAULT_DUMPING) + component(row.dump_spotting, 0.0);

        LegTimes {
            travel:  Hours(travel.max(0.0)),
            service: Hours(service.max(0.0)),
        }
    }
}

// ── Component helpers (shared with the cycle breakdown) ──────────────────────

/// A fixed component: stored value or its default, in hours.
pub(crate) fn component(stored: Option<Hours>, default: f64) -> f64 {
    stored.map_or(default, |h| h.0)
}

/// A travel leg: distance-rescaled stored time, or the generic 40 km leg.
pub(crate) fn leg(stored: Option<Hours>, speed_kmh: f64) -> f64 {
    match stored {
        Some(t) => t.0 * REFERENCE_SPEED_KMH / speed_kmh,
        None => DEFAULT_LEG_DISTANCE_KM / speed_kmh,
    }
}

/// Canonical key form: trimmed, uppercased.
fn canon(s: &str) -> String {
    s.trim().to_uppercase()
}
