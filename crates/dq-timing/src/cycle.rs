//! Full round-trip cycle breakdown for one route.
//!
//! Unlike [`TimingTable::resolve`], which stops at the dump, the breakdown
//! covers the whole loop back to parking and carries the table's *recorded*
//! dump-queue wait. That recorded wait is a survey figure; the live queue
//! simulation produces its own, so the two are kept as separate fields and
//! callers pick whichever their display needs.

use dq_core::{Hours, SimParams};

use crate::table::{
    component, leg, DEFAULT_DUMPING, DEFAULT_LOADING, DEFAULT_RECORDED_DUMP_WAIT,
    DEFAULT_SPOT_AT_LOADING, DEFAULT_WAIT_FOR_LOADING, TimingTable, TripTimes,
};

/// Per-leg times for one full parking → dump → parking loop.
///
/// Travel legs are speed-responsive (distance-rescaled); the waiting,
/// spotting, loading, and dumping components are fixed table values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleBreakdown {
    pub parking_to_loading: Hours,
    pub wait_for_loading:   Hours,
    pub spot_at_loading:    Hours,
    pub loading:            Hours,
    pub loading_to_dump:    Hours,
    /// Recorded (not simulated) queue wait at the dump.
    pub recorded_dump_wait: Hours,
    pub dumping:            Hours,
    pub dump_spotting:      Hours,
    pub return_to_parking:  Hours,
}

impl CycleBreakdown {
    /// Total loop time including the recorded dump wait.
    pub fn round_trip(&self) -> Hours {
        self.parking_to_loading
            + self.wait_for_loading
            + self.spot_at_loading
            + self.loading
            + self.loading_to_dump
            + self.recorded_dump_wait
            + self.dumping
            + self.dump_spotting
            + self.return_to_parking
    }

    /// How many full loops fit in a shift of the given length.
    pub fn trips_per_shift(&self, shift: Hours) -> f64 {
        let rt = self.round_trip().0;
        if rt > 0.0 { shift.0 / rt } else { 0.0 }
    }
}

/// Break one route's cycle into legs under the given speeds.
///
/// Total function with the same fallback grid as the resolver; an unknown
/// route yields the all-default loop.
pub fn cycle_breakdown(
    table:   &TimingTable,
    parking: &str,
    loading: &str,
    dump:    &str,
    params:  &SimParams,
) -> CycleBreakdown {
    let row = table
        .get(parking, loading, dump)
        .copied()
        .unwrap_or(TripTimes::EMPTY);

    CycleBreakdown {
        parking_to_loading: Hours(leg(row.parking_to_loading, params.empty_speed_kmh)),
        wait_for_loading:   Hours(component(row.wait_for_loading, DEFAULT_WAIT_FOR_LOADING)),
        spot_at_loading:    Hours(component(row.spot_at_loading, DEFAULT_SPOT_AT_LOADING)),
        loading:            Hours(component(row.loading, DEFAULT_LOADING)),
        loading_to_dump:    Hours(leg(row.loading_to_dump, params.loaded_speed_kmh)),
        recorded_dump_wait: Hours(component(row.wait_for_dumping, DEFAULT_RECORDED_DUMP_WAIT)),
        dumping:            Hours(component(row.dumping, DEFAULT_DUMPING)),
        dump_spotting:      Hours(component(row.dump_spotting, 0.0)),
        return_to_parking:  Hours(leg(row.empty_return, params.empty_speed_kmh)),
    }
}
