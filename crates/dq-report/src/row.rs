//! Plain data row types written by report backends.

/// One per-route departure recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRow {
    pub contractor:             String,
    pub parking:                String,
    pub current_departure:      String,
    pub optimal_departure:      String,
    /// Fleet-wide truck-weighted wait, in minutes, at the current departure.
    pub current_wait_minutes:   f64,
    /// The same objective with only this route moved to its optimal slot.
    pub optimized_wait_minutes: f64,
}

/// Average queueing delay for one macro zone, before and after moving every
/// route to its recommended departure.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneWaitRow {
    pub zone:                   String,
    /// Trucks counted into the zone average.
    pub trucks:                 u32,
    pub baseline_wait_minutes:  f64,
    pub optimised_wait_minutes: f64,
}

/// Queue detail for one dump sub-point.
#[derive(Debug, Clone, PartialEq)]
pub struct SubPointRow {
    pub sub_point:        String,
    pub zone:             String,
    /// Catalogue display priority of the pad.
    pub priority:         u32,
    pub servers:          u32,
    pub trucks:           usize,
    pub avg_wait_minutes: f64,
    pub max_wait_minutes: f64,
    /// Clock time at which the last truck finished dumping.
    pub end_time:         String,
}
