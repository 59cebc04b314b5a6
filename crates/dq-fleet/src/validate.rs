//! Boundary validation of fleet configs and parameters.
//!
//! Validation is advisory: the pipeline's own fallbacks (skip, default,
//! clamp) make every finding here survivable, so findings are returned and
//! logged rather than raised. Call this at the edge where a config enters
//! the system, not inside the hot path.

use std::fmt;
use std::ops::RangeInclusive;

use tracing::warn;

use dq_core::{SimParams, SiteRef, SiteRegistry, parse_clock};

use crate::{FleetConfig, RouteKey};

/// Allowed trucks per route.
pub const TRUCKS_RANGE: RangeInclusive<u32> = 1..=200;

/// Allowed travel speeds (km/h).
pub const SPEED_RANGE_KMH: RangeInclusive<f64> = 15.0..=60.0;

/// One advisory validation finding.
#[derive(Clone, Debug, PartialEq)]
pub enum Finding {
    EmptyLoadingLocation { key: RouteKey },
    EmptyDumpingLocation { key: RouteKey },
    /// The dump location resolves to nothing in the registry.
    UnknownDumpLocation { key: RouteKey, dump: String },
    /// The dump location names a whole zone; routes must dump at a leaf
    /// sub-point and this one will be skipped by the event builder.
    DumpIsZoneLevel { key: RouteKey, dump: String },
    UnparsableDeparture { key: RouteKey, departure: String },
    TruckCountOutOfRange { key: RouteKey, trucks: u32 },
    SpeedOutOfRange { name: &'static str, kmh: f64 },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::EmptyLoadingLocation { key } => {
                write!(f, "{key}: loading location is empty")
            }
            Finding::EmptyDumpingLocation { key } => {
                write!(f, "{key}: dumping location is empty")
            }
            Finding::UnknownDumpLocation { key, dump } => {
                write!(f, "{key}: dump location {dump:?} is not in the registry")
            }
            Finding::DumpIsZoneLevel { key, dump } => {
                write!(f, "{key}: dump location {dump:?} names a zone, not a sub-point")
            }
            Finding::UnparsableDeparture { key, departure } => {
                write!(f, "{key}: departure {departure:?} is not H:MM (7:00 will be used)")
            }
            Finding::TruckCountOutOfRange { key, trucks } => {
                write!(f, "{key}: {trucks} trucks outside {}..={}", TRUCKS_RANGE.start(), TRUCKS_RANGE.end())
            }
            Finding::SpeedOutOfRange { name, kmh } => {
                write!(f, "{name} speed {kmh} km/h outside {}..={}", SPEED_RANGE_KMH.start(), SPEED_RANGE_KMH.end())
            }
        }
    }
}

/// Check every route against the registry and the allowed bounds.
///
/// Each finding is also logged at `warn` level. An empty result means the
/// config will simulate with no skips or fallbacks.
pub fn validate_fleet(fleet: &FleetConfig, registry: &SiteRegistry) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (contractor, parking, cfg) in fleet.routes() {
        let key = RouteKey::new(contractor, parking);

        if cfg.loading_location.trim().is_empty() {
            findings.push(Finding::EmptyLoadingLocation { key: key.clone() });
        }
        if cfg.dumping_location.trim().is_empty() {
            findings.push(Finding::EmptyDumpingLocation { key: key.clone() });
        } else {
            match registry.resolve(&cfg.dumping_location) {
                None => findings.push(Finding::UnknownDumpLocation {
                    key:  key.clone(),
                    dump: cfg.dumping_location.clone(),
                }),
                Some(SiteRef::Zone(_)) => findings.push(Finding::DumpIsZoneLevel {
                    key:  key.clone(),
                    dump: cfg.dumping_location.clone(),
                }),
                Some(SiteRef::Sub(_)) => {}
            }
        }
        if parse_clock(&cfg.departure_time).is_none() {
            findings.push(Finding::UnparsableDeparture {
                key:       key.clone(),
                departure: cfg.departure_time.clone(),
            });
        }
        if !TRUCKS_RANGE.contains(&cfg.number_of_trucks) {
            findings.push(Finding::TruckCountOutOfRange {
                key:    key.clone(),
                trucks: cfg.number_of_trucks,
            });
        }
    }

    for finding in &findings {
        warn!(%finding, "fleet validation");
    }
    findings
}

/// Check the speed parameters against the allowed band.
pub fn validate_params(params: &SimParams) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (name, kmh) in [
        ("empty", params.empty_speed_kmh),
        ("loaded", params.loaded_speed_kmh),
    ] {
        if !SPEED_RANGE_KMH.contains(&kmh) {
            findings.push(Finding::SpeedOutOfRange { name, kmh });
        }
    }
    for finding in &findings {
        warn!(%finding, "parameter validation");
    }
    findings
}
