//! Route plans and dump-site arrival events.
//!
//! A [`RoutePlan`] is one configured route after all per-run resolution:
//! departure parsed (with the 7:00 fallback), travel and service times
//! resolved from the timing table, dump location pinned to a `SubPointId`.
//! Routes that cannot make it to a plan are skipped here, once, with a
//! `debug!` breadcrumb; everything downstream is total.
//!
//! The plan layer exists so the optimiser can re-derive events for a single
//! sub-point under a candidate departure without re-walking the whole fleet.

use rustc_hash::FxHashMap;
use tracing::debug;

use dq_core::{DEFAULT_DEPARTURE, Hours, SimParams, SiteRegistry, SubPointId, parse_clock};
use dq_fleet::{FleetConfig, RouteKey};
use dq_timing::TimingTable;

// ── ArrivalEvent ─────────────────────────────────────────────────────────────

/// One truck reaching a dump sub-point: when it gets there and how long its
/// dump (service) takes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrivalEvent {
    pub arrival: Hours,
    pub service: Hours,
}

// ── RoutePlan ────────────────────────────────────────────────────────────────

/// A route with every lookup already done.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePlan {
    pub key:       RouteKey,
    /// Dump sub-point all of this route's trucks queue at.
    pub sub:       SubPointId,
    pub departure: Hours,
    /// Parking → loader → dump travel, loader stop included.
    pub travel:    Hours,
    /// Dump plus dump spotting, per truck.
    pub service:   Hours,
    pub trucks:    u32,
}

impl RoutePlan {
    /// Append this route's arrival events, staggered by `spacing`, taking the
    /// departure as an argument so callers can substitute a candidate time.
    pub fn push_events(&self, departure: Hours, spacing: Hours, out: &mut Vec<ArrivalEvent>) {
        out.reserve(self.trucks as usize);
        for i in 0..self.trucks {
            out.push(ArrivalEvent {
                arrival: departure + self.travel + spacing * f64::from(i),
                service: self.service,
            });
        }
    }
}

// ── Plan and event construction ──────────────────────────────────────────────

/// Resolve every simulable route in the fleet into a [`RoutePlan`].
///
/// Skipped (with a `debug!` each): routes with an empty loading or dumping
/// location, routes with zero trucks, and routes whose dump does not resolve
/// to a leaf sub-point (zone names are not valid dump targets). An
/// unparsable departure time is not a skip; it falls back to 7:00.
pub fn plan_routes(
    fleet: &FleetConfig,
    registry: &SiteRegistry,
    table: &TimingTable,
    params: &SimParams,
) -> Vec<RoutePlan> {
    let mut plans = Vec::with_capacity(fleet.len());

    for (contractor, parking, cfg) in fleet.routes() {
        if cfg.loading_location.trim().is_empty() || cfg.dumping_location.trim().is_empty() {
            debug!(contractor, parking, "skipping route with a missing location");
            continue;
        }
        if cfg.number_of_trucks == 0 {
            debug!(contractor, parking, "skipping route with zero trucks");
            continue;
        }
        let Some(sub) = registry.sub_id(&cfg.dumping_location) else {
            debug!(
                contractor,
                parking,
                dump = %cfg.dumping_location,
                "skipping route: dump does not resolve to a sub-point"
            );
            continue;
        };
        let departure = match parse_clock(&cfg.departure_time) {
            Some(t) => t,
            None => {
                debug!(
                    contractor,
                    parking,
                    departure = %cfg.departure_time,
                    "unparsable departure time, using the default"
                );
                DEFAULT_DEPARTURE
            }
        };
        let legs = table.resolve(parking, &cfg.loading_location, &cfg.dumping_location, params);

        plans.push(RoutePlan {
            key: RouteKey::new(contractor, parking),
            sub,
            departure,
            travel: legs.travel,
            service: legs.service,
            trucks: cfg.number_of_trucks,
        });
    }
    plans
}

/// Group [`RoutePlan`] events by dump sub-point, each group sorted by arrival.
pub fn arrivals_from_plans(
    plans: &[RoutePlan],
    spacing: Hours,
) -> FxHashMap<SubPointId, Vec<ArrivalEvent>> {
    let mut arrivals: FxHashMap<SubPointId, Vec<ArrivalEvent>> = FxHashMap::default();
    for plan in plans {
        plan.push_events(plan.departure, spacing, arrivals.entry(plan.sub).or_default());
    }
    for events in arrivals.values_mut() {
        events.sort_by(|a, b| a.arrival.total_cmp(&b.arrival));
    }
    arrivals
}

/// Arrival events for the whole fleet, grouped by dump sub-point.
///
/// Convenience for `arrivals_from_plans(&plan_routes(..), spacing)`.
pub fn build_arrivals(
    fleet: &FleetConfig,
    registry: &SiteRegistry,
    table: &TimingTable,
    params: &SimParams,
) -> FxHashMap<SubPointId, Vec<ArrivalEvent>> {
    arrivals_from_plans(&plan_routes(fleet, registry, table, params), params.spacing)
}
