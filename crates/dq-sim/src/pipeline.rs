//! Whole-fleet simulation and zone aggregation.

use rustc_hash::FxHashMap;

use dq_core::{SimParams, SiteRegistry, SubPointId, Zone};
use dq_fleet::FleetConfig;
use dq_timing::TimingTable;

use crate::{QueueStats, build_arrivals, simulate_queue};

// ── ZoneWaits ────────────────────────────────────────────────────────────────

/// Truck-weighted average queueing delay per zone, in minutes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZoneWaits {
    minutes: [f64; 2],
}

impl ZoneWaits {
    pub fn from_minutes(minutes: [f64; 2]) -> Self {
        Self { minutes }
    }

    pub fn get(&self, zone: Zone) -> f64 {
        self.minutes[zone.index()]
    }
}

// ── SimOutcome ───────────────────────────────────────────────────────────────

/// Everything one pipeline run produces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimOutcome {
    pub zone_waits:  ZoneWaits,
    /// Queue statistics for every sub-point that received arrivals.
    pub sub_stats:   FxHashMap<SubPointId, QueueStats>,
    /// Configured trucks per resolvable dump sub-point, event-less routes
    /// included (see `FleetConfig::trucks_per_sub_point`).
    pub sub_trucks:  FxHashMap<SubPointId, u32>,
    /// Aggregation denominators: trucks at sub-points that received
    /// arrivals, per zone. These are the weights behind `zone_waits`.
    pub zone_trucks: [u32; 2],
}

impl SimOutcome {
    /// `(sub-point, average wait × configured trucks)` for every
    /// arrival-bearing sub-point, ascending by id.
    ///
    /// The fixed order matters: the optimiser swaps single terms in and out
    /// of this sum, and bitwise-identical totals require summing the same
    /// addends in the same order every time.
    pub fn weighted_terms(&self) -> Vec<(SubPointId, f64)> {
        let mut terms: Vec<(SubPointId, f64)> = self
            .sub_stats
            .iter()
            .map(|(&id, stats)| {
                let weight = self.sub_trucks.get(&id).copied().unwrap_or(0);
                (id, stats.avg_wait_minutes * f64::from(weight))
            })
            .collect();
        terms.sort_by_key(|&(id, _)| id);
        terms
    }

    /// The optimiser's objective: total truck-weighted wait in minutes.
    /// Numerically this is `Σ zone wait × zone trucks` over both zones,
    /// computed as the sum of [`weighted_terms`](Self::weighted_terms).
    pub fn total_weighted_wait_minutes(&self) -> f64 {
        self.weighted_terms().into_iter().map(|(_, term)| term).sum()
    }
}

// ── Pipeline ─────────────────────────────────────────────────────────────────

/// Run the full deterministic pipeline: build arrivals, queue each dump
/// sub-point with its registry server count, aggregate waits per zone.
///
/// A zone none of whose sub-points received arrivals reports exactly 0.0.
pub fn simulate_fleet(
    fleet: &FleetConfig,
    registry: &SiteRegistry,
    table: &TimingTable,
    params: &SimParams,
) -> SimOutcome {
    let arrivals = build_arrivals(fleet, registry, table, params);
    let sub_trucks = fleet.trucks_per_sub_point(registry);

    let mut sub_stats =
        FxHashMap::with_capacity_and_hasher(arrivals.len(), Default::default());
    for (&id, events) in &arrivals {
        sub_stats.insert(id, simulate_queue(events, registry.servers_of(id)));
    }

    let (zone_waits, zone_trucks) = aggregate_zones(registry, &sub_stats, &sub_trucks);
    SimOutcome { zone_waits, sub_stats, sub_trucks, zone_trucks }
}

/// Truck-weighted average wait per zone, over the sub-points that received
/// arrivals, plus the per-zone weight totals.
pub(crate) fn aggregate_zones(
    registry: &SiteRegistry,
    sub_stats: &FxHashMap<SubPointId, QueueStats>,
    sub_trucks: &FxHashMap<SubPointId, u32>,
) -> (ZoneWaits, [u32; 2]) {
    let mut zone_minutes = [0.0f64; 2];
    let mut zone_trucks = [0u32; 2];
    for zone in Zone::ALL {
        let mut weighted = 0.0;
        let mut trucks = 0u32;
        for (id, _) in registry.subs_in(zone) {
            if let Some(stats) = sub_stats.get(&id) {
                let weight = sub_trucks.get(&id).copied().unwrap_or(0);
                weighted += stats.avg_wait_minutes * f64::from(weight);
                trucks += weight;
            }
        }
        zone_minutes[zone.index()] = if trucks > 0 { weighted / f64::from(trucks) } else { 0.0 };
        zone_trucks[zone.index()] = trucks;
    }
    (ZoneWaits::from_minutes(zone_minutes), zone_trucks)
}
