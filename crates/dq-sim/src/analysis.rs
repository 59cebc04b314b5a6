//! Single-sub-point deep dive.
//!
//! The pipeline reports averages; this module answers "what is happening at
//! FENI W right now": per-truck service records, server utilisation, and an
//! opt-in seeded travel variation for eyeballing how sensitive a site is to
//! arrival jitter. The core pipeline never varies anything.

use dq_core::{SimParams, SiteRegistry, SubPointId, Variation, VariationRng};
use dq_fleet::FleetConfig;
use dq_timing::TimingTable;

use crate::{ArrivalEvent, QueueStats, ServiceRecord, plan_routes, simulate_queue_trace};

/// Queue behavior of one dump sub-point in isolation.
#[derive(Clone, Debug, PartialEq)]
pub struct SubPointAnalysis {
    pub id:              SubPointId,
    pub name:            String,
    pub servers:         u32,
    pub stats:           QueueStats,
    /// Per-truck trace, in arrival order.
    pub records:         Vec<ServiceRecord>,
    /// Total service time over `servers × (end − first arrival)`, as a
    /// percentage capped at 100. Zero when nothing arrives.
    pub utilisation_pct: f64,
}

/// Simulate the routes dumping at `location` and report the site's queue
/// trace and utilisation.
///
/// `location` must name a leaf sub-point (zone names return `None`). With
/// `variation`, each truck's travel time is scaled by a factor drawn
/// uniformly from `[1 − spread, 1 + spread]`; the draw stream is keyed by
/// the sub-point id, so a fixed seed reproduces exactly and different sites
/// jitter independently. `None` keeps the result bit-for-bit equal to the
/// pipeline's.
pub fn analyse_sub_point(
    fleet: &FleetConfig,
    registry: &SiteRegistry,
    table: &TimingTable,
    params: &SimParams,
    location: &str,
    variation: Option<Variation>,
) -> Option<SubPointAnalysis> {
    let id = registry.sub_id(location)?;
    let servers = registry.servers_of(id);
    let mut rng = variation.map(|v| VariationRng::for_stream(v, u64::from(id.0)));

    let mut events = Vec::new();
    for plan in plan_routes(fleet, registry, table, params) {
        if plan.sub != id {
            continue;
        }
        for i in 0..plan.trucks {
            let factor = rng.as_mut().map_or(1.0, |rng| rng.factor());
            events.push(ArrivalEvent {
                arrival: plan.departure + plan.travel * factor + params.spacing * f64::from(i),
                service: plan.service,
            });
        }
    }
    events.sort_by(|a, b| a.arrival.total_cmp(&b.arrival));

    let (stats, records) = simulate_queue_trace(&events, servers);
    let utilisation_pct = utilisation(&events, &stats, servers);

    Some(SubPointAnalysis {
        id,
        name: registry.sub_point(id).name.clone(),
        servers,
        stats,
        records,
        utilisation_pct,
    })
}

fn utilisation(events: &[ArrivalEvent], stats: &QueueStats, servers: u32) -> f64 {
    let Some(first) = events.first() else {
        return 0.0;
    };
    let window = (stats.end_time - first.arrival).0 * f64::from(servers.max(1));
    if window <= 0.0 {
        return 0.0;
    }
    let service: f64 = events.iter().map(|e| e.service.0).sum();
    (service / window * 100.0).min(100.0)
}
