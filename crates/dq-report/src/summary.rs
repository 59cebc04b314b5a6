//! Assembles report rows from pipeline and optimiser outcomes.

use dq_core::{SiteRegistry, Zone, format_clock};
use dq_opt::OptimisationOutcome;
use dq_sim::SimOutcome;

use crate::row::{RecommendationRow, SubPointRow, ZoneWaitRow};

/// One row per recommendation, in the optimiser's route order.
pub fn recommendation_rows(outcome: &OptimisationOutcome) -> Vec<RecommendationRow> {
    outcome
        .recommendations
        .iter()
        .map(|rec| RecommendationRow {
            contractor:             rec.contractor.clone(),
            parking:                rec.parking.clone(),
            current_departure:      rec.current_departure.clone(),
            optimal_departure:      rec.optimal_departure.clone(),
            current_wait_minutes:   rec.current_wait_minutes,
            optimized_wait_minutes: rec.optimized_wait_minutes,
        })
        .collect()
}

/// One row per macro zone, `Zone::ALL` order, pairing the baseline waits
/// with the waits after applying every recommendation.
pub fn zone_wait_rows(
    registry: &SiteRegistry,
    sim: &SimOutcome,
    outcome: &OptimisationOutcome,
) -> Vec<ZoneWaitRow> {
    Zone::ALL
        .into_iter()
        .map(|zone| ZoneWaitRow {
            zone:                   registry.zone_name(zone).to_owned(),
            trucks:                 sim.zone_trucks[zone.index()],
            baseline_wait_minutes:  outcome.baseline.get(zone),
            optimised_wait_minutes: outcome.optimised.get(zone),
        })
        .collect()
}

/// One row per arrival-bearing sub-point, ascending by id.
pub fn sub_point_rows(registry: &SiteRegistry, sim: &SimOutcome) -> Vec<SubPointRow> {
    let mut ids: Vec<_> = sim.sub_stats.keys().copied().collect();
    ids.sort();
    ids.into_iter()
        .map(|id| {
            let sub = registry.sub_point(id);
            let stats = &sim.sub_stats[&id];
            SubPointRow {
                sub_point:        sub.name.clone(),
                zone:             registry.zone_name(sub.zone).to_owned(),
                priority:         sub.priority,
                servers:          sub.servers(),
                trucks:           stats.trucks,
                avg_wait_minutes: stats.avg_wait_minutes,
                max_wait_minutes: stats.max_wait.minutes(),
                end_time:         format_clock(stats.end_time),
            }
        })
        .collect()
}
