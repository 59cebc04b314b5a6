//! Per-route departure-time scan.
//!
//! Every simulable route is scanned independently against the unmodified
//! baseline: each candidate departure is evaluated as if only that route
//! moved, and the first candidate strictly below the current objective wins.
//! The scan is seeded with the current cost, so a route whose schedule no
//! candidate can beat keeps its departure even when that departure is not in
//! the candidate list. After all scans, every winning time is applied to one
//! working copy and the pipeline re-runs once for the after picture.
//!
//! Candidate evaluation does not clone the fleet: shifting one departure
//! only disturbs the queue at that route's dump sub-point, so the scan
//! re-simulates that sub-point alone and swaps its term inside the baseline
//! objective. [`evaluate_departure`] is the clone-and-rerun reference the
//! incremental path is equal to, bit for bit.

use rustc_hash::FxHashMap;
use tracing::{debug, debug_span};

use dq_core::{Hours, SimParams, SiteRegistry, SubPointId, format_clock, parse_clock};
use dq_fleet::{FleetConfig, RouteKey};
use dq_sim::{RoutePlan, SimOutcome, ZoneWaits, plan_routes, simulate_fleet, simulate_queue};
use dq_timing::TimingTable;

// ── Results ──────────────────────────────────────────────────────────────────

/// One route's scan result.
#[derive(Clone, Debug, PartialEq)]
pub struct Recommendation {
    pub contractor:             String,
    pub parking:                String,
    /// Departure as configured, verbatim.
    pub current_departure:      String,
    /// Best scanned departure. Equals `current_departure` when no candidate
    /// beat the current schedule.
    pub optimal_departure:      String,
    /// Fleet-wide objective under the current schedule, minutes.
    pub current_wait_minutes:   f64,
    /// Fleet-wide objective with only this route moved, minutes.
    pub optimized_wait_minutes: f64,
}

impl Recommendation {
    /// Whether the scan found a strictly better departure.
    pub fn is_improvement(&self) -> bool {
        self.optimized_wait_minutes < self.current_wait_minutes
    }
}

/// Scan results plus the before/after zone picture.
#[derive(Clone, Debug, PartialEq)]
pub struct OptimisationOutcome {
    /// One entry per simulable route, in contractor/parking order.
    pub recommendations:         Vec<Recommendation>,
    pub baseline:                ZoneWaits,
    /// Zone waits after applying every winning departure simultaneously.
    /// Scans are independent, so this can fall short of the per-route
    /// `optimized_wait_minutes` when two winners collide at one sub-point.
    pub optimised:               ZoneWaits,
    pub baseline_total_minutes:  f64,
    pub optimised_total_minutes: f64,
}

// ── Reference evaluator ──────────────────────────────────────────────────────

/// Fleet-wide objective with one route's departure replaced, by cloning the
/// fleet and re-running the whole pipeline.
///
/// The slow path the incremental scan is equal to; exported for ad hoc
/// what-if queries. An unknown `key` leaves the fleet unchanged, so the
/// result is the baseline objective.
pub fn evaluate_departure(
    fleet: &FleetConfig,
    registry: &SiteRegistry,
    table: &TimingTable,
    params: &SimParams,
    key: &RouteKey,
    departure: &str,
) -> f64 {
    let mut shifted = fleet.clone();
    shifted.set_departure(key, departure);
    simulate_fleet(&shifted, registry, table, params).total_weighted_wait_minutes()
}

// ── Optimiser ────────────────────────────────────────────────────────────────

/// Scan every route over `candidates` and report per-route recommendations
/// plus the zone waits after applying all of them.
///
/// Unparsable candidate strings are skipped. An empty candidate list leaves
/// every route at its current departure.
pub fn optimise(
    fleet: &FleetConfig,
    registry: &SiteRegistry,
    table: &TimingTable,
    params: &SimParams,
    candidates: &[String],
) -> OptimisationOutcome {
    let _span = debug_span!("optimise", routes = fleet.len(), candidates = candidates.len()).entered();

    let baseline = simulate_fleet(fleet, registry, table, params);
    let plans = plan_routes(fleet, registry, table, params);
    let scan = Scan::new(registry, params, &plans, &baseline);

    let parsed: Vec<(&str, Hours)> = candidates
        .iter()
        .filter_map(|label| match parse_clock(label) {
            Some(time) => Some((label.as_str(), time)),
            None => {
                debug!(candidate = %label, "skipping unparsable candidate departure");
                None
            }
        })
        .collect();

    #[cfg(feature = "parallel")]
    let winners: Vec<Option<(String, f64)>> = {
        use rayon::prelude::*;
        (0..plans.len())
            .into_par_iter()
            .map(|index| scan.best_candidate(index, &parsed))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let winners: Vec<Option<(String, f64)>> =
        (0..plans.len()).map(|index| scan.best_candidate(index, &parsed)).collect();

    let mut recommendations = Vec::with_capacity(plans.len());
    for (plan, winner) in plans.iter().zip(winners) {
        let current_departure = fleet
            .get(&plan.key.contractor, &plan.key.parking)
            .map_or_else(|| format_clock(plan.departure), |cfg| cfg.departure_time.clone());
        let (optimal_departure, optimized_wait_minutes) = match winner {
            Some((time, total)) => (time, total),
            None => (current_departure.clone(), scan.baseline_total),
        };
        debug!(
            route = %plan.key,
            current = %current_departure,
            optimal = %optimal_departure,
            objective = optimized_wait_minutes,
            "route scanned"
        );
        recommendations.push(Recommendation {
            contractor: plan.key.contractor.clone(),
            parking: plan.key.parking.clone(),
            current_departure,
            optimal_departure,
            current_wait_minutes: scan.baseline_total,
            optimized_wait_minutes,
        });
    }

    let mut adjusted = fleet.clone();
    for rec in &recommendations {
        if rec.optimal_departure != rec.current_departure {
            let key = RouteKey::new(&rec.contractor, &rec.parking);
            adjusted.set_departure(&key, &rec.optimal_departure);
        }
    }
    let after = simulate_fleet(&adjusted, registry, table, params);

    OptimisationOutcome {
        baseline_total_minutes: scan.baseline_total,
        optimised_total_minutes: after.total_weighted_wait_minutes(),
        recommendations,
        baseline: baseline.zone_waits,
        optimised: after.zone_waits,
    }
}

// ── Incremental scan ─────────────────────────────────────────────────────────

/// Shared baseline state for the per-route candidate scans.
pub(crate) struct Scan<'a> {
    registry:   &'a SiteRegistry,
    spacing:    Hours,
    plans:      &'a [RoutePlan],
    sub_trucks: &'a FxHashMap<SubPointId, u32>,
    /// Baseline objective terms, ascending by sub-point id.
    terms:      Vec<(SubPointId, f64)>,
    pub(crate) baseline_total: f64,
}

impl<'a> Scan<'a> {
    pub(crate) fn new(
        registry: &'a SiteRegistry,
        params: &SimParams,
        plans: &'a [RoutePlan],
        baseline: &'a SimOutcome,
    ) -> Self {
        let terms = baseline.weighted_terms();
        let baseline_total = terms.iter().map(|&(_, term)| term).sum();
        Self {
            registry,
            spacing: params.spacing,
            plans,
            sub_trucks: &baseline.sub_trucks,
            terms,
            baseline_total,
        }
    }

    /// First candidate strictly below the current objective, with its
    /// objective value. `None` when the current schedule is unbeaten.
    pub(crate) fn best_candidate(
        &self,
        plan_index: usize,
        candidates: &[(&str, Hours)],
    ) -> Option<(String, f64)> {
        let mut best: Option<(String, f64)> = None;
        let mut best_total = self.baseline_total;
        for &(label, departure) in candidates {
            let total = self.shifted_total(plan_index, departure);
            if total < best_total {
                best_total = total;
                best = Some((label.to_owned(), total));
            }
        }
        best
    }

    /// Objective with `plans[plan_index]` departing at `departure` instead.
    ///
    /// Only the queue at that plan's dump sub-point changes, so its events
    /// are rebuilt (in plan order, exactly as the full builder would), the
    /// sub-point is re-simulated, and its term is swapped inside the
    /// otherwise unchanged baseline sum.
    pub(crate) fn shifted_total(&self, plan_index: usize, departure: Hours) -> f64 {
        let sub = self.plans[plan_index].sub;

        let mut events = Vec::new();
        for (index, plan) in self.plans.iter().enumerate() {
            if plan.sub != sub {
                continue;
            }
            let dep = if index == plan_index { departure } else { plan.departure };
            plan.push_events(dep, self.spacing, &mut events);
        }
        events.sort_by(|a, b| a.arrival.total_cmp(&b.arrival));
        let stats = simulate_queue(&events, self.registry.servers_of(sub));

        let weight = self.sub_trucks.get(&sub).copied().unwrap_or(0);
        let shifted = stats.avg_wait_minutes * f64::from(weight);
        self.terms
            .iter()
            .map(|&(s, term)| if s == sub { shifted } else { term })
            .sum()
    }
}
