//! feni-shift — morning-shift walkthrough for the dump-queue toolkit.
//!
//! Runs the shipped FENI configuration (two macro zones, 34 dump sub-points,
//! eight contractor routes) through the deterministic pipeline, then stages
//! a line closure and lets the departure optimiser untangle the resulting
//! contention. Reports land in `output/feni-shift/` as three CSV files.
//!
//! `RUST_LOG=debug cargo run -p feni-shift` shows the pipeline's skip and
//! fallback decisions.

mod catalog;

use std::io::Cursor;
use std::path::Path;

use anyhow::Result;

use dq_core::{Hours, SimParams, Variation, Zone};
use dq_fleet::{RouteConfig, validate_fleet, validate_params};
use dq_opt::{half_hourly, optimise};
use dq_report::summary::{recommendation_rows, sub_point_rows, zone_wait_rows};
use dq_report::{CsvReporter, ReportWriter};
use dq_sim::{analyse_sub_point, simulate_fleet};
use dq_timing::{cycle_breakdown, load_table_reader};

use catalog::{default_fleet, feni_registry};

// ── Constants ─────────────────────────────────────────────────────────────────

const VARIATION_SEED:   u64   = 42;
const SHIFT_START_H:    u32   = 5;    // first allowed departure
const LAST_DEPARTURE_H: u32   = 9;    // last half-hourly slot
const SHIFT_LENGTH:     Hours = Hours(4.5); // 5:00 to 9:30

// ── Timing survey ─────────────────────────────────────────────────────────────

// One row per shipped route, stored at the 25 km/h reference speed. Blank
// cells were not surveyed and resolve to the component defaults.
const TIMING_CSV: &str = "\
contractor,parking,loading,dump,parking_to_loading_h,wait_for_loading_h,spot_at_loading_h,loading_h,loading_to_dump_h,wait_for_dumping_h,dumping_h,dump_spotting_h,empty_return_h\n\
RIM,TF,CP4,FENI U1 (LINE 65-66),0.30,0.10,0.02,0.25,1.20,0.45,0.08,0.03,1.35\n\
RIM,KR,CP2,FENI U2 (LINE 67-68),0.20,0.12,0.02,0.28,1.60,,0.10,0.02,1.70\n\
RIM,BLB,CP4-SOUTH,FENI A (LINE 1-2),0.35,0.08,0.02,0.25,1.40,0.30,0.10,,1.50\n\
GMG,TF,CP4,FENI W (LINE 69-70),0.30,0.10,0.02,0.25,1.20,0.40,0.08,0.03,1.30\n\
CKB,TF,CP4,FENI W (LINE 71-72),0.30,0.15,0.02,0.30,1.20,0.50,0.12,0.02,1.30\n\
CKB,KR,CP2,FENI B (LINE 5-6),0.20,,0.02,0.30,1.00,,0.10,,1.10\n\
SSS,KR,CP2-NORTH,FENI C (LINE 9-10),0.30,0.10,0.02,0.25,1.00,0.35,0.10,0.02,1.15\n\
HJS,CBB,CP2,FENI D (LINE 13-14),0.25,0.10,0.02,0.25,1.60,0.40,0.10,0.03,1.70\n\
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // 1. Logging: RUST_LOG overrides, default info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== feni-shift — morning dump-queue walkthrough ===");
    println!();

    // 2. Dump catalogue.
    let registry = feni_registry()?;
    println!(
        "Catalogue: {} sub-points ({} at {}, {} at {})",
        registry.len(),
        registry.subs_in(Zone::A).count(),
        registry.zone_name(Zone::A),
        registry.subs_in(Zone::B).count(),
        registry.zone_name(Zone::B),
    );

    // 3. Shipped fleet and parameter checks.
    let fleet = default_fleet();
    let params = SimParams::default();
    let findings = validate_fleet(&fleet, &registry).len() + validate_params(&params).len();
    println!(
        "Fleet: {} routes, {} trucks, {} validation finding(s)",
        fleet.len(),
        fleet.total_trucks(),
        findings,
    );

    // 4. Timing table from the embedded survey.
    let table = load_table_reader(Cursor::new(TIMING_CSV))?;
    println!("Timing table: {} surveyed routes", table.len());
    println!();

    // 5. Baseline run.
    let baseline = simulate_fleet(&fleet, &registry, &table, &params);
    println!("Shipped plan:");
    for zone in Zone::ALL {
        println!(
            "  {:<12} {:>3} trucks   avg wait {:>6.2} min",
            registry.zone_name(zone),
            baseline.zone_trucks[zone.index()],
            baseline.zone_waits.get(zone),
        );
    }
    println!();

    let baseline_rows = sub_point_rows(&registry, &baseline);
    println!(
        "{:<24} {:>5} {:>6} {:>10} {:>10} {:>6}",
        "Sub-point", "lines", "trucks", "avg (min)", "max (min)", "done"
    );
    println!("{}", "-".repeat(66));
    for row in &baseline_rows {
        println!(
            "{:<24} {:>5} {:>6} {:>10.2} {:>10.2} {:>6}",
            row.sub_point,
            row.servers,
            row.trucks,
            row.avg_wait_minutes,
            row.max_wait_minutes,
            row.end_time,
        );
    }
    println!();

    // 6. Round-trip economics for the longest haul.
    let cycle = cycle_breakdown(&table, "TF", "CP4", "FENI U1 (LINE 65-66)", &params);
    println!(
        "RIM/TF round trip at {:.0}/{:.0} km/h empty/loaded:",
        params.empty_speed_kmh, params.loaded_speed_kmh,
    );
    println!(
        "  to loader {:.2} h, loading {:.2} h, to dump {:.2} h, dumping {:.2} h, return {:.2} h",
        cycle.parking_to_loading.0,
        (cycle.wait_for_loading + cycle.spot_at_loading + cycle.loading).0,
        cycle.loading_to_dump.0,
        (cycle.recorded_dump_wait + cycle.dumping + cycle.dump_spotting).0,
        cycle.return_to_parking.0,
    );
    println!(
        "  round trip {:.2} h, {:.2} trips in the {:.1} h shift",
        cycle.round_trip().0,
        cycle.trips_per_shift(SHIFT_LENGTH),
        SHIFT_LENGTH.0,
    );
    println!();

    // 7. Sensitivity at the busiest site.
    if let Some(busiest) = baseline_rows
        .iter()
        .max_by(|a, b| a.avg_wait_minutes.total_cmp(&b.avg_wait_minutes))
    {
        let scheduled =
            analyse_sub_point(&fleet, &registry, &table, &params, &busiest.sub_point, None);
        let jittered = analyse_sub_point(
            &fleet,
            &registry,
            &table,
            &params,
            &busiest.sub_point,
            Some(Variation::new(VARIATION_SEED)),
        );
        if let (Some(scheduled), Some(jittered)) = (scheduled, jittered) {
            println!("Busiest site, {}:", scheduled.name);
            println!(
                "  as scheduled:        avg wait {:>6.2} min, {:>5.1} % line utilisation",
                scheduled.stats.avg_wait_minutes, scheduled.utilisation_pct,
            );
            println!(
                "  with 5 % jitter:     avg wait {:>6.2} min, {:>5.1} % line utilisation",
                jittered.stats.avg_wait_minutes, jittered.utilisation_pct,
            );
        }
    }
    println!();

    // 8. Line closure: LINE 71-72 goes down for maintenance, so CKB's
    //    tonnage moves onto GMG's pad with its 5:00 start unchanged.
    let mut closure = fleet.clone();
    closure.insert(
        "CKB",
        "TF",
        RouteConfig {
            loading_location: "CP4".to_owned(),
            dumping_location: "FENI W (LINE 69-70)".to_owned(),
            departure_time:   "5:00".to_owned(),
            number_of_trucks: 23,
        },
    );
    let disrupted = simulate_fleet(&closure, &registry, &table, &params);
    println!("Line closure: CKB/TF rerouted to FENI W (LINE 69-70).");
    println!(
        "  fleet-wide weighted wait climbs from {:.1} to {:.1} min",
        baseline.total_weighted_wait_minutes(),
        disrupted.total_weighted_wait_minutes(),
    );
    println!();

    // 9. Departure scan over the half-hourly shift window.
    let window = half_hourly(SHIFT_START_H, LAST_DEPARTURE_H);
    let outcome = optimise(&closure, &registry, &table, &params, &window);
    println!("Departure scan, {} slots from 5:00 to 9:00:", window.len());
    println!(
        "{:<10} {:>6} {:>6} {:>14} {:>14}",
        "Route", "now", "best", "wait now (min)", "wait best (min)"
    );
    println!("{}", "-".repeat(54));
    for rec in &outcome.recommendations {
        println!(
            "{:<10} {:>6} {:>6} {:>14.2} {:>14.2}",
            format!("{}/{}", rec.contractor, rec.parking),
            rec.current_departure,
            rec.optimal_departure,
            rec.current_wait_minutes,
            rec.optimized_wait_minutes,
        );
    }
    let improved = outcome
        .recommendations
        .iter()
        .filter(|rec| rec.is_improvement())
        .count();
    println!(
        "{} of {} routes can move; applying every winner leaves {:.1} min (from {:.1})",
        improved,
        outcome.recommendations.len(),
        outcome.optimised_total_minutes,
        outcome.baseline_total_minutes,
    );
    println!();

    // 10. CSV reports for the closure run.
    std::fs::create_dir_all("output/feni-shift")?;
    let mut reports = CsvReporter::new(Path::new("output/feni-shift"))?;
    reports.write_recommendations(&recommendation_rows(&outcome))?;
    reports.write_zone_waits(&zone_wait_rows(&registry, &disrupted, &outcome))?;
    reports.write_sub_points(&sub_point_rows(&registry, &disrupted))?;
    reports.finish()?;
    println!("Reports written to output/feni-shift/");

    Ok(())
}
