//! Unit tests for the candidate window and the departure scan.
//!
//! The fixture times are all small binary fractions (travel 1.0 h, service
//! 0.25 h, spacing 0.0625 h, half- and quarter-hour departures), so every
//! queue quantity is exact in `f64` and equal objectives compare bitwise
//! equal. That keeps the strict-improvement and first-wins assertions free
//! of last-bit noise.

#[cfg(test)]
fn registry() -> dq_core::SiteRegistry {
    use dq_core::{SiteRegistry, Zone};
    SiteRegistry::builder()
        .zone_name(Zone::A, "NORTH PAD")
        .zone_name(Zone::B, "SOUTH PAD")
        .sub_point(Zone::A, "PAD A (LINE 1-2)", "1-2", 1)
        .sub_point(Zone::B, "PAD S (LINE 9-9)", "9-9", 1) // 1 server
        .build()
        .unwrap()
}

#[cfg(test)]
fn table() -> dq_timing::TimingTable {
    use dq_core::Hours;
    use dq_timing::{TimingTable, TripTimes};
    // Identical legs from both parking codes: exactly 1.0 h to the dump and
    // 0.25 h on it, at the 25 km/h reference speed.
    let times = TripTimes {
        parking_to_loading: Some(Hours(0.25)),
        wait_for_loading:   Some(Hours(0.125)),
        spot_at_loading:    Some(Hours(0.0625)),
        loading:            Some(Hours(0.25)),
        loading_to_dump:    Some(Hours(0.3125)),
        dumping:            Some(Hours(0.25)),
        ..TripTimes::EMPTY
    };
    let mut table = TimingTable::new();
    table.insert("TF", "CP4", "PAD S (LINE 9-9)", times);
    table.insert("KR", "CP4", "PAD S (LINE 9-9)", times);
    table
}

#[cfg(test)]
fn params() -> dq_core::SimParams {
    use dq_core::{Hours, SimParams};
    SimParams {
        empty_speed_kmh:  25.0,
        loaded_speed_kmh: 25.0,
        spacing:          Hours(0.0625),
    }
}

#[cfg(test)]
fn route(loading: &str, dump: &str, departure: &str, trucks: u32) -> dq_fleet::RouteConfig {
    dq_fleet::RouteConfig {
        loading_location: loading.to_owned(),
        dumping_location: dump.to_owned(),
        departure_time:   departure.to_owned(),
        number_of_trucks: trucks,
    }
}

/// Three ALFA trucks and one ZULU truck all reach the single-server PAD S
/// from 8.0 on; the ZULU truck queues inside the ALFA cohort.
#[cfg(test)]
fn contended_fleet() -> dq_fleet::FleetConfig {
    let mut fleet = dq_fleet::FleetConfig::new();
    fleet.insert("ALFA", "TF", route("CP4", "PAD S (LINE 9-9)", "7:00", 3));
    fleet.insert("ZULU", "KR", route("CP4", "PAD S (LINE 9-9)", "7:00", 1));
    fleet
}

#[cfg(test)]
mod window {
    use crate::half_hourly;

    #[test]
    fn canonical_morning_window() {
        let window = half_hourly(5, 9);
        assert_eq!(window.len(), 9);
        assert_eq!(window.first().map(String::as_str), Some("5:00"));
        assert_eq!(window[1], "5:30");
        assert_eq!(window.last().map(String::as_str), Some("9:00"));
    }

    #[test]
    fn inverted_bounds_give_nothing() {
        assert!(half_hourly(9, 5).is_empty());
    }

    #[test]
    fn single_hour_window() {
        assert_eq!(half_hourly(7, 7), vec!["7:00".to_owned()]);
    }
}

#[cfg(test)]
mod scan {
    use dq_core::parse_clock;
    use dq_fleet::{FleetConfig, RouteKey};
    use dq_sim::{plan_routes, simulate_fleet};

    use crate::optimiser::Scan;
    use crate::{evaluate_departure, half_hourly, optimise};

    use super::{contended_fleet, params, registry, route, table};

    #[test]
    fn lone_route_keeps_its_departure() {
        let registry = registry();
        let table = table();
        let params = params();
        let mut fleet = FleetConfig::new();
        fleet.insert("ALFA", "TF", route("CP4", "PAD S (LINE 9-9)", "7:00", 3));

        let outcome = optimise(&fleet, &registry, &table, &params, &half_hourly(5, 9));

        // A lone cohort's internal waits do not depend on when it leaves.
        assert_eq!(outcome.recommendations.len(), 1);
        let rec = &outcome.recommendations[0];
        assert_eq!(rec.optimal_departure, "7:00");
        assert!(!rec.is_improvement());
        assert_eq!(rec.optimized_wait_minutes, rec.current_wait_minutes);
        // Waits 0 / 0.1875 / 0.375 h over three trucks.
        assert!((outcome.baseline_total_minutes - 33.75).abs() < 1e-9);
        assert_eq!(outcome.optimised_total_minutes, outcome.baseline_total_minutes);
    }

    #[test]
    fn contended_route_finds_an_earlier_slot() {
        let registry = registry();
        let table = table();
        let params = params();
        let fleet = contended_fleet();

        let outcome = optimise(&fleet, &registry, &table, &params, &half_hourly(5, 9));
        assert!((outcome.baseline_total_minutes - 78.75).abs() < 1e-9);

        // Moving either route clears the collision (objective 33.75); the
        // first of the equally good early slots wins.
        for rec in &outcome.recommendations {
            assert!(rec.is_improvement(), "{}/{} not improved", rec.contractor, rec.parking);
            assert_eq!(rec.optimal_departure, "5:00");
            assert!((rec.current_wait_minutes - 78.75).abs() < 1e-9);
            assert!((rec.optimized_wait_minutes - 33.75).abs() < 1e-9);
        }

        // Applied together both cohorts land on 5:00 and collide again; the
        // after picture reports that honestly.
        assert!((outcome.optimised_total_minutes - 78.75).abs() < 1e-9);
    }

    #[test]
    fn unbeaten_schedules_survive_even_off_grid() {
        let registry = registry();
        let table = table();
        let params = params();
        let mut fleet = FleetConfig::new();
        fleet.insert("ALFA", "TF", route("CP4", "PAD S (LINE 9-9)", "7:00", 3));
        // 6:07 is not a half-hourly candidate, and its truck is already
        // clear of ALFA's cohort: every candidate is equal or worse.
        fleet.insert("ZULU", "KR", route("CP4", "PAD S (LINE 9-9)", "6:07", 1));

        let outcome = optimise(&fleet, &registry, &table, &params, &half_hourly(5, 9));
        assert!((outcome.baseline_total_minutes - 33.75).abs() < 1e-9);

        for rec in &outcome.recommendations {
            assert!(!rec.is_improvement());
            assert_eq!(rec.optimal_departure, rec.current_departure);
        }
        let zulu = outcome
            .recommendations
            .iter()
            .find(|r| r.contractor == "ZULU")
            .unwrap();
        assert_eq!(zulu.optimal_departure, "6:07");
        assert_eq!(outcome.optimised_total_minutes, outcome.baseline_total_minutes);
    }

    #[test]
    fn incremental_scan_equals_the_reference_evaluator() {
        let registry = registry();
        let table = table();
        let params = params();
        let fleet = contended_fleet();

        let baseline = simulate_fleet(&fleet, &registry, &table, &params);
        let plans = plan_routes(&fleet, &registry, &table, &params);
        let scan = Scan::new(&registry, &params, &plans, &baseline);

        for (index, plan) in plans.iter().enumerate() {
            for label in half_hourly(5, 9) {
                let incremental = scan.shifted_total(index, parse_clock(&label).unwrap());
                let reference =
                    evaluate_departure(&fleet, &registry, &table, &params, &plan.key, &label);
                assert_eq!(incremental, reference, "{} at {label}", plan.key);
            }
            // Re-evaluating the current departure reproduces the baseline.
            assert_eq!(scan.shifted_total(index, plan.departure), scan.baseline_total);
        }
    }

    #[test]
    fn recommended_totals_match_the_reference_evaluator() {
        let registry = registry();
        let table = table();
        let params = params();
        let fleet = contended_fleet();

        let outcome = optimise(&fleet, &registry, &table, &params, &half_hourly(5, 9));
        let baseline_total =
            simulate_fleet(&fleet, &registry, &table, &params).total_weighted_wait_minutes();

        for rec in &outcome.recommendations {
            assert_eq!(rec.current_wait_minutes, baseline_total);
            let key = RouteKey::new(&rec.contractor, &rec.parking);
            let reference = evaluate_departure(
                &fleet,
                &registry,
                &table,
                &params,
                &key,
                &rec.optimal_departure,
            );
            assert_eq!(rec.optimized_wait_minutes, reference);
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let registry = registry();
        let table = table();
        let params = params();
        let fleet = contended_fleet();
        let candidates = half_hourly(5, 9);

        let first = optimise(&fleet, &registry, &table, &params, &candidates);
        let second = optimise(&fleet, &registry, &table, &params, &candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn insertion_order_does_not_change_the_outcome() {
        let registry = registry();
        let table = table();
        let params = params();
        let candidates = half_hourly(5, 9);

        // Same routes, opposite construction order. Every scan works against
        // the unmodified baseline, so nothing upstream can leak downstream.
        let mut reversed = FleetConfig::new();
        reversed.insert("ZULU", "KR", route("CP4", "PAD S (LINE 9-9)", "7:00", 1));
        reversed.insert("ALFA", "TF", route("CP4", "PAD S (LINE 9-9)", "7:00", 3));

        let forward = optimise(&contended_fleet(), &registry, &table, &params, &candidates);
        let backward = optimise(&reversed, &registry, &table, &params, &candidates);
        assert_eq!(forward, backward);
    }

    #[test]
    fn empty_candidate_list_changes_nothing() {
        let registry = registry();
        let table = table();
        let params = params();
        let fleet = contended_fleet();

        let outcome = optimise(&fleet, &registry, &table, &params, &[]);
        for rec in &outcome.recommendations {
            assert_eq!(rec.optimal_departure, rec.current_departure);
        }
        assert_eq!(outcome.optimised_total_minutes, outcome.baseline_total_minutes);
        assert_eq!(outcome.baseline, outcome.optimised);
    }

    #[test]
    fn unparsable_candidates_are_ignored() {
        let registry = registry();
        let table = table();
        let params = params();
        let fleet = contended_fleet();

        let junk = vec!["dawn".to_owned(), "5:00:00".to_owned()];
        let outcome = optimise(&fleet, &registry, &table, &params, &junk);
        for rec in &outcome.recommendations {
            assert_eq!(rec.optimal_departure, rec.current_departure);
        }
    }

    #[test]
    fn unknown_route_evaluates_to_the_baseline() {
        let registry = registry();
        let table = table();
        let params = params();
        let fleet = contended_fleet();

        let baseline =
            simulate_fleet(&fleet, &registry, &table, &params).total_weighted_wait_minutes();
        let ghost = RouteKey::new("NOPE", "XX");
        let total = evaluate_departure(&fleet, &registry, &table, &params, &ghost, "5:00");
        assert_eq!(total, baseline);
    }

    #[test]
    fn unsimulable_routes_get_no_recommendation() {
        let registry = registry();
        let table = table();
        let params = params();
        let mut fleet = contended_fleet();
        fleet.insert("GHST", "TF", route("CP4", "NOWHERE", "7:00", 5));

        let outcome = optimise(&fleet, &registry, &table, &params, &half_hourly(5, 9));
        assert_eq!(outcome.recommendations.len(), 2);
        assert!(outcome.recommendations.iter().all(|r| r.contractor != "GHST"));
    }

    /// Winners are collected in route order, so the threaded scan must land
    /// on the same picture as the serial one.
    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_scan_matches_the_serial_results() {
        let registry = registry();
        let table = table();
        let params = params();
        let fleet = contended_fleet();

        let outcome = optimise(&fleet, &registry, &table, &params, &half_hourly(5, 9));
        assert!((outcome.baseline_total_minutes - 78.75).abs() < 1e-9);
        assert_eq!(outcome.recommendations.len(), 2);
        assert_eq!(outcome.recommendations[0].contractor, "ALFA");
        assert_eq!(outcome.recommendations[1].contractor, "ZULU");
        for rec in &outcome.recommendations {
            assert_eq!(rec.optimal_departure, "5:00");
            assert!((rec.optimized_wait_minutes - 33.75).abs() < 1e-9);
        }
    }
}
