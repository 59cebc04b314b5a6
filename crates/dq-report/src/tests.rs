//! Integration tests for dq-report.
//!
//! The simulation fixtures reuse dyadic leg times (travel 1.0 h, service
//! 0.25 h, spacing 0.0625 h) so every expected minute value is exact and the
//! two-decimal CSV cells can be asserted as strings.

#[cfg(test)]
fn registry() -> dq_core::SiteRegistry {
    use dq_core::{SiteRegistry, Zone};
    SiteRegistry::builder()
        .zone_name(Zone::A, "NORTH PAD")
        .zone_name(Zone::B, "SOUTH PAD")
        .sub_point(Zone::A, "PAD A (LINE 1-2)", "1-2", 1)
        .sub_point(Zone::B, "PAD S (LINE 9-9)", "9-9", 2) // 1 server
        .build()
        .unwrap()
}

#[cfg(test)]
fn table() -> dq_timing::TimingTable {
    use dq_core::Hours;
    use dq_timing::{TimingTable, TripTimes};
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

/// Three trucks on the single-server PAD S: waits 0 / 11.25 / 22.5 minutes,
/// so the fleet average is 11.25 and the last service ends at 8:45.
#[cfg(test)]
fn lone_fleet() -> dq_fleet::FleetConfig {
    let mut fleet = dq_fleet::FleetConfig::new();
    fleet.insert("ALFA", "TF", route("CP4", "PAD S (LINE 9-9)", "7:00", 3));
    fleet
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvReporter;
    use crate::row::{RecommendationRow, SubPointRow, ZoneWaitRow};
    use crate::writer::ReportWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn rec_row(contractor: &str) -> RecommendationRow {
        RecommendationRow {
            contractor:             contractor.to_owned(),
            parking:                "TF".to_owned(),
            current_departure:      "7:00".to_owned(),
            optimal_departure:      "5:30".to_owned(),
            current_wait_minutes:   20.0,
            optimized_wait_minutes: 12.5,
        }
    }

    fn zone_row(zone: &str) -> ZoneWaitRow {
        ZoneWaitRow {
            zone:                   zone.to_owned(),
            trucks:                 80,
            baseline_wait_minutes:  10.25,
            optimised_wait_minutes: 7.5,
        }
    }

    fn sub_row(name: &str) -> SubPointRow {
        SubPointRow {
            sub_point:        name.to_owned(),
            zone:             "SOUTH PAD".to_owned(),
            priority:         3,
            servers:          2,
            trucks:           25,
            avg_wait_minutes: 3.75,
            max_wait_minutes: 11.25,
            end_time:         "9:41".to_owned(),
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvReporter::new(dir.path()).unwrap();
        assert!(dir.path().join("recommendations.csv").exists());
        assert!(dir.path().join("zone_waits.csv").exists());
        assert!(dir.path().join("sub_points.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvReporter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("recommendations.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            [
                "contractor",
                "parking",
                "current_departure",
                "optimal_departure",
                "current_wait_minutes",
                "optimized_wait_minutes"
            ]
        );

        let mut rdr2 = csv::Reader::from_path(dir.path().join("zone_waits.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers2,
            ["zone", "trucks", "baseline_wait_minutes", "optimised_wait_minutes"]
        );

        let mut rdr3 = csv::Reader::from_path(dir.path().join("sub_points.csv")).unwrap();
        let headers3: Vec<_> = rdr3.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers3,
            [
                "sub_point",
                "zone",
                "priority",
                "servers",
                "trucks",
                "avg_wait_minutes",
                "max_wait_minutes",
                "end_time"
            ]
        );
    }

    #[test]
    fn csv_recommendation_round_trip() {
        let dir = tmp();
        let mut w = CsvReporter::new(dir.path()).unwrap();
        w.write_recommendations(&[rec_row("RIM"), rec_row("CKB")]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("recommendations.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "RIM");
        assert_eq!(&rows[0][2], "7:00");
        assert_eq!(&rows[0][3], "5:30");
        assert_eq!(&rows[0][4], "20.00");
        assert_eq!(&rows[0][5], "12.50");
        assert_eq!(&rows[1][0], "CKB");
    }

    #[test]
    fn csv_zone_wait_round_trip() {
        let dir = tmp();
        let mut w = CsvReporter::new(dir.path()).unwrap();
        w.write_zone_waits(&[zone_row("FENI KM 0")]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("zone_waits.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "FENI KM 0");
        assert_eq!(&rows[0][1], "80");
        assert_eq!(&rows[0][2], "10.25");
        assert_eq!(&rows[0][3], "7.50");
    }

    #[test]
    fn csv_sub_point_round_trip() {
        let dir = tmp();
        let mut w = CsvReporter::new(dir.path()).unwrap();
        w.write_sub_points(&[sub_row("PAD T (LINE 65-66)")]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("sub_points.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "PAD T (LINE 65-66)");
        assert_eq!(&rows[0][1], "SOUTH PAD");
        assert_eq!(&rows[0][2], "3");
        assert_eq!(&rows[0][3], "2");
        assert_eq!(&rows[0][4], "25");
        assert_eq!(&rows[0][5], "3.75");
        assert_eq!(&rows[0][6], "11.25");
        assert_eq!(&rows[0][7], "9:41");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvReporter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvReporter::new(dir.path()).unwrap();
        w.write_recommendations(&[]).unwrap();
        w.write_zone_waits(&[]).unwrap();
        w.write_sub_points(&[]).unwrap();
    }
}

#[cfg(test)]
mod summary_tests {
    use dq_core::Zone;
    use dq_opt::optimise;
    use dq_sim::simulate_fleet;

    use crate::summary::{recommendation_rows, sub_point_rows, zone_wait_rows};

    use super::{lone_fleet, params, registry, route, table};

    #[test]
    fn recommendation_rows_mirror_the_outcome() {
        let registry = registry();
        let table = table();
        let params = params();
        let fleet = lone_fleet();

        let outcome = optimise(&fleet, &registry, &table, &params, &[]);
        let rows = recommendation_rows(&outcome);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].contractor, "ALFA");
        assert_eq!(rows[0].parking, "TF");
        assert_eq!(rows[0].current_departure, "7:00");
        // No candidates were offered, so the current departure stands.
        assert_eq!(rows[0].optimal_departure, "7:00");
        assert_eq!(rows[0].current_wait_minutes, 33.75);
        assert_eq!(rows[0].optimized_wait_minutes, 33.75);
    }

    #[test]
    fn zone_rows_follow_zone_order() {
        let registry = registry();
        let table = table();
        let params = params();
        let fleet = lone_fleet();

        let sim = simulate_fleet(&fleet, &registry, &table, &params);
        let outcome = optimise(&fleet, &registry, &table, &params, &[]);
        let rows = zone_wait_rows(&registry, &sim, &outcome);

        assert_eq!(rows.len(), Zone::ALL.len());
        assert_eq!(rows[0].zone, "NORTH PAD");
        assert_eq!(rows[0].trucks, 0);
        assert_eq!(rows[0].baseline_wait_minutes, 0.0);
        assert_eq!(rows[1].zone, "SOUTH PAD");
        assert_eq!(rows[1].trucks, 3);
        assert_eq!(rows[1].baseline_wait_minutes, 11.25);
        assert_eq!(rows[1].optimised_wait_minutes, 11.25);
    }

    #[test]
    fn sub_point_rows_are_sorted_and_complete() {
        let registry = registry();
        let table = table();
        let params = params();
        // BETA has no timing row; its trucks reach the two-line PAD A late
        // and never queue there.
        let mut fleet = lone_fleet();
        fleet.insert("BETA", "KR", route("CP4", "PAD A (LINE 1-2)", "7:00", 2));

        let sim = simulate_fleet(&fleet, &registry, &table, &params);
        let rows = sub_point_rows(&registry, &sim);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sub_point, "PAD A (LINE 1-2)");
        assert_eq!(rows[0].zone, "NORTH PAD");
        assert_eq!(rows[0].priority, 1);
        assert_eq!(rows[0].servers, 2);
        assert_eq!(rows[0].trucks, 2);
        assert_eq!(rows[0].avg_wait_minutes, 0.0);
        assert_eq!(rows[1].sub_point, "PAD S (LINE 9-9)");
        assert_eq!(rows[1].zone, "SOUTH PAD");
        assert_eq!(rows[1].priority, 2);
        assert_eq!(rows[1].servers, 1);
        assert_eq!(rows[1].trucks, 3);
        assert_eq!(rows[1].avg_wait_minutes, 11.25);
        assert_eq!(rows[1].max_wait_minutes, 22.5);
        assert_eq!(rows[1].end_time, "8:45");
    }

    #[test]
    fn integration_csv() {
        use dq_opt::half_hourly;
        use tempfile::tempdir;

        use crate::csv::CsvReporter;
        use crate::writer::ReportWriter;

        let registry = registry();
        let table = table();
        let params = params();
        // Four trucks contend for the single PAD S line from 8.0 on.
        let mut fleet = lone_fleet();
        fleet.insert("ZULU", "KR", route("CP4", "PAD S (LINE 9-9)", "7:00", 1));

        let sim = simulate_fleet(&fleet, &registry, &table, &params);
        let outcome = optimise(&fleet, &registry, &table, &params, &half_hourly(5, 9));

        let dir = tempdir().expect("create temp dir");
        let mut w = CsvReporter::new(dir.path()).unwrap();
        w.write_recommendations(&recommendation_rows(&outcome)).unwrap();
        w.write_zone_waits(&zone_wait_rows(&registry, &sim, &outcome)).unwrap();
        w.write_sub_points(&sub_point_rows(&registry, &sim)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("recommendations.csv")).unwrap();
        let recs: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(recs.len(), 2);
        // Each route alone profits from the empty 5:00 slot.
        assert_eq!(&recs[0][0], "ALFA");
        assert_eq!(&recs[0][3], "5:00");
        assert_eq!(&recs[0][4], "78.75");
        assert_eq!(&recs[0][5], "33.75");
        assert_eq!(&recs[1][0], "ZULU");
        assert_eq!(&recs[1][3], "5:00");

        let mut rdr2 = csv::Reader::from_path(dir.path().join("zone_waits.csv")).unwrap();
        let zones: Vec<_> = rdr2.records().map(|r| r.unwrap()).collect();
        assert_eq!(zones.len(), 2);
        assert_eq!(&zones[0][0], "NORTH PAD");
        assert_eq!(&zones[0][2], "0.00");
        assert_eq!(&zones[1][0], "SOUTH PAD");
        assert_eq!(&zones[1][1], "4");
        assert_eq!(&zones[1][2], "19.69");
        // Both winners land on 5:00 and recreate the jam there.
        assert_eq!(&zones[1][3], "19.69");

        let mut rdr3 = csv::Reader::from_path(dir.path().join("sub_points.csv")).unwrap();
        let subs: Vec<_> = rdr3.records().map(|r| r.unwrap()).collect();
        assert_eq!(subs.len(), 1);
        assert_eq!(&subs[0][0], "PAD S (LINE 9-9)");
        assert_eq!(&subs[0][2], "2");
        assert_eq!(&subs[0][4], "4");
        assert_eq!(&subs[0][5], "19.69");
        assert_eq!(&subs[0][6], "37.50");
        assert_eq!(&subs[0][7], "9:00");
    }
}
