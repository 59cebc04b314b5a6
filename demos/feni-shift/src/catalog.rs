//! The FENI dump catalogue and the shipped morning fleet.
//!
//! Site names, line assignments, priorities, departure times, and truck
//! counts come from the operation's configuration sheet. Priorities group
//! paired lines under one pad letter (both FENI A sites are priority 1).

use dq_core::{CoreResult, SiteRegistry, Zone};
use dq_fleet::{FleetConfig, RouteConfig};

/// KM 0 pads, thirty paired-line sites from A through S.
const KM0_SUB_POINTS: [(&str, &str, u32); 30] = [
    ("FENI A (LINE 1-2)", "1-2", 1),
    ("FENI A (LINE 3-4)", "3-4", 1),
    ("FENI B (LINE 5-6)", "5-6", 2),
    ("FENI B (LINE 7-8)", "7-8", 2),
    ("FENI C (LINE 9-10)", "9-10", 3),
    ("FENI C (LINE 11-12)", "11-12", 3),
    ("FENI D (LINE 13-14)", "13-14", 4),
    ("FENI D (LINE 15-16)", "15-16", 4),
    ("FENI E (LINE 17-18)", "17-18", 5),
    ("FENI E (LINE 19-20)", "19-20", 5),
    ("FENI F1 (LINE 21-22)", "21-22", 6),
    ("FENI F2 (LINE 23-24)", "23-24", 6),
    ("FENI G (LINE 25-26)", "25-26", 7),
    ("FENI G (LINE 27-28)", "27-28", 7),
    ("FENI H (LINE 29-30)", "29-30", 8),
    ("FENI H (LINE 31-32)", "31-32", 8),
    ("FENI K (LINE 33-34)", "33-34", 9),
    ("FENI K (LINE 35-36)", "35-36", 9),
    ("FENI L1 (LINE 37-38)", "37-38", 10),
    ("FENI L2 (LINE 39-40)", "39-40", 10),
    ("FENI L3 (LINE 41-42)", "41-42", 10),
    ("FENI M (LINE 43-44)", "43-44", 11),
    ("FENI M (LINE 45-46)", "45-46", 11),
    ("FENI O1 (LINE 47-48)", "47-48", 12),
    ("FENI O2 (LINE 49-50)", "49-50", 12),
    ("FENI Q (LINE 51-52)", "51-52", 13),
    ("FENI Q (LINE 53-54)", "53-54", 13),
    ("FENI R (LINE 55-56)", "55-56", 14),
    ("FENI S (LINE 57-58)", "57-58", 15),
    ("FENI S (LINE 59-60)", "59-60", 15),
];

/// KM 15 pads, four sites.
const KM15_SUB_POINTS: [(&str, &str, u32); 4] = [
    ("FENI U1 (LINE 65-66)", "65-66", 1),
    ("FENI U2 (LINE 67-68)", "67-68", 2),
    ("FENI W (LINE 69-70)", "69-70", 3),
    ("FENI W (LINE 71-72)", "71-72", 4),
];

/// Build the two-zone FENI registry.
///
/// The bare location codes `FENI KM0` and `FENI KM15` still resolve to their
/// zones; older spreadsheets use them as dump names.
pub fn feni_registry() -> CoreResult<SiteRegistry> {
    let mut builder = SiteRegistry::builder()
        .zone_name(Zone::A, "FENI KM 0")
        .zone_name(Zone::B, "FENI KM 15")
        .zone_alias(Zone::A, "FENI KM0")
        .zone_alias(Zone::B, "FENI KM15");
    for (name, lines, priority) in KM0_SUB_POINTS {
        builder = builder.sub_point(Zone::A, name, lines, priority);
    }
    for (name, lines, priority) in KM15_SUB_POINTS {
        builder = builder.sub_point(Zone::B, name, lines, priority);
    }
    builder.build()
}

/// The shipped morning fleet: eight routes, 198 trucks, five contractors.
///
/// Every route targets its own sub-point, so the shipped plan is
/// conflict-free by construction.
pub fn default_fleet() -> FleetConfig {
    let mut fleet = FleetConfig::new();
    fleet.insert("RIM", "TF", route("CP4", "FENI U1 (LINE 65-66)", "7:00", 25));
    fleet.insert("RIM", "KR", route("CP2", "FENI U2 (LINE 67-68)", "7:00", 20));
    fleet.insert("RIM", "BLB", route("CP4-SOUTH", "FENI A (LINE 1-2)", "7:00", 30));
    fleet.insert("GMG", "TF", route("CP4", "FENI W (LINE 69-70)", "6:00", 30));
    fleet.insert("CKB", "TF", route("CP4", "FENI W (LINE 71-72)", "5:00", 23));
    fleet.insert("CKB", "KR", route("CP2", "FENI B (LINE 5-6)", "6:00", 25));
    fleet.insert("SSS", "KR", route("CP2-NORTH", "FENI C (LINE 9-10)", "6:00", 20));
    fleet.insert("HJS", "CBB", route("CP2", "FENI D (LINE 13-14)", "7:00", 25));
    fleet
}

fn route(loading: &str, dump: &str, departure: &str, trucks: u32) -> RouteConfig {
    RouteConfig {
        loading_location: loading.to_owned(),
        dumping_location: dump.to_owned(),
        departure_time:   departure.to_owned(),
        number_of_trucks: trucks,
    }
}
