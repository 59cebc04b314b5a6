//! CSV timing-table loader.
//!
//! # CSV format
//!
//! One row per surveyed route. All time columns are fractional hours as
//! recorded at the 25 km/h reference speed; blank cells mean "component not
//! surveyed" and resolve to defaults.
//!
//! ```csv
//! contractor,parking,loading,dump,parking_to_loading_h,wait_for_loading_h,spot_at_loading_h,loading_h,loading_to_dump_h,wait_for_dumping_h,dumping_h,dump_spotting_h,empty_return_h
//! RIM,TF,CP4,FENI U1 (LINE 65-66),0.80,0.10,0.02,0.25,0.55,0.45,0.08,0.03,0.70
//! CKB,KR,CP2,FENI B (LINE 5-6),0.60,,0.02,0.30,0.40,,0.10,,0.55
//! ```
//!
//! The `contractor` column is provenance only. The lookup key is the
//! case-insensitive (parking, loading, dump) triple, and a later row for the
//! same triple overwrites an earlier one.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::trace;

use dq_core::Hours;

use crate::table::{TimingTable, TripTimes};
use crate::TimingError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TimingRecord {
    contractor:           String,
    parking:              String,
    loading:              String,
    dump:                 String,
    parking_to_loading_h: Option<f64>,
    wait_for_loading_h:   Option<f64>,
    spot_at_loading_h:    Option<f64>,
    loading_h:            Option<f64>,
    loading_to_dump_h:    Option<f64>,
    wait_for_dumping_h:   Option<f64>,
    dumping_h:            Option<f64>,
    dump_spotting_h:      Option<f64>,
    empty_return_h:       Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`TimingTable`] from a CSV file.
pub fn load_table_csv(path: &Path) -> Result<TimingTable, TimingError> {
    let file = std::fs::File::open(path).map_err(TimingError::Io)?;
    load_table_reader(file)
}

/// Like [`load_table_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for tables embedded in
/// application binaries.
pub fn load_table_reader<R: Read>(reader: R) -> Result<TimingTable, TimingError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = TimingTable::new();

    for result in csv_reader.deserialize::<TimingRecord>() {
        let rec = result.map_err(|e| TimingError::Parse(e.to_string()))?;
        trace!(
            contractor = %rec.contractor,
            parking = %rec.parking,
            dump = %rec.dump,
            "timing row loaded"
        );
        table.insert(
            &rec.parking,
            &rec.loading,
            &rec.dump,
            TripTimes {
                parking_to_loading: rec.parking_to_loading_h.map(Hours),
                wait_for_loading:   rec.wait_for_loading_h.map(Hours),
                spot_at_loading:    rec.spot_at_loading_h.map(Hours),
                loading:            rec.loading_h.map(Hours),
                loading_to_dump:    rec.loading_to_dump_h.map(Hours),
                wait_for_dumping:   rec.wait_for_dumping_h.map(Hours),
                dumping:            rec.dumping_h.map(Hours),
                dump_spotting:      rec.dump_spotting_h.map(Hours),
                empty_return:       rec.empty_return_h.map(Hours),
            },
        );
    }

    Ok(table)
}
