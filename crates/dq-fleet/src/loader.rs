//! JSON fleet-config persistence.
//!
//! # JSON format
//!
//! The persisted shape is the raw two-level nesting, no wrapper object:
//!
//! ```json
//! {
//!   "RIM": {
//!     "TF": {
//!       "loading_location": "CP4",
//!       "dumping_location": "FENI U1 (LINE 65-66)",
//!       "departure_time": "7:00",
//!       "number_of_trucks": 25
//!     }
//!   }
//! }
//! ```
//!
//! Missing `departure_time` defaults to `"7:00"`, missing
//! `number_of_trucks` to 0. Structural problems (non-object nesting, wrong
//! value types) are parse errors: this loader is the validation boundary
//! the core relies on.

use std::io::Read;
use std::path::Path;

use crate::{FleetConfig, FleetError};

/// Load a [`FleetConfig`] from a JSON file.
pub fn load_fleet_json(path: &Path) -> Result<FleetConfig, FleetError> {
    let file = std::fs::File::open(path).map_err(FleetError::Io)?;
    load_fleet_reader(file)
}

/// Like [`load_fleet_json`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or configs embedded in
/// application binaries.
pub fn load_fleet_reader<R: Read>(reader: R) -> Result<FleetConfig, FleetError> {
    let fleet = serde_json::from_reader(reader)?;
    Ok(fleet)
}

/// Write a [`FleetConfig`] back to pretty-printed JSON.
pub fn save_fleet_json(path: &Path, fleet: &FleetConfig) -> Result<(), FleetError> {
    let file = std::fs::File::create(path).map_err(FleetError::Io)?;
    serde_json::to_writer_pretty(file, fleet)?;
    Ok(())
}
