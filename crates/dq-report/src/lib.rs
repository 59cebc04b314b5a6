//! `dq-report` — report rows and writers for queueing-delay runs.
//!
//! Report content travels as three plain row types, assembled from pipeline
//! and optimiser outcomes by the [`summary`] functions and written by any
//! [`ReportWriter`]. The CSV backend creates one file per row type:
//!
//! | File                  | Rows                                           |
//! |-----------------------|------------------------------------------------|
//! | `recommendations.csv` | One per route: current vs optimal departure    |
//! | `zone_waits.csv`      | One per macro zone: waits before and after     |
//! | `sub_points.csv`      | One per arrival-bearing dump sub-point         |
//!
//! # Usage
//!
//! ```rust,ignore
//! use dq_report::{CsvReporter, ReportWriter, summary};
//!
//! let mut csv = CsvReporter::new(Path::new("./reports")).unwrap();
//! csv.write_recommendations(&summary::recommendation_rows(&outcome)).unwrap();
//! csv.write_zone_waits(&summary::zone_wait_rows(&registry, &sim, &outcome)).unwrap();
//! csv.write_sub_points(&summary::sub_point_rows(&registry, &sim)).unwrap();
//! csv.finish().unwrap();
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod summary;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvReporter;
pub use error::{ReportError, ReportResult};
pub use row::{RecommendationRow, SubPointRow, ZoneWaitRow};
pub use writer::ReportWriter;
