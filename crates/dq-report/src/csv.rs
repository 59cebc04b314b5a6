//! CSV report backend.
//!
//! Creates three files in the configured output directory:
//! - `recommendations.csv`
//! - `zone_waits.csv`
//! - `sub_points.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::ReportWriter;
use crate::{RecommendationRow, ReportResult, SubPointRow, ZoneWaitRow};

/// Writes shift reports to three CSV files.
pub struct CsvReporter {
    recommendations: Writer<File>,
    zone_waits:      Writer<File>,
    sub_points:      Writer<File>,
    finished:        bool,
}

impl CsvReporter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> ReportResult<Self> {
        let mut recommendations = Writer::from_path(dir.join("recommendations.csv"))?;
        recommendations.write_record([
            "contractor",
            "parking",
            "current_departure",
            "optimal_departure",
            "current_wait_minutes",
            "optimized_wait_minutes",
        ])?;

        let mut zone_waits = Writer::from_path(dir.join("zone_waits.csv"))?;
        zone_waits.write_record([
            "zone",
            "trucks",
            "baseline_wait_minutes",
            "optimised_wait_minutes",
        ])?;

        let mut sub_points = Writer::from_path(dir.join("sub_points.csv"))?;
        sub_points.write_record([
            "sub_point",
            "zone",
            "priority",
            "servers",
            "trucks",
            "avg_wait_minutes",
            "max_wait_minutes",
            "end_time",
        ])?;

        Ok(Self {
            recommendations,
            zone_waits,
            sub_points,
            finished: false,
        })
    }
}

impl ReportWriter for CsvReporter {
    fn write_recommendations(&mut self, rows: &[RecommendationRow]) -> ReportResult<()> {
        for row in rows {
            self.recommendations.write_record(&[
                row.contractor.clone(),
                row.parking.clone(),
                row.current_departure.clone(),
                row.optimal_departure.clone(),
                minutes(row.current_wait_minutes),
                minutes(row.optimized_wait_minutes),
            ])?;
        }
        Ok(())
    }

    fn write_zone_waits(&mut self, rows: &[ZoneWaitRow]) -> ReportResult<()> {
        for row in rows {
            self.zone_waits.write_record(&[
                row.zone.clone(),
                row.trucks.to_string(),
                minutes(row.baseline_wait_minutes),
                minutes(row.optimised_wait_minutes),
            ])?;
        }
        Ok(())
    }

    fn write_sub_points(&mut self, rows: &[SubPointRow]) -> ReportResult<()> {
        for row in rows {
            self.sub_points.write_record(&[
                row.sub_point.clone(),
                row.zone.clone(),
                row.priority.to_string(),
                row.servers.to_string(),
                row.trucks.to_string(),
                minutes(row.avg_wait_minutes),
                minutes(row.max_wait_minutes),
                row.end_time.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.recommendations.flush()?;
        self.zone_waits.flush()?;
        self.sub_points.flush()?;
        Ok(())
    }
}

/// Minute columns are written with two decimals.
fn minutes(value: f64) -> String {
    format!("{value:.2}")
}
