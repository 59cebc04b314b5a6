//! The `ReportWriter` trait implemented by report backends.

use crate::{RecommendationRow, ReportResult, SubPointRow, ZoneWaitRow};

/// Trait implemented by report backends.
pub trait ReportWriter {
    /// Write a batch of per-route recommendations.
    fn write_recommendations(&mut self, rows: &[RecommendationRow]) -> ReportResult<()>;

    /// Write a batch of per-zone wait summaries.
    fn write_zone_waits(&mut self, rows: &[ZoneWaitRow]) -> ReportResult<()>;

    /// Write a batch of per-sub-point queue detail rows.
    fn write_sub_points(&mut self, rows: &[SubPointRow]) -> ReportResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; calling it again is a no-op.
    fn finish(&mut self) -> ReportResult<()>;
}
