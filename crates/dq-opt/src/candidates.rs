//! Candidate departure-time windows.

/// Half-hourly `"H:MM"` clock strings from `from_hour:00` through
/// `to_hour:00` inclusive. `half_hourly(5, 9)` is the canonical morning
/// scan window: `5:00, 5:30, 6:00, … 9:00`.
///
/// Returns an empty list when `from_hour > to_hour`.
pub fn half_hourly(from_hour: u32, to_hour: u32) -> Vec<String> {
    let mut candidates = Vec::new();
    let mut minutes = from_hour * 60;
    while minutes <= to_hour * 60 {
        candidates.push(format!("{}:{:02}", minutes / 60, minutes % 60));
        minutes += 30;
    }
    candidates
}
