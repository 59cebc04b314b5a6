//! Deterministic multi-server FCFS queue.
//!
//! Trucks are served strictly in arrival order. Each truck takes the server
//! that frees up earliest (lowest index on ties), waits if that server is
//! still busy, then occupies it for its service time. No randomness, no
//! balking, no priorities.

use dq_core::Hours;

use crate::ArrivalEvent;

// ── Results ──────────────────────────────────────────────────────────────────

/// Aggregate queue outcome for one dump sub-point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QueueStats {
    /// Trucks served.
    pub trucks:           usize,
    pub total_wait:       Hours,
    pub max_wait:         Hours,
    pub avg_wait_minutes: f64,
    /// When the last server goes idle. Zero for an empty queue.
    pub end_time:         Hours,
}

/// Per-truck service trace from [`simulate_queue_trace`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ServiceRecord {
    pub arrival: Hours,
    pub wait:    Hours,
    /// Service start (`arrival + wait`).
    pub start:   Hours,
    /// Index of the server that took the truck.
    pub server:  u32,
}

// ── Simulation ───────────────────────────────────────────────────────────────

/// Run the queue and return aggregate statistics.
///
/// `events` must already be sorted by arrival (the event builder guarantees
/// this). `servers` is clamped to at least 1. An empty slice returns
/// all-zero stats.
pub fn simulate_queue(events: &[ArrivalEvent], servers: u32) -> QueueStats {
    run_queue(events, servers, |_| {})
}

/// Like [`simulate_queue`] but also returns the per-truck service records,
/// in arrival order.
pub fn simulate_queue_trace(
    events: &[ArrivalEvent],
    servers: u32,
) -> (QueueStats, Vec<ServiceRecord>) {
    let mut records = Vec::with_capacity(events.len());
    let stats = run_queue(events, servers, |record| records.push(record));
    (stats, records)
}

fn run_queue(
    events: &[ArrivalEvent],
    servers: u32,
    mut on_serve: impl FnMut(ServiceRecord),
) -> QueueStats {
    if events.is_empty() {
        return QueueStats::default();
    }
    let mut free = vec![Hours::ZERO; servers.max(1) as usize];
    let mut total_wait = Hours::ZERO;
    let mut max_wait = Hours::ZERO;

    for event in events {
        let server = earliest_free(&free);
        let wait = (free[server] - event.arrival).max(Hours::ZERO);
        let start = event.arrival + wait;
        free[server] = start + event.service;

        total_wait += wait;
        max_wait = max_wait.max(wait);
        on_serve(ServiceRecord {
            arrival: event.arrival,
            wait,
            start,
            server: server as u32,
        });
    }

    QueueStats {
        trucks: events.len(),
        total_wait,
        max_wait,
        avg_wait_minutes: total_wait.minutes() / events.len() as f64,
        end_time: free.iter().copied().fold(Hours::ZERO, Hours::max),
    }
}

/// Index of the server with the smallest free time. Strict `<` keeps the
/// lowest index on ties.
fn earliest_free(free: &[Hours]) -> usize {
    let mut best = 0;
    for (i, t) in free.iter().enumerate().skip(1) {
        if t.0 < free[best].0 {
            best = i;
        }
    }
    best
}
