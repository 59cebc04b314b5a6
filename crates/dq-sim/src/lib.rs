//! `dq-sim` — the deterministic dump-queue pipeline.
//!
//! # Pipeline
//!
//! ```text
//! FleetConfig ──┐
//! SiteRegistry ─┼─► ① plan_routes      — parse departures, resolve travel
//! TimingTable ──┘                        and service, pin dump sub-points
//!                 ② build_arrivals    — stagger trucks by the spacing,
//!                                       group by sub-point, sort by arrival
//!                 ③ simulate_queue    — multi-server FCFS per sub-point,
//!                                       servers from the registry
//!                 ④ zone aggregation  — truck-weighted average per zone
//!                                       → SimOutcome
//! ```
//!
//! Every stage is a total function: malformed routes are skipped or
//! defaulted during planning (with `debug!` breadcrumbs), so the pipeline
//! itself has no error type. Identical inputs produce identical outputs;
//! the only randomness in the crate is the opt-in travel variation in
//! [`analysis`], which never touches the pipeline.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`events`]   | `RoutePlan`, `ArrivalEvent`, builders                 |
//! | [`queue`]    | `simulate_queue`, `QueueStats`, `ServiceRecord`       |
//! | [`pipeline`] | `simulate_fleet`, `SimOutcome`, `ZoneWaits`           |
//! | [`analysis`] | per-sub-point trace and utilisation                   |

pub mod analysis;
pub mod events;
pub mod pipeline;
pub mod queue;


pub use analysis::{SubPointAnalysis, analyse_sub_point};
pub use events::{ArrivalEvent, RoutePlan, arrivals_from_plans, build_arrivals, plan_routes};
pub use pipeline::{SimOutcome, ZoneWaits, simulate_fleet};
pub use queue::{QueueStats, ServiceRecord, simulate_queue, simulate_queue_trace};
