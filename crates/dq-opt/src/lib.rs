//! `dq-opt` — departure-time optimiser for the dump-queue pipeline.
//!
//! # Scan shape
//!
//! ```text
//! baseline ─► for each simulable route (independently):
//!               for each candidate departure:
//!                 objective with only this route moved
//!                 (incremental: re-simulate one sub-point)
//!               keep the first candidate strictly better than current
//!          ─► apply all winners to one working copy
//!          ─► re-run the pipeline once → after picture
//! ```
//!
//! The scan never recommends a regression: the current cost seeds each
//! route's best, so "no candidate beats the schedule" keeps the schedule,
//! whether or not the current departure is in the candidate list.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Scans routes on Rayon's thread pool; identical results. |

pub mod candidates;
pub mod optimiser;

#[cfg(test)]
mod tests;

pub use candidates::half_hourly;
pub use optimiser::{OptimisationOutcome, Recommendation, evaluate_departure, optimise};
