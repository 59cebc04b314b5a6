//! `dq-timing` — the route timing table and time resolver.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`table`]  | `TimingTable`, `TripTimes`, `LegTimes`, resolver defaults  |
//! | [`loader`] | `load_table_csv`, `load_table_reader`                      |
//! | [`cycle`]  | `CycleBreakdown`, `cycle_breakdown`                        |
//! | [`error`]  | `TimingError`, `TimingResult<T>`                           |
//!
//! # Resolution model (summary)
//!
//! A route is the case-insensitive triple (parking, loading, dump). For each
//! component the resolver takes the stored value when present, otherwise a
//! documented default; travel legs are stored as durations at a 25 km/h
//! reference speed and rescaled to the user speeds by converting through
//! distance. Resolution is total: an empty table still resolves every
//! route, purely from defaults.

pub mod cycle;
pub mod error;
pub mod loader;
pub mod table;


pub use cycle::{CycleBreakdown, cycle_breakdown};
pub use error::{TimingError, TimingResult};
pub use loader::{load_table_csv, load_table_reader};
pub use table::{LegTimes, REFERENCE_SPEED_KMH, TimingTable, TripTimes};
