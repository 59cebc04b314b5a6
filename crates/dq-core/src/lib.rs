//! `dq-core` — foundational types for the `dump-queue` estimation toolkit.
//!
//! This crate is a dependency of every other `dq-*` crate. It intentionally
//! has no `dq-*` dependencies and minimal external ones (`rand`,
//! `rustc-hash`, `thiserror`, `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`time`]      | `Hours`, `"H:MM"` clock parsing/formatting                |
//! | [`sites`]     | `Zone`, `SubPointId`, `LineRange`, `SiteRegistry`         |
//! | [`params`]    | `SimParams` (speeds, truck spacing)                       |
//! | [`variation`] | `Variation`, `VariationRng` (seeded travel scatter)       |
//! | [`error`]     | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                         |
//! |---------|----------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on public types (used by `dq-fleet`) |

pub mod error;
pub mod params;
pub mod sites;
pub mod time;
pub mod variation;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use params::SimParams;
pub use sites::{LineRange, SiteRef, SiteRegistry, SiteRegistryBuilder, SubPoint, SubPointId, Zone};
pub use time::{DEFAULT_DEPARTURE, Hours, format_clock, parse_clock};
pub use variation::{Variation, VariationRng};
