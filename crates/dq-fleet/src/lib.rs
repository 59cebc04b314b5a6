//! `dq-fleet` — contractor route configuration: model, persistence, validation.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`route`]    | `RouteConfig`, `RouteKey`, `FleetConfig`                 |
//! | [`loader`]   | `load_fleet_json`, `load_fleet_reader`, `save_fleet_json`|
//! | [`validate`] | `Finding`, `validate_fleet`, `validate_params`           |
//! | [`error`]    | `FleetError`, `FleetResult<T>`                           |
//!
//! The simulation and optimisation crates only read `FleetConfig`; the one
//! mutation in the system (overwriting departure times) happens on clones
//! inside the optimiser and through [`FleetConfig::set_departure`] when a
//! caller applies a recommendation.

pub mod error;
pub mod loader;
pub mod route;
pub mod validate;


pub use error::{FleetError, FleetResult};
pub use loader::{load_fleet_json, load_fleet_reader, save_fleet_json};
pub use route::{FleetConfig, RouteConfig, RouteKey};
pub use validate::{Finding, validate_fleet, validate_params};
