//! Shared pipeline parameters.

use crate::Hours;

/// Knobs shared by the resolver, event builder, and optimiser.
///
/// One value of this struct describes a whole scenario run; the pipeline is
/// a pure function of `(fleet, registry, timing table, params)`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    /// Travel speed with no load, parking → loader (km/h).
    pub empty_speed_kmh:  f64,

    /// Travel speed under load, loader → dump (km/h).
    pub loaded_speed_kmh: f64,

    /// Gap between consecutive trucks departing the same parking location.
    /// Spreads arrivals so a whole route does not land in one instant.
    pub spacing:          Hours,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            empty_speed_kmh:  40.0,
            loaded_speed_kmh: 30.0,
            spacing:          Hours(0.02),
        }
    }
}

impl SimParams {
    pub fn with_speeds(empty_kmh: f64, loaded_kmh: f64) -> Self {
        Self {
            empty_speed_kmh: empty_kmh,
            loaded_speed_kmh: loaded_kmh,
            ..Self::default()
        }
    }
}
