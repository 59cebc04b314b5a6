//! Deterministic travel-time variation for what-if analysis.
//!
//! # Determinism strategy
//!
//! The core pipeline is bit-for-bit deterministic and never samples. The
//! per-sub-point analysis can opt into a per-truck travel multiplier drawn
//! uniformly from `[1 − spread, 1 + spread]` to approximate real-world
//! scatter. Each analysis stream gets its own `SmallRng` seeded by:
//!
//!   seed = run_seed XOR (stream * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream indices uniformly across the seed space,
//! so analysing sub-points in a different order never changes any one
//! sub-point's factors.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Travel-variation settings: a run seed and a half-width.
///
/// `spread` 0.05 reproduces the conventional ±5 % setting; 0.0 degenerates
/// to a factor of exactly 1.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variation {
    pub seed:   u64,
    pub spread: f64,
}

impl Variation {
    pub const DEFAULT_SPREAD: f64 = 0.05;

    /// ±5 % variation under the given seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, spread: Self::DEFAULT_SPREAD }
    }

    pub fn with_spread(seed: u64, spread: f64) -> Self {
        Self { seed, spread }
    }
}

/// One deterministic stream of travel multipliers.
pub struct VariationRng {
    rng:    SmallRng,
    spread: f64,
}

impl VariationRng {
    /// Stream `stream` of the run described by `variation`.
    pub fn for_stream(variation: Variation, stream: u64) -> Self {
        let seed = variation.seed ^ stream.wrapping_mul(MIXING_CONSTANT);
        Self {
            rng:    SmallRng::seed_from_u64(seed),
            spread: variation.spread.clamp(0.0, 1.0),
        }
    }

    /// Next multiplier, uniform in `[1 − spread, 1 + spread]`.
    #[inline]
    pub fn factor(&mut self) -> f64 {
        self.rng.gen_range(1.0 - self.spread..=1.0 + self.spread)
    }
}
