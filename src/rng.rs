//! Random source shared by the initializer and the physics step.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// RNG used by every engine. Seedable so runs can be replayed.
pub type BannerRng = SmallRng;

/// Create an engine RNG from a seed.
pub fn seeded(seed: u64) -> BannerRng {
    SmallRng::seed_from_u64(seed)
}

/// Uniform sample in `[lo, hi)`.
///
/// Unlike `random_range`, an inverted or empty range does not panic: the
/// result is interpolated between the bounds. Tiny surfaces produce inverted
/// padding ranges and must still initialize.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Uniform index in `[0, n)`. `n` must be non-zero.
#[inline]
pub fn index<R: Rng + ?Sized>(rng: &mut R, n: u32) -> u32 {
    rng.random_range(0..n)
}
