//! Generation decay weights.
//!
//! Shallow generations weigh more than deep ones: `decay(l) = 1 / 1.2^l`,
//! normalized so the weights of levels `0..total_levels` sum to one.

use pedigree_core::LevelKey;

/// Per-generation decay factor.
pub const GENERATION_DECAY: f64 = 1.2;

fn decay(level: i64) -> f64 {
    let exponent = level.clamp(0, i64::from(i32::MAX)) as i32;
    1.0 / GENERATION_DECAY.powi(exponent)
}

/// Geometric sum of `decay(l)` for `l` in `0..total`.
fn normalizer(total: usize) -> f64 {
    let ratio = 1.0 / GENERATION_DECAY;
    let exponent = i32::try_from(total).unwrap_or(i32::MAX);
    (1.0 - ratio.powi(exponent)) / (1.0 - ratio)
}

/// Normalized weight of `level` in a tree of `total_levels` generations.
/// Negative levels weigh like level 0; `total_levels` below 1 is treated as 1.
/// Constant time in both arguments.
pub fn generation_weight(level: i64, total_levels: usize) -> f64 {
    decay(level) / normalizer(total_levels.max(1))
}

/// `max(numeric level >= 0) + 1` over the given keys, at least 1.
pub fn total_levels<'a, I>(levels: I) -> usize
where
    I: IntoIterator<Item = &'a LevelKey>,
{
    levels
        .into_iter()
        .filter_map(LevelKey::level)
        .filter(|l| *l >= 0)
        .max()
        .map_or(1, |max| usize::try_from(max).unwrap_or(usize::MAX - 1) + 1)
}
