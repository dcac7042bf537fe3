//! Utility functions shared by the learners and the training pipeline

use rand::{SeedableRng, rngs::StdRng};

/// Seeded generator when a seed is given, otherwise one seeded from the thread RNG.
///
/// # Examples
///
/// ```
/// use catmouse::utils::build_rng;
/// use rand::Rng;
///
/// let a: u64 = build_rng(Some(3)).random();
/// let b: u64 = build_rng(Some(3)).random();
/// assert_eq!(a, b);
/// ```
pub fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}
