use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Source of randomness for reviewer picks.
///
/// Built once per process and handed to the engines, so concurrent requests
/// draw from one generator instead of reseeding per call. A fixed seed makes
/// every pick reproducible.
pub struct Sampler {
    rng: Mutex<StdRng>,
}

impl Sampler {
    pub fn from_entropy() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // a panic while holding the lock cannot leave the rng half-updated
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Uniformly samples `amount` distinct elements without replacement.
    /// Returns all of `items`, shuffled, when `amount >= items.len()`.
    pub fn pick_many<T: Clone>(&self, items: &[T], amount: usize) -> Vec<T> {
        let mut pool = items.to_vec();
        let (chosen, _) = pool.partial_shuffle(&mut *self.rng(), amount);
        chosen.to_vec()
    }

    /// One uniform draw, `None` for an empty slice.
    pub fn pick_one<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut *self.rng())
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_draws() {
        let items: Vec<u32> = (0..10).collect();
        let a = Sampler::seeded(42);
        let b = Sampler::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.pick_many(&items, 3), b.pick_many(&items, 3));
        }
    }

    #[test]
    fn pick_many_caps_at_pool_size() {
        let sampler = Sampler::seeded(1);
        let mut picked = sampler.pick_many(&["a", "b"], 5);
        picked.sort();
        assert_eq!(picked, vec!["a", "b"]);
    }

    #[test]
    fn pick_one_on_empty_is_none() {
        let sampler = Sampler::seeded(1);
        let empty: [u8; 0] = [];
        assert!(sampler.pick_one(&empty).is_none());
    }
}
