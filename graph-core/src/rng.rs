//! The seeded random-number capability (`spec.md` §5, §9 "Random source").
//!
//! Randomised kernels (Wang's k-edge-connectivity divide, the random-walk helper) never reach
//! for `rand::thread_rng()` directly: they hold a local generator behind the [`RandomSource`]
//! trait, so tests can inject a deterministic sequence and so two algorithm *instances* are
//! independent even though they may run the same seed (§5 "Shared mutable state": none at module
//! level).

use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// `nextInt(bound)` / `nextBool()`, abstracted behind a trait so algorithms don't hard-code a
/// concrete generator (`spec.md` §9).
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. Panics if `bound == 0`.
    fn next_usize(&mut self, bound: usize) -> usize;

    fn next_bool(&mut self) -> bool;
}

impl<R: RngCore> RandomSource for R {
    fn next_usize(&mut self, bound: usize) -> usize {
        assert!(bound > 0, "next_usize bound must be positive");
        self.gen_range(0..bound)
    }

    fn next_bool(&mut self) -> bool {
        self.gen()
    }
}

/// The capability every `RandomizedAlgorithm` exposes (`spec.md` §5): `setSeed(long)`, backed by
/// a local, non-shared generator. Two concurrent calls on the *same* algorithm instance that both
/// set the seed are a caller bug (documented precondition, not checked).
#[derive(Debug, Clone)]
pub struct Seeded {
    rng: Xoshiro256PlusPlus,
}

impl Default for Seeded {
    /// Seeds from system entropy (`spec.md` §5: "seeded either from system entropy or from a
    /// user-supplied seed").
    fn default() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }
}

impl Seeded {
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    }
}

impl RandomSource for Seeded {
    fn next_usize(&mut self, bound: usize) -> usize {
        self.rng.next_usize(bound)
    }

    fn next_bool(&mut self) -> bool {
        self.rng.next_bool()
    }
}

/// A capability marker for algorithm builders that accept a seed (`spec.md` §5
/// `RandomizedAlgorithm`). Implementors own a [`Seeded`] field and forward to it.
pub trait RandomizedAlgorithm {
    fn set_seed(&mut self, seed: u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Seeded::from_seed(42);
        let mut b = Seeded::from_seed(42);
        let sa: Vec<usize> = (0..10).map(|_| a.next_usize(1000)).collect();
        let sb: Vec<usize> = (0..10).map(|_| b.next_usize(1000)).collect();
        assert_eq!(sa, sb);
    }

    #[test]
    fn bounds_are_respected() {
        let mut r = Seeded::from_seed(7);
        for _ in 0..1000 {
            assert!(r.next_usize(5) < 5);
        }
    }
}
