//! Injectable randomness.
//!
//! The engine draws every random choice through `RandomSource`, so tests can
//! swap the production generator for a seeded or scripted one.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rounds
//! - **Forkable**: Independent per-round streams for batch simulation
//! - **Scriptable**: `ScriptedRng` replays a fixed list of choices
//!
//! ```
//! use safe_cracker::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let mut replay = GameRng::new(42);
//! assert_eq!(rng.gen_index(9), replay.gen_index(9));
//!
//! // Forks are deterministic too
//! let mut a = GameRng::new(42).fork();
//! let mut b = GameRng::new(42).fork();
//! assert_eq!(a.gen_index(100), b.gen_index(100));
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform random choices.
///
/// `gen_index` is the only required method. `shuffle` and `pick_distinct`
/// are built on it, so a scripted source controls every decision.
pub trait RandomSource {
    /// Uniform index in `0..upper`. `upper` is never zero.
    fn gen_index(&mut self, upper: usize) -> usize;

    /// Uniformly permute a slice in place (Fisher-Yates).
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.gen_index(i + 1);
            slice.swap(i, j);
        }
    }

    /// Draw `count` distinct elements of `pool`, uniformly without
    /// replacement, in draw order.
    ///
    /// Panics if `count > pool.len()`.
    fn pick_distinct<T: Copy>(&mut self, pool: &[T], count: usize) -> Vec<T> {
        assert!(count <= pool.len(), "Cannot pick more elements than the pool holds");
        let mut scratch = pool.to_vec();
        for i in 0..count {
            let j = i + self.gen_index(scratch.len() - i);
            scratch.swap(i, j);
        }
        scratch.truncate(count);
        scratch
    }
}

/// Deterministic production RNG.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// The chosen seed is kept so the round can be reported and replayed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }
}

impl RandomSource for GameRng {
    fn gen_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }

    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    fn pick_distinct<T: Copy>(&mut self, pool: &[T], count: usize) -> Vec<T> {
        assert!(count <= pool.len(), "Cannot pick more elements than the pool holds");
        rand::seq::index::sample(&mut self.inner, pool.len(), count)
            .into_iter()
            .map(|i| pool[i])
            .collect()
    }
}

/// Replays a fixed list of choices.
///
/// Each `gen_index(upper)` pops the next scripted value and reduces it
/// modulo `upper`. Once the script runs out every draw returns 0.
///
/// ```
/// use safe_cracker::core::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new([2, 7]);
/// assert_eq!(rng.gen_index(5), 2);
/// assert_eq!(rng.gen_index(5), 2); // 7 % 5
/// assert_eq!(rng.gen_index(5), 0); // exhausted
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    script: VecDeque<usize>,
}

impl ScriptedRng {
    /// Create a source that returns `choices` in order.
    pub fn new(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: choices.into_iter().collect(),
        }
    }

    /// Append more choices to the end of the script.
    pub fn push(&mut self, choice: usize) {
        self.script.push_back(choice);
    }

    /// Scripted choices not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedRng {
    fn gen_index(&mut self, upper: usize) -> usize {
        self.script.pop_front().map_or(0, |choice| choice % upper)
    }
}
