//! Deterministic random source for minigame shuffles
//!
//! xorshift64, seeded explicitly so a shuffled deck or board can be replayed
//! in tests and bug reports.

use serde::{Deserialize, Serialize};

/// Seeded xorshift64 generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleRng {
    state: u64,
}

impl ShuffleRng {
    /// Create a generator from a seed. A zero seed is remapped since
    /// xorshift never leaves the all-zero state.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn below(&mut self, len: usize) -> usize {
        (self.next_u64() % len as u64) as usize
    }

    /// Fisher-Yates shuffle in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }

    /// Pick one element, `None` for an empty slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.below(items.len())])
        }
    }

    /// Up to `count` distinct elements in random order
    pub fn sample<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        let mut pool = items.to_vec();
        self.shuffle(&mut pool);
        pool.truncate(count);
        pool
    }
}

impl Default for ShuffleRng {
    fn default() -> Self {
        Self::new(12345)
    }
}
