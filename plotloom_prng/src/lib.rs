// Seedable pseudo-random source for the reordering search.
//
// xoshiro256++ (Blackman & Vigna, 2019) expanded from a single `u64` seed via
// SplitMix64. The annealer in `plotloom::sa` draws every index pick and every
// Metropolis acceptance roll from one `SearchRng` that the caller passes in,
// so a run is reproducible from its seed and tests never touch global state.
//
// Unseeded runs go through `SearchRng::from_entropy()`, which mixes the
// process-random `RandomState` hasher keys with the wall clock. That is the
// only non-deterministic path in this crate.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

/// xoshiro256++ state. Cloning forks the stream: both copies produce the
/// same sequence from that point on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRng {
    s: [u64; 4],
}

impl SearchRng {
    /// Seed a generator. Equal seeds give equal streams on every platform.
    pub fn new(seed: u64) -> Self {
        let mut sm = seed;
        Self {
            s: [
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
                splitmix64(&mut sm),
            ],
        }
    }

    /// Seed from process randomness and the current time.
    pub fn from_entropy() -> Self {
        let mut hasher = RandomState::new().build_hasher();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        hasher.write_u128(nanos);
        Self::new(hasher.finish())
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.s[0].wrapping_add(self.s[3]))
            .rotate_left(23)
            .wrapping_add(self.s[0]);

        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    /// Uniform `f64` in [0, 1), built from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `[low, high)` without modulo bias.
    ///
    /// Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "range_u64: low must be less than high");
        let range = high - low;
        if range.is_power_of_two() {
            return low + (self.next_u64() & (range - 1));
        }
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return low + (r % range);
            }
        }
    }

    /// Uniform `usize` in `[low, high)`. Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    /// Two distinct indices drawn uniformly from `0..n`, in draw order.
    ///
    /// Panics if `n < 2`.
    pub fn pick_two_distinct(&mut self, n: usize) -> (usize, usize) {
        assert!(n >= 2, "pick_two_distinct: need at least two indices");
        let i = self.range_usize(0, n);
        let mut j = self.range_usize(0, n - 1);
        if j >= i {
            j += 1;
        }
        (i, j)
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
