//! Injectable randomness for per-row jitter. Production code seeds from
//! entropy; tests swap in a seeded `Rng` or a fixed `SequenceJitter`.
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

/// Source of row/column start offsets.
pub trait JitterSource {
    /// Uniform integer in `[0, bound)`. `bound` is always > 0.
    fn jitter(&mut self, bound: usize) -> usize;
}

#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Simple sequential RNG. Same seed, same jitter stream.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from the process hasher keys, which the stdlib randomizes per process.
    pub fn from_entropy() -> Self {
        let mut h = RandomState::new().build_hasher();
        h.write_u64(0x6C69_6E65_6669_656C);
        Self::new(h.finish())
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = splitmix64(self.state);
        self.state
    }

    /// Uniform in `[0, max)`, rejection sampled to avoid modulo bias.
    pub fn range_usize(&mut self, max: usize) -> usize {
        assert!(max > 0, "range_usize: max must be positive");
        let range = max as u64;
        if range.is_power_of_two() {
            return (self.next_u64() & (range - 1)) as usize;
        }
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u64();
            if r >= threshold {
                return (r % range) as usize;
            }
        }
    }
}

impl JitterSource for Rng {
    fn jitter(&mut self, bound: usize) -> usize {
        self.range_usize(bound)
    }
}

/// Replays a fixed list of offsets, cycling when exhausted. Each value is
/// reduced modulo the requested bound so it always lands in range.
#[derive(Clone, Debug)]
pub struct SequenceJitter {
    values: Vec<usize>,
    pos: usize,
}

impl SequenceJitter {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, pos: 0 }
    }

    /// Always start every row/column at offset 0.
    pub fn zero() -> Self {
        Self::new(vec![0])
    }
}

impl JitterSource for SequenceJitter {
    fn jitter(&mut self, bound: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v % bound
    }
}
