// MIT License
//
// Copyright (c) 2025 Jai Veilleux
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32 as RNGType;

/// Seedable uniform generator owned by exactly one set.
///
/// Uniform reals and bounded integers come through [rand::Rng], which is
/// implemented for any [RngCore].
///
/// Wraps a PCG32 stream. It is never shared: [RandomSource::fork] hands out an
/// independent generator seeded from this one's output.
#[derive(Debug)]
pub struct RandomSource {
    rng_: RNGType,
}

impl RandomSource {
    pub fn from_seed(seed: u64) -> Self {
        RandomSource {
            rng_: RNGType::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        RandomSource {
            rng_: RNGType::from_os_rng(),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng_ = RNGType::seed_from_u64(seed);
    }

    /// Derives a new source from the next value of this stream.
    /// Advances `self`; the two never share state afterwards.
    pub fn fork(&mut self) -> Self {
        RandomSource::from_seed(self.rng_.next_u64())
    }
}

impl RngCore for RandomSource {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.rng_.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.rng_.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng_.fill_bytes(dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn same_seed_same_stream() {
        let mut a = RandomSource::from_seed(42);
        let mut b = RandomSource::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.random::<f64>(), b.random::<f64>());
        }
    }

    #[test]
    fn reseed_restarts_stream() {
        let mut a = RandomSource::from_seed(3);
        let first: Vec<f64> = (0..5).map(|_| a.random()).collect();
        a.reseed(3);
        let again: Vec<f64> = (0..5).map(|_| a.random()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn values_stay_in_range() {
        let mut r = RandomSource::from_seed(1);
        for _ in 0..10_000 {
            let u: f64 = r.random();
            assert!((0.0..1.0).contains(&u));
            assert!(r.random_range(0..7usize) < 7);
        }
        assert_eq!(r.random_range(0..1usize), 0);
    }

    #[test]
    fn fork_diverges_from_parent() {
        let mut parent = RandomSource::from_seed(11);
        let mut child = parent.fork();
        let p: Vec<u64> = (0..8).map(|_| parent.next_u64()).collect();
        let c: Vec<u64> = (0..8).map(|_| child.next_u64()).collect();
        assert_ne!(p, c);
    }

    #[test]
    fn fork_is_deterministic() {
        let mut a = RandomSource::from_seed(5);
        let mut b = RandomSource::from_seed(5);
        let mut fa = a.fork();
        let mut fb = b.fork();
        assert_eq!(fa.next_u64(), fb.next_u64());
    }
}
