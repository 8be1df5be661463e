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

use std::hash::Hash;

use log::warn;
use rand::Rng;

use crate::bucket::{Bucket, Entry};
use crate::index::{KeyIndex, Position};
use crate::propensity::PropensityHash;

/// Buckets indexed by dyadic exponent, their running sums and the grand total.
///
/// Every mutation takes the [KeyIndex] so the two never drift apart: the
/// table owns the entries, the index owns their positions.
///
/// The grand total is recomputed from the bucket sums after each mutation
/// rather than accumulated on its own, so it always equals their sum and a
/// weight absorbed by rounding in a huge running total cannot be lost.
#[derive(Debug, Clone)]
pub struct BucketTable<K> {
    hash_: PropensityHash,
    buckets_: Vec<Bucket<K>>,
    total_: f64,
    len_: usize,
}

impl<K> BucketTable<K>
where
    K: Eq + Hash,
{
    pub fn new(hash: PropensityHash) -> Self {
        let buckets = (0..hash.num_buckets()).map(|_| Bucket::default()).collect();
        BucketTable {
            hash_: hash,
            buckets_: buckets,
            total_: 0.0,
            len_: 0,
        }
    }

    #[inline]
    pub fn num_buckets(&self) -> usize {
        self.buckets_.len()
    }

    #[inline]
    pub fn total_weight(&self) -> f64 {
        self.total_
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len_
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len_ == 0
    }

    pub fn buckets(&self) -> &[Bucket<K>] {
        &self.buckets_
    }

    #[inline]
    pub fn entry(&self, pos: Position) -> Option<&Entry<K>> {
        self.buckets_.get(pos.bucket).and_then(|b| b.get(pos.slot))
    }

    /// Appends to the bucket matching `weight` and indexes the key.
    pub fn insert(&mut self, key: K, weight: f64, index: &mut KeyIndex<K>) -> Position
    where
        K: Clone,
    {
        let bucket = self.hash_.bucket_for(weight);
        let slot = self.buckets_[bucket].push(key.clone(), weight);
        self.len_ += 1;
        self.refresh_total();

        let pos = Position { bucket, slot };
        index.insert(key, pos);
        pos
    }

    /// Removes the entry at `pos` and drops its key from the index.
    pub fn remove(&mut self, pos: Position, index: &mut KeyIndex<K>) -> Entry<K> {
        let entry = self.detach(pos, index);
        index.remove(&entry.key);
        entry
    }

    /// Changes the weight at `pos`, moving the entry if its bucket changes.
    /// Returns the old weight and the new position.
    pub fn reweight(&mut self, pos: Position, weight: f64, index: &mut KeyIndex<K>) -> (f64, Position) {
        let target = self.hash_.bucket_for(weight);
        if target == pos.bucket {
            let old = self.buckets_[pos.bucket].set_weight(pos.slot, weight);
            self.refresh_total();
            return (old, pos);
        }

        let Entry { key, weight: old } = self.detach(pos, index);
        let slot = self.buckets_[target].push(key, weight);
        self.len_ += 1;
        self.refresh_total();

        let new_pos = Position { bucket: target, slot };
        if let Some(moved) = self.buckets_[target].get(slot) {
            index.relocate(&moved.key, new_pos);
        }
        (old, new_pos)
    }

    /// Pulls the entry out of its bucket and repairs the slot of the entry
    /// swapped into its place. The removed key stays in the index.
    fn detach(&mut self, pos: Position, index: &mut KeyIndex<K>) -> Entry<K> {
        let bucket = &mut self.buckets_[pos.bucket];
        let entry = bucket.swap_remove(pos.slot);
        if let Some(moved) = bucket.get(pos.slot) {
            index.relocate(&moved.key, pos);
        }

        self.len_ -= 1;
        self.refresh_total();
        entry
    }

    /// Sums the bucket sums in scan order, matching the accumulation in
    /// [BucketTable::select_bucket]. At most $G$ additions.
    fn refresh_total(&mut self) {
        self.total_ = if self.len_ == 0 {
            0.0
        } else {
            self.buckets_.iter().map(Bucket::sum).sum()
        };
    }

    /// Composition step: picks a non-empty bucket with probability
    /// proportional to its sum by a linear scan over at most
    /// $\lceil \log_2 (w_{\max}/w_{\min}) \rceil + 1$ buckets.
    pub fn select_bucket<R>(&self, rng: &mut R) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        if self.is_empty() {
            return None;
        }

        let u = rng.random::<f64>() * self.total_;
        let mut cumul = 0.0;
        let mut last_non_empty = None;
        for (idx, bucket) in self.buckets_.iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            cumul += bucket.sum();
            last_non_empty = Some(idx);
            if u <= cumul {
                return Some(idx);
            }
        }
        // rounding left cumul just short of u
        last_non_empty
    }

    /// Rejection step: uniform slot, accepted with probability
    /// `weight / ceiling`. Falls back to the last candidate after
    /// `max_trials` rejections. `bucket` must be non-empty.
    pub fn select_within_bucket<R>(&self, bucket: usize, rng: &mut R, max_trials: usize) -> usize
    where
        R: Rng + ?Sized,
    {
        let candidates = &self.buckets_[bucket];
        let entries = candidates.entries();
        let ceiling = self.hash_.upper_bound(bucket);

        let mut slot = 0;
        for _ in 0..max_trials {
            slot = rng.random_range(0..candidates.len());
            if rng.random::<f64>() * ceiling < entries[slot].weight {
                return slot;
            }
        }

        warn!(
            "rejection cap of {max_trials} trials hit in bucket {bucket} (ceiling {ceiling}); accepting last candidate"
        );
        slot
    }

    /// Full composition-rejection draw.
    pub fn sample<R>(&self, rng: &mut R, max_trials: usize) -> Option<Position>
    where
        R: Rng + ?Sized,
    {
        let bucket = self.select_bucket(rng)?;
        let slot = self.select_within_bucket(bucket, rng, max_trials);
        Some(Position { bucket, slot })
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets_ {
            bucket.clear();
        }
        self.total_ = 0.0;
        self.len_ = 0;
    }

    /// Panics if any bucket or index record disagrees with the entries.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self, index: &KeyIndex<K>)
    where
        K: std::fmt::Debug,
    {
        let mut total = 0.0;
        let mut count = 0;
        for (b, bucket) in self.buckets_.iter().enumerate() {
            let mut sum = 0.0;
            for (slot, e) in bucket.entries().iter().enumerate() {
                assert_eq!(self.hash_.bucket_for(e.weight), b, "{:?} in wrong bucket", e.key);
                assert_eq!(index.lookup(&e.key), Some(Position { bucket: b, slot }));
                sum += e.weight;
            }
            assert!((sum - bucket.sum()).abs() <= 1e-9 * sum.max(1.0), "bucket {b} sum drifted");
            total += sum;
            count += bucket.len();
        }
        assert_eq!(count, self.len_);
        assert_eq!(count, index.len());
        assert!((total - self.total_).abs() <= 1e-9 * total.max(1.0), "total drifted");
    }
}
