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

use std::fmt;
use std::hash::Hash;

use log::{debug, trace};
use rand::Rng;

use crate::bucket::Bucket;
use crate::config::SamplerConfig;
use crate::error::{SSetError, SSetResult};
use crate::index::KeyIndex;
use crate::propensity::PropensityHash;
use crate::random::RandomSource;
use crate::table::BucketTable;

/// A weighted set that supports sampling with probability proportional to
/// item weights, with $\mathcal{O}(1)$ amortized insert, erase and reweight.
///
/// This implements the composition–rejection sampler of
/// St-Onge et al., *Comput. Phys. Commun.* 240 (2019) 30-37
/// (DOI: [10.1016/j.cpc.2019.02.008](https://doi.org/10.1016/j.cpc.2019.02.008)),
/// specialized with **dyadic (power-of-two) buckets**.
///
/// # Model
/// Store pairs $(x_i, w_i)$ with $w_{\min} \le w_i \le w_{\max}$.
/// Items are partitioned by weight scale into buckets
/// $B_k = \[i \mid 2^k w_{\min} \le w_i < 2^{k+1} w_{\min} \]$,
/// $k = 0,\dots,G-1$ with $G = \lceil \log_2 W \rceil + 1$ and
/// $W = w_{\max} / w_{\min}$. Each bucket keeps its running sum $S_k$.
///
/// # Sampling (composition–rejection)
/// 1. **Composition:** scan the non-empty buckets and pick $k$ with
///    probability $S_k / S$. There are at most $G$ buckets regardless of how
///    many items are stored.
/// 2. **Rejection:** pick a slot uniformly within $B_k$ and accept it with
///    probability $w_j / m_k$, $m_k = \min(2^{k+1} w_{\min}, w_{\max})$.
///    Since $w_j > m_k / 2$, at most two trials are expected. The number of
///    trials is capped (see [SamplerConfig::max_rejection_trials]); past the
///    cap the last candidate is accepted.
///
/// # Failure atomicity
/// Every fallible method validates before mutating. An `Err` leaves size,
/// total weight and contents untouched.
///
/// # Examples
/// ```
/// use samplable_set_cr::SamplableSet;
///
/// let mut s = SamplableSet::<u64>::with_seed(1.0, 8.0, 42).unwrap();
/// s.insert(&1, 3.0).unwrap();
/// s.insert(&2, 5.0).unwrap();
///
/// let (k, w) = s.sample().unwrap();
/// assert!(k == 1 || k == 2);
/// assert_eq!(s.count(&k), Some(w));
///
/// // Deterministic iteration over stored items
/// for (k, w) in &s {
///     assert!(*k == 1 || *k == 2);
///     assert!(w >= 3.0);
/// }
///
/// // Draw without replacement until exhausted
/// let draws = s.sample_many(3, false);
/// assert_eq!(draws.len(), 3);
/// assert!(draws[2].is_none());
/// assert!(s.is_empty());
/// ```
#[derive(Debug)]
pub struct SamplableSet<K>
where
    K: Clone + Eq + Hash,
{
    min_weight_: f64,
    max_weight_: f64,
    max_trials_: usize,

    rng_: RandomSource,

    table_: BucketTable<K>,
    index_: KeyIndex<K>,
}

impl<K> SamplableSet<K>
where
    K: Clone + Eq + Hash,
{
    /// Creates a new, empty [SamplableSet] seeded from OS entropy.
    ///
    /// Returns [SSetError::InvalidBounds] unless
    /// $0 < w_{\min} < w_{\max} < \infty$.
    pub fn new(min_weight: f64, max_weight: f64) -> SSetResult<Self, K> {
        Self::with_config(SamplerConfig::new(min_weight, max_weight))
    }

    /// Creates a new, empty [SamplableSet] whose draws are reproducible.
    pub fn with_seed(min_weight: f64, max_weight: f64, seed: u64) -> SSetResult<Self, K> {
        Self::with_config(SamplerConfig::new(min_weight, max_weight).with_seed(seed))
    }

    pub fn with_config(config: SamplerConfig) -> SSetResult<Self, K> {
        config.validate::<K>()?;

        let hash = PropensityHash::new(config.min_weight, config.max_weight);
        let table = BucketTable::new(hash);
        let rng = match config.seed {
            Some(seed) => RandomSource::from_seed(seed),
            None => RandomSource::from_entropy(),
        };

        debug!(
            "new SamplableSet: weights [{}, {}], {} buckets, seed {:?}",
            config.min_weight,
            config.max_weight,
            table.num_buckets(),
            config.seed
        );

        Ok(SamplableSet {
            min_weight_: config.min_weight,
            max_weight_: config.max_weight,
            max_trials_: config.max_rejection_trials,
            rng_: rng,
            table_: table,
            index_: KeyIndex::default(),
        })
    }

    /// Returns the number of elements in the set.
    #[inline]
    pub fn size(&self) -> usize {
        debug_assert_eq!(self.table_.len(), self.index_.len());
        self.table_.len()
    }

    /// Returns true if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table_.is_empty()
    }

    /// Returns the total weight of the set.
    #[inline]
    pub fn total_weight(&self) -> f64 {
        self.table_.total_weight()
    }

    pub fn min_weight(&self) -> f64 {
        self.min_weight_
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight_
    }

    pub fn num_buckets(&self) -> usize {
        self.table_.num_buckets()
    }

    /// Checks if the element exists in the set.
    #[inline]
    pub fn exists(&self, element: &K) -> bool {
        self.index_.contains(element)
    }

    /// Current weight of `element`, or `None` if absent. Never fails.
    #[inline]
    pub fn count(&self, element: &K) -> Option<f64> {
        let pos = self.index_.lookup(element)?;
        self.table_.entry(pos).map(|e| e.weight)
    }

    /// Returns the weight of the given element.
    ///
    /// Returns [SSetError::KeyNotFound] if the element is not found;
    /// use [SamplableSet::count] for a non-failing lookup.
    pub fn get_weight(&self, element: &K) -> SSetResult<f64, K> {
        self.count(element)
            .ok_or_else(|| SSetError::KeyNotFound(element.clone()))
    }

    /// Inserts a new element.
    ///
    /// Returns [SSetError::WeightOutOfRange] if the weight is invalid and
    /// [SSetError::DuplicateKey] if the element is already present.
    pub fn insert(&mut self, element: &K, weight: f64) -> SSetResult<(), K> {
        self.weight_check(weight)?;
        if self.index_.contains(element) {
            return Err(SSetError::DuplicateKey(element.clone()));
        }

        self.table_.insert(element.clone(), weight, &mut self.index_);
        Ok(())
    }

    /// Inserts `element`, or reweights it if already present.
    ///
    /// Returns `true` if the element was newly inserted.
    pub fn insert_or_update(&mut self, element: &K, weight: f64) -> SSetResult<bool, K> {
        self.weight_check(weight)?;
        match self.index_.lookup(element) {
            Some(pos) => {
                self.table_.reweight(pos, weight, &mut self.index_);
                Ok(false)
            }
            None => {
                self.table_.insert(element.clone(), weight, &mut self.index_);
                Ok(true)
            }
        }
    }

    /// Sets the weight of an existing element.
    ///
    /// If the new weight falls in the same bucket the entry is updated in
    /// place, otherwise it migrates to its new bucket.
    ///
    /// Returns [SSetError::WeightOutOfRange] if the weight is invalid and
    /// [SSetError::KeyNotFound] if the element is absent.
    pub fn set_weight(&mut self, element: &K, weight: f64) -> SSetResult<(), K> {
        self.weight_check(weight)?;
        let pos = self
            .index_
            .lookup(element)
            .ok_or_else(|| SSetError::KeyNotFound(element.clone()))?;

        let (_, new_pos) = self.table_.reweight(pos, weight, &mut self.index_);
        if new_pos.bucket != pos.bucket {
            trace!("weight {weight} moved entry from bucket {} to {}", pos.bucket, new_pos.bucket);
        }
        Ok(())
    }

    /// Erases an element and returns the weight it had.
    ///
    /// Returns [SSetError::KeyNotFound] if the element is absent.
    pub fn erase(&mut self, element: &K) -> SSetResult<f64, K> {
        let pos = self
            .index_
            .lookup(element)
            .ok_or_else(|| SSetError::KeyNotFound(element.clone()))?;
        Ok(self.table_.remove(pos, &mut self.index_).weight)
    }

    /// Reseeds the set's own random source.
    pub fn seed(&mut self, seed: u64) {
        self.rng_.reseed(seed);
    }

    /// Draw one `(element, weight)` proportional to weight (with replacement).
    ///
    /// Uses the set's **internal RNG**. Returns `None` if the set is empty.
    /// Contents are never modified.
    pub fn sample(&mut self) -> Option<(K, f64)> {
        let pos = self.table_.sample(&mut self.rng_, self.max_trials_)?;
        self.table_.entry(pos).map(|e| (e.key.clone(), e.weight))
    }

    /// Same as [SamplableSet::sample] but draws from a **caller-supplied RNG**.
    pub fn sample_with<R>(&self, generator: &mut R) -> Option<(K, f64)>
    where
        R: Rng + ?Sized,
    {
        let pos = self.table_.sample(generator, self.max_trials_)?;
        self.table_.entry(pos).map(|e| (e.key.clone(), e.weight))
    }

    /// Draw one `(element, weight)` and remove it (without replacement).
    ///
    /// Returns `None`, removing nothing, if the set is empty.
    pub fn sample_destructive(&mut self) -> Option<(K, f64)> {
        let pos = self.table_.sample(&mut self.rng_, self.max_trials_)?;
        let entry = self.table_.remove(pos, &mut self.index_);
        Some((entry.key, entry.weight))
    }

    /// Same as [SamplableSet::sample_destructive] with a caller-supplied RNG.
    pub fn sample_destructive_with<R>(&mut self, generator: &mut R) -> Option<(K, f64)>
    where
        R: Rng + ?Sized,
    {
        let pos = self.table_.sample(generator, self.max_trials_)?;
        let entry = self.table_.remove(pos, &mut self.index_);
        Some((entry.key, entry.weight))
    }

    /// Draws exactly `n` results.
    ///
    /// With `replace`, each result is an independent [SamplableSet::sample].
    /// Without, each is a [SamplableSet::sample_destructive]; once the set
    /// runs dry the remaining results are `None`.
    pub fn sample_many(&mut self, n: usize, replace: bool) -> Vec<Option<(K, f64)>> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let draw = if replace {
                self.sample()
            } else {
                self.sample_destructive()
            };
            out.push(draw);
        }
        out
    }

    /// Deep copy whose random source is forked from this one.
    ///
    /// The fork advances this set's stream by one draw, so the copy is
    /// reproducible for a seeded parent yet never shares generator state.
    pub fn copy(&mut self) -> Self {
        SamplableSet {
            min_weight_: self.min_weight_,
            max_weight_: self.max_weight_,
            max_trials_: self.max_trials_,
            rng_: self.rng_.fork(),
            table_: self.table_.clone(),
            index_: self.index_.clone(),
        }
    }

    /// Inserts or reweights every pair. All weights are checked first, so
    /// on error nothing has been applied.
    pub fn extend_pairs<I>(&mut self, pairs: I) -> SSetResult<(), K>
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let pairs: Vec<(K, f64)> = pairs.into_iter().collect();
        for (_, w) in &pairs {
            self.weight_check(*w)?;
        }
        for (k, w) in &pairs {
            self.insert_or_update(k, *w)?;
        }
        Ok(())
    }

    /// Clears all elements from the set, keeping bounds and buckets.
    pub fn clear(&mut self) {
        self.table_.clear();
        self.index_.clear();
    }

    /// Iterates over stored `(element, weight)` pairs in bucket order.
    pub fn iter(&self) -> SeqSamplableIter<'_, K> {
        self.into_iter()
    }

    /// Checks that the weight is within the allowed bounds.
    ///
    /// Returns SSetError::WeightOutOfRange if the weight is invalid,
    /// including NaN.
    fn weight_check(&self, weight: f64) -> SSetResult<(), K> {
        if weight >= self.min_weight_ && weight <= self.max_weight_ {
            Ok(())
        } else {
            Err(SSetError::WeightOutOfRange {
                w: weight,
                min: self.min_weight_,
                max: self.max_weight_,
            })
        }
    }
}

impl<K> Clone for SamplableSet<K>
where
    K: Clone + Eq + Hash,
{
    /// Deep copy with a freshly entropy-seeded random source.
    /// Use [SamplableSet::copy] for a reproducible fork.
    fn clone(&self) -> Self {
        SamplableSet {
            min_weight_: self.min_weight_,
            max_weight_: self.max_weight_,
            max_trials_: self.max_trials_,
            rng_: RandomSource::from_entropy(),
            table_: self.table_.clone(),
            index_: self.index_.clone(),
        }
    }
}

impl<K> fmt::Display for SamplableSet<K>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        write!(f, "SamplableSet of {} element{}", n, if n == 1 { "" } else { "s" })
    }
}

impl<'a, K> IntoIterator for &'a SamplableSet<K>
where
    K: Clone + Eq + Hash,
{
    type Item = (&'a K, f64);
    type IntoIter = SeqSamplableIter<'a, K>;

    /// Returns a sequential iterator over the items in the set.
    fn into_iter(self) -> Self::IntoIter {
        SeqSamplableIter {
            buckets: self.table_.buckets(),
            cur_bucket: 0,
            cur_idx: 0,
            remaining: self.size(),
        }
    }
}

/// A sequential iterator over the items in the set.
pub struct SeqSamplableIter<'a, K> {
    buckets: &'a [Bucket<K>],
    cur_bucket: usize,
    cur_idx: usize,
    remaining: usize,
}

impl<'a, K> Iterator for SeqSamplableIter<'a, K> {
    type Item = (&'a K, f64);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(bucket) = self.buckets.get(self.cur_bucket) {
            if let Some(e) = bucket.get(self.cur_idx) {
                self.cur_idx += 1;
                self.remaining -= 1;
                return Some((&e.key, e.weight));
            }
            // move to next bucket
            self.cur_bucket += 1;
            self.cur_idx = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for SeqSamplableIter<'_, K> {}
