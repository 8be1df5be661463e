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

/// One stored `(key, weight)` pair. Its position lives in the
/// [KeyIndex](crate::index::KeyIndex).
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<K> {
    pub key: K,
    pub weight: f64,
}

/// Dense, unordered array of entries sharing one dyadic weight range,
/// plus the running sum of their weights.
#[derive(Debug, Clone)]
pub struct Bucket<K> {
    entries_: Vec<Entry<K>>,
    sum_: f64,
}

impl<K> Default for Bucket<K> {
    fn default() -> Self {
        Bucket {
            entries_: Vec::new(),
            sum_: 0.0,
        }
    }
}

impl<K> Bucket<K> {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries_.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries_.is_empty()
    }

    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum_
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<&Entry<K>> {
        self.entries_.get(slot)
    }

    pub fn entries(&self) -> &[Entry<K>] {
        &self.entries_
    }

    /// Appends and returns the new slot.
    pub fn push(&mut self, key: K, weight: f64) -> usize {
        self.entries_.push(Entry { key, weight });
        self.sum_ += weight;
        self.entries_.len() - 1
    }

    /// Removes `slot` by moving the last entry into it.
    ///
    /// After the call, `self.get(slot)` is the entry that moved (if any),
    /// whose index record must be updated by the caller.
    pub fn swap_remove(&mut self, slot: usize) -> Entry<K> {
        let removed = self.entries_.swap_remove(slot);
        if self.entries_.is_empty() {
            // drop accumulated rounding error
            self.sum_ = 0.0;
        } else {
            self.sum_ -= removed.weight;
        }
        removed
    }

    /// Replaces the weight at `slot` in place and returns the old one.
    pub fn set_weight(&mut self, slot: usize, weight: f64) -> f64 {
        let entry = &mut self.entries_[slot];
        let old = std::mem::replace(&mut entry.weight, weight);
        self.sum_ += weight - old;
        old
    }

    pub fn clear(&mut self) {
        self.entries_.clear();
        self.sum_ = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_tracks_sum_and_slots() {
        let mut b = Bucket::default();
        assert_eq!(b.push('a', 1.5), 0);
        assert_eq!(b.push('b', 1.25), 1);
        assert_eq!(b.len(), 2);
        assert_eq!(b.sum(), 2.75);
    }

    #[test]
    fn swap_remove_compacts() {
        let mut b = Bucket::default();
        b.push('a', 1.0);
        b.push('b', 1.5);
        b.push('c', 1.75);

        let gone = b.swap_remove(0);
        assert_eq!(gone, Entry { key: 'a', weight: 1.0 });
        assert_eq!(b.len(), 2);
        assert_eq!(b.get(0).map(|e| e.key), Some('c'));
        assert_eq!(b.sum(), 3.25);

        // removing the last slot moves nothing
        b.swap_remove(1);
        assert_eq!(b.get(0).map(|e| e.key), Some('c'));
        assert!(b.get(1).is_none());
    }

    #[test]
    fn empty_bucket_sum_is_exactly_zero() {
        let mut b = Bucket::default();
        b.push(1, 0.1);
        b.push(2, 0.2);
        b.swap_remove(0);
        b.swap_remove(0);
        assert!(b.is_empty());
        assert_eq!(b.sum(), 0.0);
    }

    #[test]
    fn set_weight_in_place() {
        let mut b = Bucket::default();
        b.push(1, 2.0);
        b.push(2, 3.0);
        assert_eq!(b.set_weight(1, 3.5), 3.0);
        assert_eq!(b.sum(), 5.5);
        assert_eq!(b.get(1).map(|e| e.weight), Some(3.5));
    }
}
