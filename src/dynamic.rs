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

//! A [SamplableSet] over [ElementKey] whose key variant is fixed once.
//!
//! The variant is either given at construction ([KeyedSamplableSet::with_kind])
//! or taken from the first successful insertion into an untyped set. Keys of
//! any other variant are then rejected with [SSetError::KeyKindMismatch].

use crate::config::SamplerConfig;
use crate::error::{SSetError, SSetResult};
use crate::key::{ElementKey, KeyKind};
use crate::samplable_set::{SamplableSet, SeqSamplableIter};

pub type KeyedResult<T> = SSetResult<T, ElementKey>;

#[derive(Debug, Clone)]
pub struct KeyedSamplableSet {
    kind_: Option<KeyKind>,
    inner: SamplableSet<ElementKey>,
}

impl KeyedSamplableSet {
    /// Untyped set; the first inserted key fixes the kind.
    pub fn new(min_weight: f64, max_weight: f64) -> KeyedResult<Self> {
        Self::with_config(SamplerConfig::new(min_weight, max_weight), None)
    }

    /// Set that only ever accepts keys of `kind`.
    pub fn with_kind(min_weight: f64, max_weight: f64, kind: KeyKind) -> KeyedResult<Self> {
        Self::with_config(SamplerConfig::new(min_weight, max_weight), Some(kind))
    }

    pub fn with_config(config: SamplerConfig, kind: Option<KeyKind>) -> KeyedResult<Self> {
        Ok(KeyedSamplableSet {
            kind_: kind,
            inner: SamplableSet::with_config(config)?,
        })
    }

    /// Bulk construction. The kind comes from the first key; a later key of
    /// another kind fails the whole call.
    ///
    /// ```
    /// use samplable_set_cr::{ElementKey, KeyKind, KeyedSamplableSet};
    ///
    /// let s = KeyedSamplableSet::from_pairs(
    ///     1.0,
    ///     100.0,
    ///     Some(7),
    ///     vec![(ElementKey::Int(3), 33.3), (ElementKey::Int(6), 66.6)],
    /// )
    /// .unwrap();
    /// assert_eq!(s.kind(), Some(KeyKind::Int));
    /// assert!(s.contains(&ElementKey::Int(3)));
    /// ```
    pub fn from_pairs<I, Q>(
        min_weight: f64,
        max_weight: f64,
        seed: Option<u64>,
        pairs: I,
    ) -> KeyedResult<Self>
    where
        I: IntoIterator<Item = (Q, f64)>,
        Q: Into<ElementKey>,
    {
        let mut config = SamplerConfig::new(min_weight, max_weight);
        config.seed = seed;
        let mut set = Self::with_config(config, None)?;
        set.extend_pairs(pairs)?;
        Ok(set)
    }

    /// The fixed key kind, `None` while an untyped set is still empty.
    pub fn kind(&self) -> Option<KeyKind> {
        self.kind_
    }

    pub fn inner(&self) -> &SamplableSet<ElementKey> {
        &self.inner
    }

    fn check_kind(&self, key: &ElementKey) -> KeyedResult<()> {
        match self.kind_ {
            Some(expected) if expected != key.kind() => Err(SSetError::KeyKindMismatch {
                expected,
                found: key.kind(),
            }),
            _ => Ok(()),
        }
    }

    #[inline]
    fn same_kind(&self, key: &ElementKey) -> bool {
        self.kind_ == Some(key.kind())
    }

    pub fn size(&self) -> usize {
        self.inner.size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.inner.total_weight()
    }

    /// Current weight, or `None` if absent or of the wrong kind.
    pub fn count(&self, key: &ElementKey) -> Option<f64> {
        if !self.same_kind(key) {
            return None;
        }
        self.inner.count(key)
    }

    pub fn contains(&self, key: &ElementKey) -> bool {
        self.count(key).is_some()
    }

    pub fn get_weight(&self, key: &ElementKey) -> KeyedResult<f64> {
        self.check_kind(key)?;
        self.inner.get_weight(key)
    }

    pub fn insert(&mut self, key: &ElementKey, weight: f64) -> KeyedResult<()> {
        self.check_kind(key)?;
        self.inner.insert(key, weight)?;
        self.kind_.get_or_insert(key.kind());
        Ok(())
    }

    pub fn insert_or_update(&mut self, key: &ElementKey, weight: f64) -> KeyedResult<bool> {
        self.check_kind(key)?;
        let inserted = self.inner.insert_or_update(key, weight)?;
        self.kind_.get_or_insert(key.kind());
        Ok(inserted)
    }

    pub fn set_weight(&mut self, key: &ElementKey, weight: f64) -> KeyedResult<()> {
        self.check_kind(key)?;
        self.inner.set_weight(key, weight)
    }

    pub fn erase(&mut self, key: &ElementKey) -> KeyedResult<f64> {
        self.check_kind(key)?;
        self.inner.erase(key)
    }

    /// Bulk upsert. Kinds and weights are all checked before anything is
    /// applied; the first key fixes the kind of an untyped set.
    pub fn extend_pairs<I, Q>(&mut self, pairs: I) -> KeyedResult<()>
    where
        I: IntoIterator<Item = (Q, f64)>,
        Q: Into<ElementKey>,
    {
        let pairs: Vec<(ElementKey, f64)> = pairs.into_iter().map(|(k, w)| (k.into(), w)).collect();

        let expected = self.kind_.or_else(|| pairs.first().map(|(k, _)| k.kind()));
        if let Some(expected) = expected {
            if let Some((k, _)) = pairs.iter().find(|(k, _)| k.kind() != expected) {
                return Err(SSetError::KeyKindMismatch {
                    expected,
                    found: k.kind(),
                });
            }
        }

        self.inner.extend_pairs(pairs)?;
        if !self.inner.is_empty() {
            self.kind_ = expected;
        }
        Ok(())
    }

    pub fn seed(&mut self, seed: u64) {
        self.inner.seed(seed)
    }

    pub fn sample(&mut self) -> Option<(ElementKey, f64)> {
        self.inner.sample()
    }

    pub fn sample_destructive(&mut self) -> Option<(ElementKey, f64)> {
        self.inner.sample_destructive()
    }

    pub fn sample_many(&mut self, n: usize, replace: bool) -> Vec<Option<(ElementKey, f64)>> {
        self.inner.sample_many(n, replace)
    }

    pub fn copy(&mut self) -> Self {
        KeyedSamplableSet {
            kind_: self.kind_,
            inner: self.inner.copy(),
        }
    }

    /// Removes every element; a fixed kind stays fixed.
    pub fn clear(&mut self) {
        self.inner.clear()
    }

    pub fn iter(&self) -> SeqSamplableIter<'_, ElementKey> {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> ElementKey {
        ElementKey::from(s)
    }

    #[test]
    fn untyped_set_takes_kind_from_first_insert() {
        let mut s = KeyedSamplableSet::new(1.0, 100.0).unwrap();
        assert_eq!(s.kind(), None);

        s.insert(&label("a"), 2.0).unwrap();
        assert_eq!(s.kind(), Some(KeyKind::Label));
        assert_eq!(s.size(), 1);
        assert_eq!(s.count(&label("a")), Some(2.0));

        let err = s.insert(&ElementKey::Int(1), 2.0).unwrap_err();
        assert_eq!(
            err,
            SSetError::KeyKindMismatch { expected: KeyKind::Label, found: KeyKind::Int }
        );
        assert_eq!(s.size(), 1);
    }

    #[test]
    fn failed_first_insert_leaves_set_untyped() {
        let mut s = KeyedSamplableSet::new(1.0, 10.0).unwrap();
        assert!(s.insert(&ElementKey::Int(1), 50.0).is_err());
        assert_eq!(s.kind(), None);
        s.insert(&ElementKey::Edge(0, 1, 0), 5.0).unwrap();
        assert_eq!(s.kind(), Some(KeyKind::Edge));
    }

    #[test]
    fn explicit_kind_is_enforced() {
        let mut s = KeyedSamplableSet::with_kind(1.0, 10.0, KeyKind::Edge).unwrap();
        assert!(matches!(
            s.insert(&ElementKey::Int(1), 2.0),
            Err(SSetError::KeyKindMismatch { .. })
        ));
        s.insert(&ElementKey::Edge(1, 2, 0), 2.0).unwrap();
        assert!(matches!(
            s.erase(&ElementKey::Int(1)),
            Err(SSetError::KeyKindMismatch { .. })
        ));
        assert!(!s.contains(&ElementKey::Int(1)));
        assert_eq!(s.count(&ElementKey::Int(1)), None);
    }

    #[test]
    fn from_pairs_mixed_kinds_fail() {
        let pairs = vec![(label("a"), 2.0), (ElementKey::Int(2), 3.0)];
        let err = KeyedSamplableSet::from_pairs(1.0, 10.0, None, pairs).unwrap_err();
        assert!(matches!(err, SSetError::KeyKindMismatch { expected: KeyKind::Label, .. }));
    }

    #[test]
    fn from_pairs_accepts_plain_values() {
        let s = KeyedSamplableSet::from_pairs(1.0, 100.0, Some(1), vec![("a", 33.3), ("b", 66.6)])
            .unwrap();
        assert!(s.contains(&label("a")) && s.contains(&label("b")));
        assert!((s.total_weight() - 99.9).abs() < 1e-9);
    }

    #[test]
    fn dict_style_flow() {
        let mut s = KeyedSamplableSet::new(1.0, 10.0).unwrap();
        s.insert_or_update(&label("a"), 2.0).unwrap();
        s.insert_or_update(&label("a"), 3.0).unwrap();
        assert_eq!(s.get_weight(&label("a")), Ok(3.0));
        assert_eq!(s.size(), 1);
        assert_eq!(s.total_weight(), 3.0);
        assert!(s.get_weight(&label("b")).is_err());
        assert_eq!(s.count(&label("b")), None);

        s.erase(&label("a")).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn clear_keeps_kind_and_copy_keeps_kind() {
        let mut s = KeyedSamplableSet::new(1.0, 10.0).unwrap();
        s.insert(&ElementKey::Int(4), 2.0).unwrap();
        let mut c = s.copy();
        s.clear();
        assert_eq!(s.kind(), Some(KeyKind::Int));
        assert!(s.insert(&label("x"), 2.0).is_err());
        assert_eq!(c.kind(), Some(KeyKind::Int));
        assert_eq!(c.sample(), Some((ElementKey::Int(4), 2.0)));
    }

    #[test]
    fn sampling_edges() {
        let mut s = KeyedSamplableSet::from_pairs(
            1.0,
            10.0,
            Some(3),
            vec![((0u64, 1u64, 0u64), 1.0), ((1, 2, 0), 9.0)],
        )
        .unwrap();
        assert_eq!(s.kind(), Some(KeyKind::Edge));
        let draws = s.sample_many(3, false);
        assert_eq!(draws.iter().filter(|d| d.is_some()).count(), 2);
        assert!(draws[2].is_none());
        assert_eq!(s.iter().count(), 0);
    }
}
