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

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Where an entry lives inside the [BucketTable](crate::table::BucketTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub bucket: usize,
    pub slot: usize,
}

/// Key to [Position] map; one record per live key.
#[derive(Debug, Clone)]
pub struct KeyIndex<K> {
    pos_map_: HashMap<K, Position>,
}

impl<K> Default for KeyIndex<K> {
    fn default() -> Self {
        KeyIndex {
            pos_map_: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> KeyIndex<K> {
    #[inline]
    pub fn lookup<Q>(&self, key: &Q) -> Option<Position>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.pos_map_.get(key).copied()
    }

    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.pos_map_.contains_key(key)
    }

    pub fn insert(&mut self, key: K, pos: Position) {
        self.pos_map_.insert(key, pos);
    }

    /// Updates the record of a key that is already indexed.
    /// Unknown keys are ignored.
    pub fn relocate<Q>(&mut self, key: &Q, pos: Position)
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        if let Some(p) = self.pos_map_.get_mut(key) {
            *p = pos;
        }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<Position>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.pos_map_.remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pos_map_.len()
    }

    pub fn clear(&mut self) {
        self.pos_map_.clear();
    }
}
