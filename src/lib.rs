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

//! Weighted sampling with composition–rejection and dyadic (power-of-two) buckets.
//!
//! This crate implements the sampler from:  
//! G. St-Onge, J.-G. Young, L. Hébert-Dufresne, L. J. Dubé,  
//! *Efficient sampling of spreading processes on complex networks using a composition and rejection algorithm*,  
//! **Comput. Phys. Commun.** 240 (2019) 30–37. DOI: [10.1016/j.cpc.2019.02.008](https://doi.org/10.1016/j.cpc.2019.02.008)
//!
//! Let $W = \dfrac{w_{\max}}{w_{\min}}$. Items are partitioned into
//! $G = \lceil \log_2 W \rceil + 1$ buckets. A bucket is chosen by scanning
//! the $G$ bucket sums, and the subsequent acceptance–rejection step runs in
//! $\mathcal{O}(1)$ expected time with a hard cap on trials.
//!
//! $G$ depends only on the configured weight range, never on the number of
//! stored items, so insert, erase, reweight and sample are all
//! $\mathcal{O}(1)$ amortized for a fixed range.
//!
//! - [SamplableSet] is generic over any `Clone + Eq + Hash` key.
//! - [KeyedSamplableSet] holds [ElementKey]s (integer, edge triple, or label)
//!   and fixes the key variant once, at construction or first insertion.
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade and never
//! installs a logger itself.

mod bucket;
pub mod config;
pub mod dynamic;
pub mod error;
mod index;
pub mod key;
mod propensity;
pub mod random;
pub mod samplable_set;
mod table;

pub use config::{SamplerConfig, DEFAULT_MAX_REJECTION_TRIALS};
pub use dynamic::KeyedSamplableSet;
pub use error::{SSetError, SSetResult};
pub use key::{ElementKey, KeyKind};
pub use random::RandomSource;
pub use samplable_set::{SamplableSet, SeqSamplableIter};
