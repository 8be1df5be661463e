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

/// Maps a weight to its dyadic bucket.
///
/// Bucket $b$ holds weights in $[w_{\min} 2^b, w_{\min} 2^{b+1})$, so the
/// ratio between any two weights sharing a bucket is below 2. The number of
/// buckets is $\lceil \log_2 (w_{\max} / w_{\min}) \rceil + 1$.
#[derive(Debug, Clone)]
pub struct PropensityHash {
    propensity_min_: f64,
    propensity_max_: f64,
    // lower_bounds_[b] = min * 2^b, one extra entry closing the last bucket
    lower_bounds_: Vec<f64>,
}

impl PropensityHash {
    /// Bounds must already be validated by [SamplerConfig::validate](crate::SamplerConfig::validate).
    pub fn new(propensity_min: f64, propensity_max: f64) -> Self {
        debug_assert!(propensity_min > 0.0 && propensity_max.is_finite());
        debug_assert!(propensity_max > propensity_min);

        let span = f64::ceil(f64::log2(propensity_max / propensity_min)).max(0.0) as usize;
        let num_buckets = span + 1;

        let mut lower_bounds = Vec::with_capacity(num_buckets + 1);
        let mut bound = propensity_min;
        for _ in 0..=num_buckets {
            lower_bounds.push(bound);
            bound *= 2.0;
        }

        PropensityHash {
            propensity_min_: propensity_min,
            propensity_max_: propensity_max,
            lower_bounds_: lower_bounds,
        }
    }

    #[inline]
    pub fn num_buckets(&self) -> usize {
        self.lower_bounds_.len() - 1
    }

    /// `clamp(floor(log2(w / min)), 0, num_buckets - 1)`, corrected by one
    /// step when `log2` rounds across a bucket boundary.
    #[inline]
    pub fn bucket_for(&self, propensity: f64) -> usize {
        let last = self.num_buckets() - 1;
        let raw = f64::floor(f64::log2(propensity / self.propensity_min_));
        let mut idx = if raw > 0.0 { (raw as usize).min(last) } else { 0 };

        if idx < last && propensity >= self.lower_bounds_[idx + 1] {
            idx += 1;
        } else if idx > 0 && propensity < self.lower_bounds_[idx] {
            idx -= 1;
        }
        idx
    }

    /// Acceptance ceiling for bucket `idx`: $\min(w_{\min} 2^{b+1}, w_{\max})$.
    #[inline]
    pub fn upper_bound(&self, idx: usize) -> f64 {
        self.lower_bounds_[idx + 1].min(self.propensity_max_)
    }
}
