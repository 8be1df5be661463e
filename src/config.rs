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

use crate::error::{SSetError, SSetResult};

/// Trial cap for the in-bucket rejection step.
///
/// Acceptance probability is at least 1/2 per trial, so reaching the cap has
/// probability below $2^{-256}$ for well-formed buckets.
pub const DEFAULT_MAX_REJECTION_TRIALS: usize = 256;

/// Construction-time settings of a [SamplableSet](crate::SamplableSet).
///
/// ```
/// use samplable_set_cr::{SamplableSet, SamplerConfig};
///
/// let cfg = SamplerConfig::new(1.0, 100.0).with_seed(42);
/// let s = SamplableSet::<u64>::with_config(cfg).unwrap();
/// assert_eq!(s.num_buckets(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    pub min_weight: f64,
    pub max_weight: f64,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub max_rejection_trials: usize,
}

impl SamplerConfig {
    pub fn new(min_weight: f64, max_weight: f64) -> Self {
        SamplerConfig {
            min_weight,
            max_weight,
            seed: None,
            max_rejection_trials: DEFAULT_MAX_REJECTION_TRIALS,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_rejection_trials(mut self, trials: usize) -> Self {
        self.max_rejection_trials = trials;
        self
    }

    /// Checks $0 < w_{\min} < w_{\max} < \infty$ and a non-zero trial cap.
    pub fn validate<K>(&self) -> SSetResult<(), K> {
        let (min, max) = (self.min_weight, self.max_weight);
        // NaN fails every comparison, so test for the valid shape
        let valid = min > 0.0 && min.is_finite() && max.is_finite() && max > min;
        if !valid {
            return Err(SSetError::InvalidBounds { min, max });
        }
        if self.max_rejection_trials == 0 {
            return Err(SSetError::InvalidConfig("max_rejection_trials must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(min: f64, max: f64) -> SSetResult<(), ()> {
        SamplerConfig::new(min, max).validate()
    }

    #[test]
    fn accepts_ordered_positive_finite_bounds() {
        assert!(check(1.0, 100.0).is_ok());
        assert!(check(1e-300, 1e300).is_ok());
    }

    #[test]
    fn rejects_bad_bounds() {
        assert!(matches!(check(0.0, 100.0), Err(SSetError::InvalidBounds { .. })));
        assert!(matches!(check(-1.0, 100.0), Err(SSetError::InvalidBounds { .. })));
        assert!(matches!(check(1.0, f64::INFINITY), Err(SSetError::InvalidBounds { .. })));
        assert!(matches!(check(2.0, 1.0), Err(SSetError::InvalidBounds { .. })));
        assert!(matches!(check(1.0, 1.0), Err(SSetError::InvalidBounds { .. })));
        assert!(matches!(check(f64::NAN, 1.0), Err(SSetError::InvalidBounds { .. })));
    }

    #[test]
    fn rejects_zero_trial_cap() {
        let r: SSetResult<(), ()> = SamplerConfig::new(1.0, 2.0)
            .with_max_rejection_trials(0)
            .validate();
        assert!(matches!(r, Err(SSetError::InvalidConfig(_))));
    }

    #[test]
    fn setters_chain() {
        let cfg = SamplerConfig::new(1.0, 8.0).with_seed(7).with_max_rejection_trials(16);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.max_rejection_trials, 16);
    }
}
