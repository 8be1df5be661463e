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

use thiserror::Error;

use crate::key::KeyKind;

/// Errors that can occur within the sampling set.
///
/// Every variant is raised *before* any internal state is touched, so a call
/// that returns `Err` leaves the set exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SSetError<K> {
    /// Weight bounds handed to a constructor do not satisfy
    /// $0 < w_{\min} < w_{\max} < \infty$.
    #[error("Invalid weight bounds [{min}, {max}]: need 0 < min < max < inf")]
    InvalidBounds { min: f64, max: f64 },
    /// Weight is not within the bounds $[w_{\min}, w_{\max}]$.
    #[error("Weight {w} is out of range [{min}, {max}]")]
    WeightOutOfRange { w: f64, min: f64, max: f64 },
    /// Key not found in the set.
    #[error("Key not found: {0:?}")]
    KeyNotFound(K),
    /// Strict insertion of a key that is already present.
    #[error("Key already present: {0:?}")]
    DuplicateKey(K),
    /// The key's variant differs from the one the set was fixed to.
    #[error("Key kind mismatch: set holds {expected} keys, got {found}")]
    KeyKindMismatch { expected: KeyKind, found: KeyKind },
    /// A configuration value other than the weight bounds is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type SSetResult<T, K> = Result<T, SSetError<K>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let e: SSetError<u64> = SSetError::WeightOutOfRange { w: 0.5, min: 1.0, max: 10.0 };
        assert_eq!(e.to_string(), "Weight 0.5 is out of range [1, 10]");

        let e: SSetError<&str> = SSetError::KeyNotFound("b");
        assert_eq!(e.to_string(), "Key not found: \"b\"");

        let e: SSetError<u64> = SSetError::KeyKindMismatch {
            expected: KeyKind::Int,
            found: KeyKind::Edge,
        };
        assert_eq!(e.to_string(), "Key kind mismatch: set holds int keys, got edge");
    }
}
