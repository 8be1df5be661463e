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

/// Which [ElementKey] variant a set holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Scalar integer identity, e.g. a node id.
    Int,
    /// Ordered integer triple, e.g. `(source, target, layer)`.
    Edge,
    /// Any other identity, carried as a string label.
    Label,
}

impl KeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Int => "int",
            KeyKind::Edge => "edge",
            KeyKind::Label => "label",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element identity for sets whose key shape is chosen at runtime.
///
/// Equality and hashing are per variant: `Int(1)` never equals `Label("1")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKey {
    Int(u64),
    Edge(u64, u64, u64),
    Label(String),
}

impl ElementKey {
    #[inline]
    pub fn kind(&self) -> KeyKind {
        match self {
            ElementKey::Int(_) => KeyKind::Int,
            ElementKey::Edge(..) => KeyKind::Edge,
            ElementKey::Label(_) => KeyKind::Label,
        }
    }
}

impl From<u64> for ElementKey {
    fn from(v: u64) -> Self {
        ElementKey::Int(v)
    }
}

impl From<(u64, u64, u64)> for ElementKey {
    fn from((a, b, c): (u64, u64, u64)) -> Self {
        ElementKey::Edge(a, b, c)
    }
}

impl From<&str> for ElementKey {
    fn from(v: &str) -> Self {
        ElementKey::Label(v.to_owned())
    }
}

impl From<String> for ElementKey {
    fn from(v: String) -> Self {
        ElementKey::Label(v)
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKey::Int(v) => write!(f, "{v}"),
            ElementKey::Edge(a, b, c) => write!(f, "({a}, {b}, {c})"),
            ElementKey::Label(s) => write!(f, "{s:?}"),
        }
    }
}
