//! Derived-series fingerprinting.
//!
//! A `SeriesDigest` is a BLAKE3 hash over the numeric content of a figure model
//! (little-endian f64/i64 bytes, length-prefixed, in a fixed traversal order).
//! Two runs over identical inputs must produce identical digests regardless of
//! how the renderer anti-aliases the result.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesDigest(pub String);

impl fmt::Display for SeriesDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Incremental hasher for figure models.
#[derive(Default)]
pub struct SeriesHasher {
    inner: blake3::Hasher,
}

impl SeriesHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, value: &str) -> &mut Self {
        self.inner.update(&(value.len() as u64).to_le_bytes());
        self.inner.update(value.as_bytes());
        self
    }

    pub fn values(&mut self, series: &[f64]) -> &mut Self {
        self.inner.update(&(series.len() as u64).to_le_bytes());
        for v in series {
            self.inner.update(&v.to_le_bytes());
        }
        self
    }

    pub fn timestamps(&mut self, series: &[i64]) -> &mut Self {
        self.inner.update(&(series.len() as u64).to_le_bytes());
        for t in series {
            self.inner.update(&t.to_le_bytes());
        }
        self
    }

    pub fn value(&mut self, v: f64) -> &mut Self {
        self.inner.update(&v.to_le_bytes());
        self
    }

    pub fn finish(&self) -> SeriesDigest {
        SeriesDigest(self.inner.finalize().to_hex().to_string())
    }
}
