//! Per-page correlation tag.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::clock::now_micros;

/// Identifies one page load in the logs.
///
/// Every entry written by a [`crate::StructuredLogger`] carries the tag, so
/// the lines of one visit can be grouped after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionTag(String);

impl SessionTag {
    /// Create a tag from a string.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Generate a tag from the clock and a process-wide counter.
    pub fn generate() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
        let micros = now_micros().unwrap_or(0);
        Self(format!("pg_{:x}{:04x}", micros, counter & 0xffff))
    }

    /// Get the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionTag {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
