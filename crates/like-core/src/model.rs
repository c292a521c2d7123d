//! Data model shared by every provider
//!
//! - [`LikeIdentity`]: stable key naming the liked resource
//! - [`LikeState`]: the `(liked, count)` pair a widget renders

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable string key identifying the liked resource
///
/// Used both as the local storage key suffix and as the remote query key.
/// A bound widget never regenerates its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikeIdentity(String);

impl LikeIdentity {
    /// Create an identity from any string (typically a page path)
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LikeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LikeIdentity {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LikeIdentity {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Rendered widget state
///
/// `liked` is the local user's toggle. `count` is the aggregate: advisory
/// under the local provider, authoritative once a remote provider answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeState {
    /// Whether the local user currently likes the resource
    pub liked: bool,
    /// Aggregate like count, never negative
    pub count: u64,
}

impl LikeState {
    /// Create a new state
    pub fn new(liked: bool, count: u64) -> Self {
        Self { liked, count }
    }

    /// Flip `liked` and move `count` with it, flooring at zero
    pub fn toggle(&mut self) {
        self.liked = !self.liked;
        self.count = if self.liked {
            self.count.saturating_add(1)
        } else {
            self.count.saturating_sub(1)
        };
    }
}

/// Parse a persisted count string
///
/// Reads the leading decimal integer after any whitespace, ignoring what
/// follows it (`"12abc"` is 12, `"3.7"` is 3). Missing, non-numeric or
/// negative values all read as 0 so a corrupt entry can never poison the
/// rendered count. Values past `u64::MAX` saturate.
pub fn parse_count(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return 0;
    };

    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let digits = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(None, |acc: Option<u64>, d| {
            Some(acc.unwrap_or(0).saturating_mul(10).saturating_add(u64::from(d - b'0')))
        });

    match digits {
        Some(n) if !negative => n,
        _ => 0,
    }
}

/// Read a count out of a JSON value from a remote store
///
/// Only non-negative numbers are accepted; fractional values are floored.
/// Anything else (strings, null, negatives) yields `None`.
pub fn count_from_json(value: &serde_json::Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.floor() as u64)
    })
}
