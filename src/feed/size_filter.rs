//! Size extraction and range checks
//!
//! The size filter is the decision core of the proxy: given the free text of
//! a configured item field, it extracts a numeric size with the source's
//! regex, normalizes it to MiB, and tests it against the source's bounds.

use regex::Regex;

/// Extract a size in MiB from free text using the source's pattern.
///
/// The pattern is compiled case-insensitively and must expose capture
/// group 1 (numeric magnitude) and group 2 (unit token). Returns `None`
/// when the pattern does not match, a capture group is absent, the
/// magnitude is not a valid number, or the unit token is unrecognized.
///
/// Unit tokens are compared exactly: `GB` and `GiB` are both treated as
/// 1024 MiB (the decimal/binary distinction is deliberately ignored),
/// `MB` and `MiB` pass through unchanged. A case-insensitive pattern may
/// capture a lowercase token such as `gb`, but that token is not a
/// recognized unit and the extraction fails like a non-match.
pub fn parse_size_mib(text: &str, pattern: &Regex) -> Option<f64> {
    let captures = pattern.captures(text)?;

    let value: f64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str();

    match unit {
        "GB" | "GiB" => Some(value * 1024.0),
        "MB" | "MiB" => Some(value),
        _ => None,
    }
}

/// Inclusive size bounds in MiB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    pub min_mib: f64,
    pub max_mib: f64,
}

impl SizeRange {
    /// Build a range from optional configured bounds. A missing lower bound
    /// is 0, a missing upper bound is unbounded.
    pub fn new(min_mib: Option<f64>, max_mib: Option<f64>) -> Self {
        Self {
            min_mib: min_mib.unwrap_or(0.0),
            max_mib: max_mib.unwrap_or(f64::INFINITY),
        }
    }

    /// Inclusive on both ends: a size equal to either bound qualifies.
    pub fn contains(&self, size_mib: f64) -> bool {
        self.min_mib <= size_mib && size_mib <= self.max_mib
    }
}
