//! Facility area codes and the tag area resolver.
//!
//! Equipment and instrument tags embed a numeric area code. Two conventions
//! are recognized, tried in order:
//!
//! 1. A leading run of 3-4 digits (`200-P-01` -> `200`).
//! 2. A 3-4 digit group between an uppercase letter prefix and a hyphen,
//!    as in ISA instrument tags (`PIT-200-01` -> `200`).
//!
//! Tags matching neither resolve to [`AreaCode::DEFAULT`].

use core::fmt;
use std::borrow::Borrow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LEADING_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{3,4})").expect("leading digit pattern is valid"));

static EMBEDDED_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]+-(\d{3,4})-").expect("embedded digit pattern is valid"));

/// Area code extracted from a tag. Orders lexicographically on the code text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaCode(String);

impl AreaCode {
    /// Fallback code for tags without a recognizable area.
    pub const DEFAULT: &'static str = "000";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn default_area() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the fallback code. A real area coded `000` is indistinguishable.
    pub fn is_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }
}

impl fmt::Debug for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AreaCode({})", self.0)
    }
}

impl fmt::Display for AreaCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AreaCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Resolve the area code of a free-text tag. First matching rule wins.
pub fn resolve_area(tag: &str) -> AreaCode {
    if let Some(caps) = LEADING_DIGITS.captures(tag) {
        return AreaCode::new(&caps[1]);
    }
    if let Some(caps) = EMBEDDED_DIGITS.captures(tag) {
        return AreaCode::new(&caps[1]);
    }
    AreaCode::default_area()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_digits() {
        assert_eq!(resolve_area("200-P-001").as_str(), "200");
        assert_eq!(resolve_area("1450-TK-03").as_str(), "1450");
    }

    #[test]
    fn leading_run_is_capped_at_four_digits() {
        assert_eq!(resolve_area("20000-X").as_str(), "2000");
    }

    #[test]
    fn isa_embedded_digits() {
        assert_eq!(resolve_area("PIT-200-01").as_str(), "200");
        assert_eq!(resolve_area("LIT-3100-07A").as_str(), "3100");
    }

    #[test]
    fn embedded_requires_uppercase_prefix_and_trailing_hyphen() {
        assert!(resolve_area("pit-200-01").is_default());
        assert!(resolve_area("PIT-200").is_default());
    }

    #[test]
    fn fallback() {
        assert!(resolve_area("").is_default());
        assert!(resolve_area("P-01").is_default());
        assert!(resolve_area("12-P-01").is_default());
    }

    #[test]
    fn area_codes_sort_lexicographically() {
        let mut areas = vec![AreaCode::new("300"), AreaCode::new("1000"), AreaCode::new("200")];
        areas.sort();
        let codes: Vec<&str> = areas.iter().map(AreaCode::as_str).collect();
        assert_eq!(codes, ["1000", "200", "300"]);
    }
}
