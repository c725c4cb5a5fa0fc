//! Social Security Number matcher

use crate::category::PiiCategory;
use crate::matcher::Matcher;
use crate::matchers::digits_only;
use regex::Regex;
use std::sync::LazyLock;

// Covers 123-45-6789, 123 45 6789, 123456789
static SSN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}[-\s]?\d{2}[-\s]?\d{4}\b").expect("ssn pattern is valid"));

/// Matches US Social Security Numbers.
pub struct SsnMatcher;

impl Matcher for SsnMatcher {
    fn category(&self) -> PiiCategory {
        PiiCategory::Ssn
    }

    fn pattern(&self) -> &Regex {
        &SSN_PATTERN
    }

    fn validate(&self, candidate: &str) -> bool {
        let digits = digits_only(candidate);
        if digits.len() != 9 {
            return false;
        }

        // Area 000, 666, and 900-999 are never issued
        let area: u32 = match digits[..3].parse() {
            Ok(n) => n,
            Err(_) => return false,
        };
        if area == 0 || area == 666 || area >= 900 {
            return false;
        }

        // Group 00 and serial 0000 are invalid
        let group: u32 = match digits[3..5].parse() {
            Ok(n) => n,
            Err(_) => return false,
        };
        if group == 0 {
            return false;
        }

        let serial: u32 = match digits[5..9].parse() {
            Ok(n) => n,
            Err(_) => return false,
        };
        serial != 0
    }
}
