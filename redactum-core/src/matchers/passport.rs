//! Passport number matcher

use crate::category::PiiCategory;
use crate::matcher::Matcher;
use regex::Regex;
use std::sync::LazyLock;

// One or two letters plus 6-9 digits, 9 plain digits, or 6-9 alphanumerics
static PASSPORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]{1,2}\d{6,9}\b|\b\d{9}\b|\b[A-Z0-9]{6,9}\b")
        .expect("passport pattern is valid")
});

/// Matches passport numbers in common national formats.
pub struct PassportMatcher;

impl Matcher for PassportMatcher {
    fn category(&self) -> PiiCategory {
        PiiCategory::Passport
    }

    fn pattern(&self) -> &Regex {
        &PASSPORT_PATTERN
    }

    fn validate(&self, candidate: &str) -> bool {
        let clean: String = candidate.chars().filter(|c| *c != ' ').collect();

        if clean.len() < 6 || clean.len() > 9 {
            return false;
        }

        if !clean.chars().all(|c| c.is_ascii_alphanumeric()) {
            return false;
        }

        let has_letter = clean.chars().any(|c| c.is_ascii_alphabetic());
        let all_digits = clean.chars().all(|c| c.is_ascii_digit());
        has_letter || all_digits
    }
}
