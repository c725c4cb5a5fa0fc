//! Phone number matcher

use crate::category::PiiCategory;
use crate::matcher::Matcher;
use crate::matchers::digits_only;
use regex::Regex;
use std::sync::LazyLock;

// Covers (123) 456-7890, 123-456-7890, 123.456.7890, 1234567890, +1 123 456 7890
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b")
        .expect("phone pattern is valid")
});

/// Matches NANP phone numbers with common separator styles.
pub struct PhoneMatcher;

impl Matcher for PhoneMatcher {
    fn category(&self) -> PiiCategory {
        PiiCategory::Phone
    }

    fn pattern(&self) -> &Regex {
        &PHONE_PATTERN
    }

    fn validate(&self, candidate: &str) -> bool {
        let digits = digits_only(candidate);
        digits.len() == 10 || digits.len() == 11
    }
}
