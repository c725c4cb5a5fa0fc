//! Bank account number matcher

use crate::category::PiiCategory;
use crate::matcher::Matcher;
use crate::matchers::digits_only;
use regex::Regex;
use std::sync::LazyLock;

// Covers 12345678, 1234-5678-90, 1234 5678 9012 3456 (8-17 digits overall)
static ACCOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{4}[-\s]?\d{4}[-\s]?\d{2,9}\b|\b\d{8,17}\b")
        .expect("bank account pattern is valid")
});

/// Matches 8-17 digit account numbers with optional grouping.
pub struct BankAccountMatcher;

impl Matcher for BankAccountMatcher {
    fn category(&self) -> PiiCategory {
        PiiCategory::BankAccount
    }

    fn pattern(&self) -> &Regex {
        &ACCOUNT_PATTERN
    }

    fn validate(&self, candidate: &str) -> bool {
        let digits = digits_only(candidate);
        if digits.len() < 8 || digits.len() > 17 {
            return false;
        }

        // A single repeated digit is not a plausible account number
        let first = match digits.chars().next() {
            Some(c) => c,
            None => return false,
        };
        !digits.chars().all(|c| c == first)
    }
}
