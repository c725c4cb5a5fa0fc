//! Email address matcher

use crate::category::PiiCategory;
use crate::matcher::Matcher;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")
        .expect("email pattern is valid")
});

/// Matches `local@domain` addresses.
pub struct EmailMatcher;

impl Matcher for EmailMatcher {
    fn category(&self) -> PiiCategory {
        PiiCategory::Email
    }

    fn pattern(&self) -> &Regex {
        &EMAIL_PATTERN
    }

    fn validate(&self, candidate: &str) -> bool {
        let mut parts = candidate.split('@');
        let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => (local, domain),
            _ => return false,
        };

        if local.is_empty() || local.len() > 64 {
            return false;
        }

        !domain.is_empty() && domain.contains('.')
    }
}
