//! Matcher trait
//!
//! A matcher pairs a detection pattern with a semantic validator. Detection
//! yields candidates; only candidates that pass validation are ever
//! replaced. Matchers are immutable after construction and applied by the
//! engine in a fixed, caller-supplied order.

use crate::category::PiiCategory;
use regex::Regex;

/// A candidate span reported by a matcher's pattern.
///
/// Offsets are byte positions relative to the text handed to
/// [`Matcher::find_candidates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Byte offset of the candidate start
    pub start: usize,
    /// Byte offset one past the candidate end
    pub end: usize,
    /// The matched text
    pub text: String,
}

/// Detection and validation for one PII category.
pub trait Matcher: Send + Sync {
    /// Category this matcher reports.
    fn category(&self) -> PiiCategory;

    /// Compiled detection pattern.
    fn pattern(&self) -> &Regex;

    /// Semantic check applied to each candidate. Candidates failing
    /// validation are left untouched in the text and never become tokens.
    fn validate(&self, candidate: &str) -> bool;

    /// All non-overlapping pattern matches, left to right.
    fn find_candidates(&self, text: &str) -> Vec<Candidate> {
        self.pattern()
            .find_iter(text)
            .map(|m| Candidate {
                start: m.start(),
                end: m.end(),
                text: m.as_str().to_string(),
            })
            .collect()
    }
}
