//! Domain layer for reversible PII redaction
//!
//! This crate defines the category taxonomy, the matcher contract with the
//! seven built-in detectors, and deterministic token identity. It carries no
//! orchestration logic; chunking, scheduling, and the token store live in
//! `redactum-engine`.

#![warn(missing_docs)]

pub mod category;
pub mod error;
pub mod matcher;
pub mod matchers;
pub mod token;

// Re-export key types
pub use category::PiiCategory;
pub use error::{CoreError, Result};
pub use matcher::{Candidate, Matcher};
pub use matchers::{
    builtin_matcher, builtin_matchers, luhn_check, BankAccountMatcher, CreditCardMatcher,
    CustomPatternMatcher, EmailMatcher, IpAddressMatcher, PassportMatcher, PhoneMatcher,
    SsnMatcher,
};
pub use token::{detector_token_id, local_token_id, RedactionToken};
