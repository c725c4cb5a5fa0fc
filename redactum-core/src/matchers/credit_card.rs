//! Credit card matcher

use crate::category::PiiCategory;
use crate::matcher::Matcher;
use crate::matchers::digits_only;
use regex::Regex;
use std::sync::LazyLock;

// Covers 1234-5678-9012-3456, 1234 5678 9012 3456, 1234567890123456
static CARD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{4}[-\s]?\d{4}[-\s]?\d{4}[-\s]?\d{4}\b").expect("card pattern is valid")
});

/// Matches 16-digit card numbers in common grouped formats.
pub struct CreditCardMatcher;

impl Matcher for CreditCardMatcher {
    fn category(&self) -> PiiCategory {
        PiiCategory::CreditCard
    }

    fn pattern(&self) -> &Regex {
        &CARD_PATTERN
    }

    fn validate(&self, candidate: &str) -> bool {
        let digits = digits_only(candidate);
        if digits.len() < 13 || digits.len() > 19 {
            return false;
        }
        luhn_check(&digits)
    }
}

/// Luhn checksum over a digit string.
///
/// Every second digit from the right is doubled and digit-summed; the
/// total must be divisible by 10.
pub fn luhn_check(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut alternate = false;

    for c in digits.chars().rev() {
        let mut digit = match c.to_digit(10) {
            Some(d) => d,
            None => return false,
        };
        if alternate {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        alternate = !alternate;
    }

    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_luhn_accepts_valid_visa() {
        assert!(luhn_check("4532015112830366"));
    }

    #[test]
    fn test_luhn_rejects_sequential_digits() {
        assert!(!luhn_check("1234567890123456"));
    }

    #[test]
    fn test_matches_grouped_formats() {
        let matcher = CreditCardMatcher;
        assert_eq!(
            matcher.find_candidates("Card: 4532-0151-1283-0366").len(),
            1
        );
        assert_eq!(
            matcher.find_candidates("Card: 4532 0151 1283 0366").len(),
            1
        );
        assert_eq!(matcher.find_candidates("Card: 4532015112830366").len(), 1);
    }

    #[test]
    fn test_validate_applies_luhn() {
        let matcher = CreditCardMatcher;
        assert!(matcher.validate("4532-0151-1283-0366"));
        assert!(!matcher.validate("1234-5678-9012-3456"));
    }

    #[test]
    fn test_validate_rejects_short_runs() {
        let matcher = CreditCardMatcher;
        assert!(!matcher.validate("4532"));
    }

    proptest! {
        // Appending the correct check digit to any digit prefix must
        // always produce a Luhn-valid number.
        #[test]
        fn prop_appended_check_digit_validates(prefix in "[0-9]{12,18}") {
            let mut sum = 0u32;
            let mut alternate = true;
            for c in prefix.chars().rev() {
                let mut digit = c.to_digit(10).unwrap();
                if alternate {
                    digit *= 2;
                    if digit > 9 {
                        digit -= 9;
                    }
                }
                sum += digit;
                alternate = !alternate;
            }
            let check = (10 - (sum % 10)) % 10;
            let full = format!("{prefix}{check}");
            prop_assert!(luhn_check(&full));
        }
    }
}
