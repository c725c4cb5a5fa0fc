//! IP address matcher

use crate::category::PiiCategory;
use crate::matcher::Matcher;
use regex::Regex;
use std::sync::LazyLock;

// IPv4 dotted quads plus full and compressed IPv6 forms
static IP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(\b(?:\d{1,3}\.){3}\d{1,3}\b)|(\b(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}\b|\b(?:[0-9a-fA-F]{1,4}:){1,7}:\b|\b(?:[0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}\b)",
    )
    .expect("ip pattern is valid")
});

/// Matches IPv4 and IPv6 addresses.
pub struct IpAddressMatcher;

impl Matcher for IpAddressMatcher {
    fn category(&self) -> PiiCategory {
        PiiCategory::IpAddress
    }

    fn pattern(&self) -> &Regex {
        &IP_PATTERN
    }

    fn validate(&self, candidate: &str) -> bool {
        validate_ipv4(candidate) || validate_ipv6(candidate)
    }
}

fn validate_ipv4(text: &str) -> bool {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return false;
    }
    parts.iter().all(|part| part.parse::<u32>().is_ok_and(|n| n <= 255))
}

fn validate_ipv6(text: &str) -> bool {
    if text.contains("::") {
        // At most one compressed run
        if text.split("::").count() > 2 {
            return false;
        }
    } else if text.split(':').count() != 8 {
        return false;
    }

    // Every populated group must be short hex
    text.replace("::", ":")
        .split(':')
        .filter(|part| !part.is_empty())
        .all(|part| part.len() <= 4 && part.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_ipv4() {
        let matcher = IpAddressMatcher;
        let candidates = matcher.find_candidates("Server at 192.168.1.1 responded");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "192.168.1.1");
    }

    #[test]
    fn test_validate_ipv4_octet_range() {
        let matcher = IpAddressMatcher;
        assert!(matcher.validate("10.0.0.1"));
        assert!(matcher.validate("255.255.255.255"));
        assert!(!matcher.validate("256.1.1.1"));
        assert!(!matcher.validate("1.2.3"));
    }

    #[test]
    fn test_validate_full_ipv6() {
        let matcher = IpAddressMatcher;
        assert!(matcher.validate("2001:0db8:85a3:0000:0000:8a2e:0370:7334"));
        assert!(!matcher.validate("2001:0db8:85a3:0000:0000:8a2e:0370"));
    }

    #[test]
    fn test_validate_compressed_ipv6() {
        let matcher = IpAddressMatcher;
        assert!(matcher.validate("2001:db8::8a2e:370:7334"));
        assert!(!matcher.validate("2001::db8::1"));
    }

    #[test]
    fn test_validate_rejects_long_groups() {
        let matcher = IpAddressMatcher;
        assert!(!matcher.validate("2001:db8::12345:1"));
    }
}
