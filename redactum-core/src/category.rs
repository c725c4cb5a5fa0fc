//! PII category taxonomy

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of sensitive data a matcher or detector reports.
///
/// Built-in variants cover the bundled matchers. `Custom` carries a
/// caller-chosen label so domain-specific categories get their own
/// token prefix (e.g. `[EMPLOYEE_ID_a3f4d9e1]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PiiCategory {
    /// Email addresses
    Email,
    /// Phone numbers (NANP formats)
    Phone,
    /// US Social Security Numbers
    Ssn,
    /// Credit card numbers
    CreditCard,
    /// Bank account numbers
    BankAccount,
    /// IPv4 and IPv6 addresses
    IpAddress,
    /// Passport numbers
    Passport,
    /// Caller-defined category with its own label
    Custom(String),
}

impl PiiCategory {
    /// Canonical lowercase label, used in token id derivation.
    pub fn label(&self) -> &str {
        match self {
            PiiCategory::Email => "email",
            PiiCategory::Phone => "phone",
            PiiCategory::Ssn => "ssn",
            PiiCategory::CreditCard => "credit_card",
            PiiCategory::BankAccount => "bank_account",
            PiiCategory::IpAddress => "ip_address",
            PiiCategory::Passport => "passport",
            PiiCategory::Custom(label) => label,
        }
    }

    /// Uppercase tag embedded in the bracketed token id.
    pub fn tag(&self) -> String {
        self.label().to_uppercase()
    }

    /// Map a detector-reported category string onto the taxonomy.
    ///
    /// Recognized service labels collapse onto built-in variants; anything
    /// else is preserved verbatim as a custom category.
    pub fn from_detector_label(label: &str) -> Self {
        match label {
            "Email" => PiiCategory::Email,
            "PhoneNumber" => PiiCategory::Phone,
            "SSN" | "USSocialSecurityNumber" => PiiCategory::Ssn,
            "CreditCard" => PiiCategory::CreditCard,
            "IPAddress" => PiiCategory::IpAddress,
            other => PiiCategory::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
