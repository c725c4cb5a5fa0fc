//! Built-in matchers, one module per category

mod bank_account;
mod credit_card;
mod custom;
mod email;
mod ip_address;
mod passport;
mod phone;
mod ssn;

pub use bank_account::BankAccountMatcher;
pub use credit_card::{luhn_check, CreditCardMatcher};
pub use custom::CustomPatternMatcher;
pub use email::EmailMatcher;
pub use ip_address::IpAddressMatcher;
pub use passport::PassportMatcher;
pub use phone::PhoneMatcher;
pub use ssn::SsnMatcher;

use crate::category::PiiCategory;
use crate::matcher::Matcher;
use std::sync::Arc;

/// All built-in matchers in the default application order.
pub fn builtin_matchers() -> Vec<Arc<dyn Matcher>> {
    vec![
        Arc::new(EmailMatcher),
        Arc::new(PhoneMatcher),
        Arc::new(SsnMatcher),
        Arc::new(CreditCardMatcher),
        Arc::new(BankAccountMatcher),
        Arc::new(IpAddressMatcher),
        Arc::new(PassportMatcher),
    ]
}

/// The built-in matcher for a category, if one exists.
pub fn builtin_matcher(category: &PiiCategory) -> Option<Arc<dyn Matcher>> {
    match category {
        PiiCategory::Email => Some(Arc::new(EmailMatcher)),
        PiiCategory::Phone => Some(Arc::new(PhoneMatcher)),
        PiiCategory::Ssn => Some(Arc::new(SsnMatcher)),
        PiiCategory::CreditCard => Some(Arc::new(CreditCardMatcher)),
        PiiCategory::BankAccount => Some(Arc::new(BankAccountMatcher)),
        PiiCategory::IpAddress => Some(Arc::new(IpAddressMatcher)),
        PiiCategory::Passport => Some(Arc::new(PassportMatcher)),
        PiiCategory::Custom(_) => None,
    }
}

/// Strip everything but ASCII digits.
pub(crate) fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}
