//! Caller-defined pattern matchers

use crate::category::PiiCategory;
use crate::error::{CoreError, Result};
use crate::matcher::Matcher;
use regex::Regex;

/// A matcher built from a caller-supplied pattern and category label.
///
/// The label becomes the token prefix, so a matcher registered as
/// `employee_id` emits `[EMPLOYEE_ID_...]` tokens. Without an explicit
/// validator every pattern match is accepted.
pub struct CustomPatternMatcher {
    category: PiiCategory,
    pattern: Regex,
    validator: Option<Box<dyn Fn(&str) -> bool + Send + Sync>>,
}

impl std::fmt::Debug for CustomPatternMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomPatternMatcher")
            .field("category", &self.category)
            .field("pattern", &self.pattern)
            .field("validator", &self.validator.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl CustomPatternMatcher {
    /// Compile a matcher for a custom category.
    ///
    /// Fails if the label is empty or the pattern does not compile.
    pub fn new(label: impl Into<String>, pattern: &str) -> Result<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(CoreError::InvalidCategoryLabel(
                "label must be non-empty".to_string(),
            ));
        }

        let compiled = Regex::new(pattern).map_err(|e| CoreError::InvalidPattern {
            category: label.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            category: PiiCategory::Custom(label),
            pattern: compiled,
            validator: None,
        })
    }

    /// Attach a semantic validator applied to each candidate.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }
}

impl Matcher for CustomPatternMatcher {
    fn category(&self) -> PiiCategory {
        self.category.clone()
    }

    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn validate(&self, candidate: &str) -> bool {
        match &self.validator {
            Some(validator) => validator(candidate),
            None => true,
        }
    }
}
