//! String content validators
//!
//! Validators for checking string content against patterns.

use std::sync::LazyLock;

use crate::foundation::{Validate, ValidationError};

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

// ============================================================================
// EMAIL VALIDATOR
// ============================================================================

crate::constraint! {
    /// Validates email format.
    ///
    /// Uses a simple but effective regex pattern.
    pub Email { pattern: regex::Regex } for str;
    rule(self, input) { self.pattern.is_match(input) }
    error(self, input) { ValidationError::new("email", "must be an email") }
    new() {
        Self {
            pattern: EMAIL_REGEX.clone(),
        }
    }
    fn email();
}

// ============================================================================
// REGEX VALIDATOR
// ============================================================================

/// Validates that a string matches a regular expression.
#[derive(Debug, Clone)]
pub struct MatchesRegex {
    pattern: regex::Regex,
}

impl MatchesRegex {
    /// Creates the validator, compiling the pattern.
    ///
    /// # Errors
    ///
    /// Returns `regex::Error` if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: regex::Regex::new(pattern)?,
        })
    }
}

impl Validate for MatchesRegex {
    type Input = str;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if self.pattern.is_match(input) {
            Ok(())
        } else {
            Err(ValidationError::new("matches_regex", "has an invalid format")
                .with_param("pattern", self.pattern.as_str().to_string()))
        }
    }
}

/// Creates a regex validator from a pattern.
///
/// # Errors
///
/// Returns `regex::Error` if the pattern does not compile.
pub fn matches_regex(pattern: &str) -> Result<MatchesRegex, regex::Error> {
    MatchesRegex::new(pattern)
}

// ============================================================================
// TESTS
// ============================================================================
