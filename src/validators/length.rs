//! String length validators
//!
//! Length is measured in Unicode scalar values (chars), not bytes.

use crate::foundation::ValidationError;

// ============================================================================
// NOT EMPTY
// ============================================================================

crate::constraint! {
    /// Validates that a string is not empty.
    pub NotEmpty for str;
    rule(input) { !input.is_empty() }
    error(input) { ValidationError::new("not_empty", "must not be empty") }
    fn not_empty();
}

// ============================================================================
// MIN LENGTH
// ============================================================================

crate::constraint! {
    /// Validates that a string has at least a minimum length.
    pub MinLength { min: usize } for str;
    rule(self, input) { input.chars().count() >= self.min }
    error(self, input) {
        ValidationError::new(
            "min_length",
            format!("must be at least {} characters", self.min),
        )
        .with_param("min", self.min.to_string())
        .with_param("actual", input.chars().count().to_string())
    }
    fn min_length(min: usize);
}

// ============================================================================
// MAX LENGTH
// ============================================================================

crate::constraint! {
    /// Validates that a string does not exceed a maximum length.
    pub MaxLength { max: usize } for str;
    rule(self, input) { input.chars().count() <= self.max }
    error(self, input) {
        ValidationError::new(
            "max_length",
            format!("must be at most {} characters", self.max),
        )
        .with_param("max", self.max.to_string())
        .with_param("actual", input.chars().count().to_string())
    }
    fn max_length(max: usize);
}

// ============================================================================
// TESTS
// ============================================================================
