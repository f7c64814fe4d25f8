//! Numeric validators

use std::fmt::Display;

use crate::foundation::{Validate, ValidationError};

// ============================================================================
// MIN
// ============================================================================

/// Validates that a number is at least a minimum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Min<T> {
    min: T,
}

impl<T> Min<T> {
    /// Creates the validator.
    #[must_use]
    pub fn new(min: T) -> Self {
        Self { min }
    }
}

impl<T> Validate for Min<T>
where
    T: PartialOrd + Display,
{
    type Input = T;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if *input >= self.min {
            Ok(())
        } else {
            Err(
                ValidationError::new("min", format!("must not be less than {}", self.min))
                    .with_param("min", self.min.to_string()),
            )
        }
    }
}

/// Creates a minimum-value validator.
#[must_use]
pub fn min<T>(value: T) -> Min<T> {
    Min::new(value)
}

// ============================================================================
// POSITIVE
// ============================================================================

/// Validates that a number is strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Positive;

impl Validate for Positive {
    type Input = f64;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if *input > 0.0 {
            Ok(())
        } else {
            Err(ValidationError::new("positive", "must be a positive number"))
        }
    }
}

/// Creates a positive-number validator.
#[must_use]
pub const fn positive() -> Positive {
    Positive
}

// ============================================================================
// TESTS
// ============================================================================
