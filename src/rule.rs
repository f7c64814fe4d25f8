//! Parameter rules and the rule-construction factory
//!
//! A [`ParamRule`] binds one check to one positional parameter of one
//! method. Rules are built from a [`ParamValidator`] (a reusable predicate
//! with a default message) or from a structural
//! [`Schema`](crate::structural::Schema) adapter; the enforcement wrapper
//! treats both uniformly through the [`ParamSpec`] trait.
//!
//! # Examples
//!
//! ```rust,ignore
//! use param_guard::prelude::*;
//!
//! // Built-in validators
//! rules::<Account>("rename")
//!     .param(0, is_number())
//!     .param(1, is_string().with_message("Name must be text"));
//!
//! // Custom validators through the factory
//! let is_positive = param_validator(
//!     |v: &ArgValue| v.as_f64().is_some_and(|n| n > 0.0),
//!     "Must be a positive number",
//! );
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::foundation::{ValidationError, ValidationResult};

/// The uniform dynamically-typed argument representation.
///
/// Arguments cross the enforcement boundary as JSON values, so one rule
/// list can cover heterogeneously typed parameters.
pub type ArgValue = serde_json::Value;

/// A parameter check: `Ok(true)` passes, `Ok(false)` fails with the rule's
/// message, `Err` fails with the check's own descriptive error.
pub(crate) type CheckFn = Arc<dyn Fn(&ArgValue) -> Result<bool, ValidationError> + Send + Sync>;

// ============================================================================
// PARAM RULE
// ============================================================================

/// One validation rule bound to one positional parameter of one method.
///
/// Immutable once created. Multiple rules may target the same index; all
/// of them must pass for the call to proceed.
#[derive(Clone)]
pub struct ParamRule {
    index: usize,
    check: CheckFn,
    message: Cow<'static, str>,
}

impl ParamRule {
    pub(crate) fn new(index: usize, check: CheckFn, message: Cow<'static, str>) -> Self {
        Self {
            index,
            check,
            message,
        }
    }

    /// The zero-based parameter index this rule applies to.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The message reported when the predicate rejects the argument.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Runs the rule against one argument value.
    ///
    /// A plain predicate rejection produces
    /// `Validation failed for parameter at index {index}: {message}` with
    /// code `param_invalid`; a check that raises its own error (structural
    /// rules) surfaces that error unmodified.
    pub fn enforce(&self, value: &ArgValue) -> ValidationResult<()> {
        match (self.check)(value) {
            Ok(true) => Ok(()),
            Ok(false) => Err(ValidationError::new(
                "param_invalid",
                format!(
                    "Validation failed for parameter at index {}: {}",
                    self.index, self.message
                ),
            )
            .with_param("index", self.index.to_string())),
            Err(err) => Err(err),
        }
    }
}

impl fmt::Debug for ParamRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamRule")
            .field("index", &self.index)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// PARAM SPEC
// ============================================================================

/// Anything that can become a [`ParamRule`] once bound to a parameter index.
///
/// Implemented by [`ParamValidator`] and by
/// [`Schema`](crate::structural::Schema), so the registration builder
/// accepts both through one surface.
pub trait ParamSpec {
    /// Binds this specification to a parameter index.
    fn into_rule(self, index: usize) -> ParamRule;
}

// ============================================================================
// PARAM VALIDATOR FACTORY
// ============================================================================

/// A reusable parameter validator: a predicate plus a default message.
///
/// Produced by [`param_validator`]; bound to a concrete parameter index at
/// registration time.
#[derive(Clone)]
pub struct ParamValidator {
    check: CheckFn,
    message: Cow<'static, str>,
}

impl ParamValidator {
    /// Overrides the default failure message.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// is_string().with_message("Custom string message")
    /// ```
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }
}

impl ParamSpec for ParamValidator {
    fn into_rule(self, index: usize) -> ParamRule {
        ParamRule::new(index, self.check, self.message)
    }
}

impl fmt::Debug for ParamValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamValidator")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Creates a reusable parameter validator from a predicate and a default
/// message.
///
/// # Examples
///
/// ```rust,ignore
/// let is_positive_number = param_validator(
///     |v: &ArgValue| v.as_f64().is_some_and(|n| n > 0.0),
///     "Must be a positive number",
/// );
/// ```
pub fn param_validator<P>(
    predicate: P,
    default_message: impl Into<Cow<'static, str>>,
) -> ParamValidator
where
    P: Fn(&ArgValue) -> bool + Send + Sync + 'static,
{
    ParamValidator {
        check: Arc::new(move |value| Ok(predicate(value))),
        message: default_message.into(),
    }
}

// ============================================================================
// BUILT-IN VALIDATORS
// ============================================================================

/// Requires the argument to be numeric.
#[must_use]
pub fn is_number() -> ParamValidator {
    param_validator(ArgValue::is_number, "Must be a number")
}

/// Requires the argument to be textual.
#[must_use]
pub fn is_string() -> ParamValidator {
    param_validator(ArgValue::is_string, "Must be a string")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_number_accepts_numbers() {
        let rule = is_number().into_rule(0);
        assert!(rule.enforce(&json!(42)).is_ok());
        assert!(rule.enforce(&json!(4.2)).is_ok());
    }

    #[test]
    fn test_is_number_rejects_with_indexed_message() {
        let rule = is_number().into_rule(3);
        let err = rule.enforce(&json!("nope")).unwrap_err();
        assert_eq!(err.code, "param_invalid");
        assert_eq!(
            err.message,
            "Validation failed for parameter at index 3: Must be a number"
        );
        assert_eq!(err.param("index"), Some("3"));
    }

    #[test]
    fn test_is_string_built_in() {
        let rule = is_string().into_rule(0);
        assert!(rule.enforce(&json!("text")).is_ok());
        assert!(rule.enforce(&json!(1)).is_err());
    }

    #[test]
    fn test_message_override() {
        let rule = is_string().with_message("Custom string message").into_rule(1);
        let err = rule.enforce(&json!(42)).unwrap_err();
        assert_eq!(
            err.message,
            "Validation failed for parameter at index 1: Custom string message"
        );
    }

    #[test]
    fn test_custom_factory_validator() {
        let is_positive = param_validator(
            |v: &ArgValue| v.as_f64().is_some_and(|n| n > 0.0),
            "Must be a positive number",
        );
        let rule = is_positive.into_rule(0);
        assert!(rule.enforce(&json!(1)).is_ok());
        assert!(rule.enforce(&json!(-1)).is_err());
        assert!(rule.enforce(&json!("1")).is_err());
    }
}
