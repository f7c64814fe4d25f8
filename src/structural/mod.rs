//! Structural validation of composite arguments
//!
//! A scalar predicate answers "is this one value acceptable"; structural
//! validation answers "are all the fields of this object-shaped value
//! acceptable". The pieces:
//!
//! - [`StructuralEngine`] — the external-collaborator seam: transforms a
//!   plain value into a typed instance and reports per-field
//!   [`ConstraintViolation`]s;
//! - [`Schema`] — the adapter that turns an engine (ready or lazily
//!   resolved) into a parameter rule the enforcement wrapper treats like
//!   any other;
//! - [`SchemaEngine`]/[`Structured`] — the bundled serde-backed engine for
//!   types that describe their own field constraints.
//!
//! # Examples
//!
//! ```rust,ignore
//! use param_guard::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct SignupForm {
//!     email: String,
//! }
//!
//! impl Structured for SignupForm {
//!     const NAME: &'static str = "SignupForm";
//!
//!     fn violations(&self) -> Vec<ConstraintViolation> {
//!         let mut v = Violations::new();
//!         v.field("email", not_empty(), self.email.as_str());
//!         v.field("email", email(), self.email.as_str());
//!         v.into_vec()
//!     }
//! }
//!
//! rules::<Service>("signup").param(0, schema::<SignupForm>());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::foundation::{ValidationError, ValidationResult};
use crate::rule::{ArgValue, CheckFn, ParamRule, ParamSpec};

mod engine;

pub use engine::{SchemaEngine, Structured, Violations, schema};

// ============================================================================
// CONSTRAINT VIOLATION
// ============================================================================

/// One field's failed constraints, as reported by a structural engine.
///
/// `constraints` maps constraint names to human-readable messages, in the
/// order the constraints were checked.
#[derive(Debug, Clone)]
pub struct ConstraintViolation {
    /// The field the violations apply to.
    pub property: Cow<'static, str>,
    /// Ordered (constraint name, message) pairs.
    pub constraints: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ConstraintViolation {
    /// Creates an empty violation for a field.
    #[must_use]
    pub fn new(property: impl Into<Cow<'static, str>>) -> Self {
        Self {
            property: property.into(),
            constraints: Vec::new(),
        }
    }

    /// Adds one failed constraint.
    #[must_use = "builder methods must be chained or built"]
    pub fn constraint(
        mut self,
        name: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.constraints.push((name.into(), message.into()));
        self
    }

    /// Adds one failed constraint in place.
    pub fn push_constraint(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) {
        self.constraints.push((name.into(), message.into()));
    }

    /// Returns true if no constraints failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// The constraint messages joined by `", "`.
    #[must_use]
    pub fn joined_messages(&self) -> String {
        self.constraints
            .iter()
            .map(|(_, message)| message.as_ref())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// STRUCTURAL ENGINE
// ============================================================================

/// The external structural-validation collaborator.
///
/// The adapter treats the engine as a black box: it owns the semantics of
/// individual field-level rules. Implementations must be cheap to call
/// repeatedly; both operations run synchronously on every enforced call.
pub trait StructuralEngine {
    /// The typed instance produced from a plain value.
    type Instance;

    /// The target type's name, used to prefix aggregated failure messages.
    fn name(&self) -> &str;

    /// Transforms a plain value into a typed instance, field by field.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when the value cannot be shaped into
    /// the target type at all.
    fn transform(&self, value: &ArgValue) -> ValidationResult<Self::Instance>;

    /// Runs field-level validation over the instance.
    ///
    /// Returns one [`ConstraintViolation`] per failing field; an empty
    /// list means the instance is valid.
    fn validate(&self, instance: &Self::Instance) -> Vec<ConstraintViolation>;
}

// ============================================================================
// SCHEMA ADAPTER
// ============================================================================

/// Deferred-resolution slot: a ready engine, or a factory resolved on
/// first use and cached. The factory form supports engines that cannot be
/// built at registration time.
enum EngineSlot<E> {
    Ready(E),
    Deferred {
        cell: OnceLock<E>,
        init: Box<dyn Fn() -> E + Send + Sync>,
    },
}

impl<E> EngineSlot<E> {
    fn resolve(&self) -> &E {
        match self {
            EngineSlot::Ready(engine) => engine,
            EngineSlot::Deferred { cell, init } => cell.get_or_init(init),
        }
    }
}

/// Adapts a [`StructuralEngine`] into a parameter rule.
///
/// The adapter's check transforms the argument, runs the engine's
/// validation, and on violations raises a failure whose message
/// concatenates every violation's constraint messages — joined by `"; "`
/// across fields and `", "` within a field — prefixed with the target
/// type's name. The violations are also attached as nested errors.
pub struct Schema<E> {
    slot: EngineSlot<E>,
}

impl<E: StructuralEngine> Schema<E> {
    /// Wraps an already-constructed engine.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self {
            slot: EngineSlot::Ready(engine),
        }
    }

    /// Wraps an engine factory, resolved on first use and cached.
    #[must_use]
    pub fn deferred(init: impl Fn() -> E + Send + Sync + 'static) -> Self {
        Self {
            slot: EngineSlot::Deferred {
                cell: OnceLock::new(),
                init: Box::new(init),
            },
        }
    }

    /// Resolves the engine (invoking the factory if one was supplied).
    pub fn engine(&self) -> &E {
        self.slot.resolve()
    }

    fn check(&self, value: &ArgValue) -> Result<bool, ValidationError> {
        let engine = self.engine();
        let instance = engine.transform(value)?;
        let violations = engine.validate(&instance);
        if violations.is_empty() {
            Ok(true)
        } else {
            Err(aggregate(engine.name(), &violations))
        }
    }
}

impl<E> ParamSpec for Schema<E>
where
    E: StructuralEngine + Send + Sync + 'static,
{
    fn into_rule(self, index: usize) -> ParamRule {
        let check: CheckFn = Arc::new(move |value| self.check(value));
        ParamRule::new(index, check, Cow::Borrowed("Structural validation failed"))
    }
}

impl<E> fmt::Debug for Schema<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = match &self.slot {
            EngineSlot::Ready(_) => "Ready",
            EngineSlot::Deferred { cell, .. } => {
                if cell.get().is_some() {
                    "Deferred(resolved)"
                } else {
                    "Deferred(pending)"
                }
            }
        };
        f.debug_struct("Schema").field("slot", &slot).finish()
    }
}

/// Wraps an already-constructed engine. Alias for [`Schema::new`] matching
/// the [`schema`] naming.
pub fn schema_with<E: StructuralEngine>(engine: E) -> Schema<E> {
    Schema::new(engine)
}

fn aggregate(name: &str, violations: &[ConstraintViolation]) -> ValidationError {
    let summary = violations
        .iter()
        .map(ConstraintViolation::joined_messages)
        .collect::<Vec<_>>()
        .join("; ");
    let nested = violations
        .iter()
        .flat_map(|violation| {
            let property = violation.property.clone();
            violation.constraints.iter().map(move |(code, message)| {
                ValidationError::new(code.clone(), message.clone())
                    .with_field(property.clone())
            })
        })
        .collect();
    ValidationError::new("schema_invalid", format!("Validation failed for {name}: {summary}"))
        .with_nested(nested)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct PairEngine;

    impl StructuralEngine for PairEngine {
        type Instance = (String, String);

        fn name(&self) -> &str {
            "Pair"
        }

        fn transform(&self, value: &ArgValue) -> ValidationResult<Self::Instance> {
            let first = value["first"].as_str().unwrap_or_default().to_owned();
            let second = value["second"].as_str().unwrap_or_default().to_owned();
            Ok((first, second))
        }

        fn validate(&self, instance: &Self::Instance) -> Vec<ConstraintViolation> {
            let mut violations = Vec::new();
            if instance.0.is_empty() {
                violations.push(
                    ConstraintViolation::new("first")
                        .constraint("not_empty", "first must not be empty")
                        .constraint("min_length", "first must be at least 1 characters"),
                );
            }
            if instance.1.is_empty() {
                violations.push(
                    ConstraintViolation::new("second")
                        .constraint("not_empty", "second must not be empty"),
                );
            }
            violations
        }
    }

    #[test]
    fn test_valid_value_passes() {
        let rule = Schema::new(PairEngine).into_rule(0);
        assert!(rule.enforce(&json!({"first": "a", "second": "b"})).is_ok());
    }

    #[test]
    fn test_violation_message_joins_constraints() {
        let rule = Schema::new(PairEngine).into_rule(0);
        let err = rule.enforce(&json!({"first": "", "second": ""})).unwrap_err();
        assert_eq!(
            err.message,
            "Validation failed for Pair: first must not be empty, \
             first must be at least 1 characters; second must not be empty"
        );
        assert_eq!(err.code, "schema_invalid");
        assert_eq!(err.nested.len(), 3);
        assert_eq!(err.nested[0].field.as_deref(), Some("first"));
    }

    #[test]
    fn test_deferred_engine_resolves_once() {
        static BUILDS: AtomicUsize = AtomicUsize::new(0);

        let rule = Schema::deferred(|| {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            PairEngine
        })
        .into_rule(0);

        assert_eq!(BUILDS.load(Ordering::SeqCst), 0);
        let value = json!({"first": "a", "second": "b"});
        assert!(rule.enforce(&value).is_ok());
        assert!(rule.enforce(&value).is_ok());
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
    }
}
