//! The bundled serde-backed structural engine
//!
//! [`SchemaEngine`] implements [`StructuralEngine`] for any type that is
//! deserializable and can report its own field constraints through the
//! [`Structured`] trait. The [`Violations`] collector keeps `violations`
//! implementations declarative.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::foundation::{Validate, ValidationError, ValidationResult};
use crate::rule::ArgValue;
use crate::structural::{ConstraintViolation, Schema, StructuralEngine};

// ============================================================================
// STRUCTURED TRAIT
// ============================================================================

/// A type that describes its own field constraints.
///
/// Implementors pair a serde shape with a set of per-field rules, written
/// with the crate's [field validators](crate::validators).
///
/// # Examples
///
/// ```rust,ignore
/// #[derive(Debug, Deserialize)]
/// struct SignupForm {
///     email: String,
/// }
///
/// impl Structured for SignupForm {
///     const NAME: &'static str = "SignupForm";
///
///     fn violations(&self) -> Vec<ConstraintViolation> {
///         let mut v = Violations::new();
///         v.field("email", not_empty(), self.email.as_str());
///         v.field("email", email(), self.email.as_str());
///         v.into_vec()
///     }
/// }
/// ```
pub trait Structured: DeserializeOwned {
    /// Name reported in aggregated failure messages.
    const NAME: &'static str;

    /// Checks every field; returns one violation per failing field.
    fn violations(&self) -> Vec<ConstraintViolation>;
}

// ============================================================================
// SCHEMA ENGINE
// ============================================================================

/// The bundled engine for [`Structured`] types.
///
/// `transform` deserializes the plain value (no coercion beyond what serde
/// performs); `validate` delegates to the type's own `violations`.
pub struct SchemaEngine<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SchemaEngine<T> {
    /// Creates the engine. Zero-sized; construction never fails.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SchemaEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SchemaEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaEngine")
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Structured> StructuralEngine for SchemaEngine<T> {
    type Instance = T;

    fn name(&self) -> &str {
        T::NAME
    }

    fn transform(&self, value: &ArgValue) -> ValidationResult<T> {
        serde_json::from_value(value.clone()).map_err(|err| {
            ValidationError::new(
                "transform",
                format!("Validation failed for {}: cannot transform value ({err})", T::NAME),
            )
        })
    }

    fn validate(&self, instance: &T) -> Vec<ConstraintViolation> {
        instance
            .violations()
            .into_iter()
            .filter(|violation| !violation.is_empty())
            .collect()
    }
}

/// Creates a schema rule for a [`Structured`] type.
///
/// # Examples
///
/// ```rust,ignore
/// rules::<Service>("signup").param(0, schema::<SignupForm>());
/// ```
#[must_use]
pub fn schema<T: Structured>() -> Schema<SchemaEngine<T>> {
    Schema::new(SchemaEngine::new())
}

// ============================================================================
// VIOLATIONS COLLECTOR
// ============================================================================

/// Collects field-level constraint failures into [`ConstraintViolation`]s.
///
/// Failures for the same property accumulate into one violation, preserving
/// check order. Each stored message is prefixed with the property name, so
/// aggregated messages read naturally ("email must not be empty").
#[derive(Debug, Default)]
pub struct Violations {
    list: Vec<ConstraintViolation>,
}

impl Violations {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks one field with one validator, recording a constraint entry
    /// on failure.
    pub fn field<V>(&mut self, property: &'static str, validator: V, value: &V::Input) -> &mut Self
    where
        V: Validate,
    {
        if let Err(err) = validator.validate(value) {
            let message = format!("{property} {}", err.message);
            match self.list.iter_mut().find(|v| v.property == property) {
                Some(violation) => violation.push_constraint(err.code, message),
                None => self
                    .list
                    .push(ConstraintViolation::new(property).constraint(err.code, message)),
            }
        }
        self
    }

    /// Returns true if no constraint failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Consumes the collector, yielding the violations.
    #[must_use]
    pub fn into_vec(self) -> Vec<ConstraintViolation> {
        self.list
    }
}

// ============================================================================
// TESTS
// ============================================================================
