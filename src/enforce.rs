//! Method enforcement wrapper
//!
//! [`Enforced`] captures a method's original implementation and runs the
//! registered parameter rules before every delegation. The wrapped closure
//! never contains validation code of its own.
//!
//! # Examples
//!
//! ```rust,ignore
//! use param_guard::prelude::*;
//! use serde_json::json;
//!
//! struct Calculator;
//!
//! rules::<Calculator>("scale")
//!     .param(0, is_number())
//!     .param(1, is_string());
//!
//! let scale = enforce::<Calculator, _, _>("scale", |_this, args| {
//!     format!("{} - {}", args[0], args[1])
//! });
//!
//! let calc = Calculator;
//! assert!(scale.call(&calc, &[json!(42), json!("test")]).is_ok());
//! assert!(scale.call(&calc, &[json!("oops"), json!(42)]).is_err());
//! ```

use std::marker::PhantomData;

use crate::foundation::ValidationResult;
use crate::registry::{MethodKey, OwnerId, Registry};
use crate::rule::ArgValue;

// ============================================================================
// ENFORCED METHOD
// ============================================================================

/// A method wrapper that enforces registered parameter rules on every call.
///
/// Per call: rules are read from the registry and evaluated in stored
/// (index-ascending) order against the supplied arguments, failing fast on
/// the first violation; only if all pass does the original closure run,
/// with the original receiver and arguments, its result returned unchanged.
///
/// Rules whose index is beyond the supplied argument list are skipped —
/// absence of an optional trailing argument is not itself a violation.
#[derive(Debug)]
pub struct Enforced<'r, T, F> {
    owner: OwnerId,
    method: MethodKey,
    registry: &'r Registry,
    inner: F,
    _marker: PhantomData<fn(&T)>,
}

impl<'r, T, F> Enforced<'r, T, F>
where
    T: 'static,
{
    /// The owner type this wrapper enforces rules for.
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// The method key this wrapper enforces rules for.
    #[must_use]
    pub fn method(&self) -> MethodKey {
        self.method
    }

    /// Invokes the wrapped method.
    ///
    /// # Errors
    ///
    /// The first failing rule's `ValidationError`, in ascending parameter
    /// index order; the original closure does not run in that case. A
    /// method with no registered rules behaves as if unwrapped.
    pub fn call<R>(&self, receiver: &T, args: &[ArgValue]) -> ValidationResult<R>
    where
        F: Fn(&T, &[ArgValue]) -> R,
    {
        for rule in self.registry.rules_for(self.owner, self.method) {
            if let Some(value) = args.get(rule.index()) {
                rule.enforce(value)?;
            }
        }
        Ok((self.inner)(receiver, args))
    }
}

/// Wraps a method implementation with rule enforcement against the
/// process-wide registry.
///
/// The closure receives the receiver and the raw argument list; its return
/// value passes through [`Enforced::call`] unchanged.
pub fn enforce<T, F, R>(method: MethodKey, inner: F) -> Enforced<'static, T, F>
where
    T: 'static,
    F: Fn(&T, &[ArgValue]) -> R,
{
    enforce_with(Registry::global(), method, inner)
}

/// Wraps a method implementation with rule enforcement against a specific
/// registry.
pub fn enforce_with<'r, T, F, R>(
    registry: &'r Registry,
    method: MethodKey,
    inner: F,
) -> Enforced<'r, T, F>
where
    T: 'static,
    F: Fn(&T, &[ArgValue]) -> R,
{
    Enforced {
        owner: OwnerId::of::<T>(),
        method,
        registry,
        inner,
        _marker: PhantomData,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{is_number, is_string};
    use serde_json::json;
    use std::cell::Cell;

    struct Sample;

    #[test]
    fn test_undecorated_method_passes_through() {
        let registry = Registry::new();
        let wrapped = enforce_with::<Sample, _, _>(&registry, "free", |_this, args| args.len());
        assert_eq!(wrapped.call(&Sample, &[json!(1), json!(2)]).unwrap(), 2);
    }

    #[test]
    fn test_rejection_skips_original_body() {
        let registry = Registry::new();
        let _ = registry.method::<Sample>("f").param(0, is_number());

        let calls = Cell::new(0);
        let wrapped = enforce_with::<Sample, _, _>(&registry, "f", |_this, _args| {
            calls.set(calls.get() + 1);
        });

        assert!(wrapped.call(&Sample, &[json!("no")]).is_err());
        assert_eq!(calls.get(), 0);

        assert!(wrapped.call(&Sample, &[json!(1)]).is_ok());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_first_failing_index_reported() {
        let registry = Registry::new();
        let _ = registry
            .method::<Sample>("f")
            .param(1, is_string())
            .param(0, is_number());

        let wrapped = enforce_with::<Sample, _, _>(&registry, "f", |_this, _args| ());
        // Both indices fail; index 0 is reported because enforcement runs
        // in ascending index order regardless of registration order.
        let err = wrapped.call(&Sample, &[json!("x"), json!(7)]).unwrap_err();
        assert_eq!(err.param("index"), Some("0"));
    }

    #[test]
    fn test_out_of_range_rule_is_skipped() {
        let registry = Registry::new();
        let _ = registry.method::<Sample>("f").param(5, is_number());

        let wrapped = enforce_with::<Sample, _, _>(&registry, "f", |_this, args| args.len());
        assert_eq!(wrapped.call(&Sample, &[json!(1), json!(2)]).unwrap(), 2);
    }

    #[test]
    fn test_receiver_identity_preserved() {
        struct Counter {
            base: usize,
        }

        let registry = Registry::new();
        let wrapped =
            enforce_with::<Counter, _, _>(&registry, "add", |this, args| {
                this.base + args.len()
            });
        let counter = Counter { base: 10 };
        assert_eq!(wrapped.call(&counter, &[json!(1)]).unwrap(), 11);
    }
}
