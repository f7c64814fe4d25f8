//! Metadata registry for parameter rules
//!
//! The registry is a side table mapping an owner type and a method key to
//! the ordered list of [`ParamRule`]s registered for that method. It is
//! populated during a composition phase (before the first call) and read
//! by the enforcement wrapper on every invocation.
//!
//! Owner identity is a [`TypeId`]: the table holds no owner data, so it can
//! never keep an owner's state alive.
//!
//! # Sealing
//!
//! Once the enforcement wrapper reads a method's rule list, that entry is
//! sealed: registering further rules for it is a composition bug and is
//! rejected with [`RegistryError::Sealed`]. This makes the
//! single-writer-phase invariant explicit instead of conventional.
//!
//! # Examples
//!
//! ```rust,ignore
//! use param_guard::prelude::*;
//!
//! struct Calculator;
//!
//! rules::<Calculator>("scale")
//!     .param(0, is_number())
//!     .param(1, is_string());
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{OnceLock, RwLock};

use crate::rule::{ParamRule, ParamSpec};

/// Identifier of a decorated method, unique per owner.
pub type MethodKey = &'static str;

// ============================================================================
// OWNER IDENTITY
// ============================================================================

/// Opaque, non-owning identity of an owner type.
///
/// Wraps the owner's [`TypeId`] plus its type name for diagnostics. Two
/// `OwnerId`s are equal exactly when they identify the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId {
    id: TypeId,
    name: &'static str,
}

impl OwnerId {
    /// Returns the identity of owner type `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The owner's type name (diagnostic only, not part of identity).
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ============================================================================
// REGISTRY ERROR
// ============================================================================

/// Errors raised by registry mutation.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The method's rule list was already read by the enforcement wrapper;
    /// rules must be registered before the first call.
    #[error("method `{method}` on `{owner}` is sealed; rules cannot be added after enforcement has started")]
    Sealed {
        /// Owner type name.
        owner: &'static str,
        /// Method key whose entry is sealed.
        method: MethodKey,
    },
}

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Debug, Default)]
struct MethodEntry {
    rules: Vec<ParamRule>,
    sealed: AtomicBool,
}

/// The side table associating owners and method keys with rule lists.
///
/// A process-wide instance is available through [`Registry::global`];
/// independent instances (for tests, or for scoped rule sets) are created
/// with [`Registry::new`].
#[derive(Debug, Default)]
pub struct Registry {
    inner: RwLock<HashMap<OwnerId, HashMap<MethodKey, MethodEntry>>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry.
    #[must_use]
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// Returns true if any method of `owner` has registered rules.
    #[must_use]
    pub fn contains(&self, owner: OwnerId) -> bool {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .contains_key(&owner)
    }

    /// Returns the method keys registered for `owner`, or empty if none.
    #[must_use]
    pub fn method_keys(&self, owner: OwnerId) -> Vec<MethodKey> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&owner)
            .map(|methods| methods.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Appends one rule for `(owner, method)`.
    ///
    /// The rule list is kept ordered by ascending parameter index, stable
    /// for equal indices, so enforcement order does not depend on the order
    /// registration calls happened to run in. Existing rules are never
    /// overwritten.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Sealed`] if the method's rules were already read by
    /// the enforcement wrapper.
    pub fn append(
        &self,
        owner: OwnerId,
        method: MethodKey,
        rule: ParamRule,
    ) -> Result<(), RegistryError> {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let entry = inner
            .entry(owner)
            .or_default()
            .entry(method)
            .or_default();
        if entry.sealed.load(Ordering::Acquire) {
            return Err(RegistryError::Sealed {
                owner: owner.name(),
                method,
            });
        }
        let pos = entry.rules.partition_point(|r| r.index() <= rule.index());
        entry.rules.insert(pos, rule);
        Ok(())
    }

    /// Returns the ordered rule list for `(owner, method)`, empty if none
    /// were registered.
    ///
    /// Reading seals the entry: the composition phase for that method is
    /// over, and later [`append`](Registry::append) calls are rejected.
    #[must_use]
    pub fn rules_for(&self, owner: OwnerId, method: MethodKey) -> Vec<ParamRule> {
        let inner = self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match inner.get(&owner).and_then(|methods| methods.get(method)) {
            Some(entry) => {
                entry.sealed.store(true, Ordering::Release);
                entry.rules.clone()
            }
            None => Vec::new(),
        }
    }

    /// Starts a registration builder for a method of owner type `T` on this
    /// registry.
    pub fn method<T: 'static>(&self, method: MethodKey) -> MethodRules<'_> {
        MethodRules {
            registry: self,
            owner: OwnerId::of::<T>(),
            method,
        }
    }
}

// ============================================================================
// REGISTRATION BUILDER
// ============================================================================

/// Fluent registration surface for one method's parameter rules.
///
/// Each [`param`](MethodRules::param) call appends one rule; repeated calls
/// for the same index accumulate as multiple required rules.
#[derive(Debug)]
pub struct MethodRules<'r> {
    registry: &'r Registry,
    owner: OwnerId,
    method: MethodKey,
}

impl MethodRules<'_> {
    /// Registers one rule for the parameter at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the method's entry is already sealed. Registration after
    /// the first invocation is a composition bug, not a recoverable
    /// condition.
    #[must_use = "further .param() calls are usually chained; bind to _ to finish"]
    pub fn param(self, index: usize, spec: impl ParamSpec) -> Self {
        if let Err(err) = self
            .registry
            .append(self.owner, self.method, spec.into_rule(index))
        {
            panic!("{err}");
        }
        self
    }

    /// The owner this builder registers rules for.
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// The method key this builder registers rules for.
    #[must_use]
    pub fn method(&self) -> MethodKey {
        self.method
    }
}

/// Starts a registration builder for a method of owner type `T` on the
/// process-wide registry.
///
/// # Examples
///
/// ```rust,ignore
/// rules::<Calculator>("scale")
///     .param(0, is_number())
///     .param(1, is_string().with_message("Custom string message"));
/// ```
pub fn rules<T: 'static>(method: MethodKey) -> MethodRules<'static> {
    Registry::global().method::<T>(method)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{is_number, is_string};
    use serde_json::json;

    struct Widget;
    struct Gadget;

    #[test]
    fn test_owner_identity_is_per_type() {
        assert_eq!(OwnerId::of::<Widget>(), OwnerId::of::<Widget>());
        assert_ne!(OwnerId::of::<Widget>(), OwnerId::of::<Gadget>());
    }

    #[test]
    fn test_rules_for_unregistered_is_empty() {
        let registry = Registry::new();
        assert!(registry.rules_for(OwnerId::of::<Widget>(), "missing").is_empty());
        assert!(!registry.contains(OwnerId::of::<Widget>()));
    }

    #[test]
    fn test_append_keeps_index_order() {
        let registry = Registry::new();
        let _ = registry
            .method::<Widget>("f")
            .param(2, is_number())
            .param(0, is_string())
            .param(1, is_number());
        let rules = registry.rules_for(OwnerId::of::<Widget>(), "f");
        let indices: Vec<usize> = rules.iter().map(ParamRule::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_same_index_accumulates_in_registration_order() {
        let registry = Registry::new();
        let _ = registry
            .method::<Widget>("f")
            .param(0, is_number().with_message("first"))
            .param(0, is_number().with_message("second"));
        let rules = registry.rules_for(OwnerId::of::<Widget>(), "f");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].message(), "first");
        assert_eq!(rules[1].message(), "second");
    }

    #[test]
    fn test_methods_are_independent() {
        let registry = Registry::new();
        let _ = registry.method::<Widget>("f").param(0, is_number());
        let _ = registry.method::<Widget>("g").param(0, is_string());
        let owner = OwnerId::of::<Widget>();
        assert_eq!(registry.rules_for(owner, "f").len(), 1);
        assert_eq!(registry.rules_for(owner, "g").len(), 1);
        let mut keys = registry.method_keys(owner);
        keys.sort_unstable();
        assert_eq!(keys, vec!["f", "g"]);
    }

    #[test]
    fn test_sealed_after_first_read() {
        let registry = Registry::new();
        let owner = OwnerId::of::<Widget>();
        registry
            .append(owner, "f", is_number().into_rule(0))
            .unwrap();
        let rules = registry.rules_for(owner, "f");
        assert!(rules[0].enforce(&json!(1)).is_ok());

        let err = registry
            .append(owner, "f", is_string().into_rule(1))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Sealed { method: "f", .. }));
    }

    #[test]
    fn test_sealing_is_per_method() {
        let registry = Registry::new();
        let owner = OwnerId::of::<Widget>();
        registry
            .append(owner, "f", is_number().into_rule(0))
            .unwrap();
        let _ = registry.rules_for(owner, "f");

        // "g" was never read, so it still accepts rules.
        assert!(registry.append(owner, "g", is_string().into_rule(0)).is_ok());
    }
}
