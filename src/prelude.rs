//! Convenient imports for the common consumer surface.
//!
//! # Examples
//!
//! ```rust,ignore
//! use param_guard::prelude::*;
//!
//! rules::<Calculator>("scale")
//!     .param(0, is_number())
//!     .param(1, is_string());
//!
//! let scale = enforce::<Calculator, _, _>("scale", |_this, args| args.len());
//! ```

pub use crate::enforce::{Enforced, enforce, enforce_with};
pub use crate::foundation::{Validate, ValidationError, ValidationResult};
pub use crate::registry::{MethodKey, MethodRules, OwnerId, Registry, RegistryError, rules};
pub use crate::rule::{
    ArgValue, ParamRule, ParamSpec, ParamValidator, is_number, is_string, param_validator,
};
pub use crate::structural::{
    ConstraintViolation, Schema, SchemaEngine, StructuralEngine, Structured, Violations, schema,
    schema_with,
};
pub use crate::validators::{
    email, matches_regex, max_length, min, min_length, not_empty, positive,
};
