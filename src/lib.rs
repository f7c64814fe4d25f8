//! # param-guard
//!
//! Declarative per-parameter validation for methods, enforced at call time.
//!
//! Rules are attached to a method during a composition phase and enforced
//! automatically on every invocation; the method body itself carries no
//! validation code.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use param_guard::prelude::*;
//! use serde_json::json;
//!
//! struct Calculator;
//!
//! // Composition phase: register rules per parameter index.
//! rules::<Calculator>("scale")
//!     .param(0, is_number())
//!     .param(1, is_string().with_message("Custom string message"));
//!
//! // Wrap the method; the closure is the original implementation.
//! let scale = enforce::<Calculator, _, _>("scale", |_this, args| {
//!     format!("{} - {}", args[0], args[1])
//! });
//!
//! let calc = Calculator;
//! assert!(scale.call(&calc, &[json!(42), json!("test")]).is_ok());
//! assert!(scale.call(&calc, &[json!("oops"), json!(42)]).is_err());
//! ```
//!
//! ## Structural rules
//!
//! Object-shaped arguments are validated field by field through a
//! [`Schema`](structural::Schema) rule; see the [`structural`] module.
//!
//! ## Creating Validators
//!
//! Use [`param_validator`](rule::param_validator) for new parameter
//! predicates, and the [`constraint!`] macro for new field-level
//! constraint validators.

// ValidationError is returned by every rule check; boxing it would put an
// allocation on the failure path of each enforced call.
#![allow(clippy::result_large_err)]

pub mod enforce;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod registry;
pub mod rule;
pub mod structural;
pub mod validators;
