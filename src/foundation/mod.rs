//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation
//! system:
//!
//! - **Traits**: `Validate`
//! - **Errors**: `ValidationError`
//!
//! # Architecture
//!
//! ## Type Safety
//!
//! Constraint validators are generic over their input type, providing
//! compile-time guarantees:
//!
//! ```rust,ignore
//! use param_guard::foundation::Validate;
//!
//! struct MinLength { min: usize }
//!
//! impl Validate for MinLength {
//!     type Input = str;  // Only validates strings
//!
//!     fn validate(&self, input: &str) -> Result<(), ValidationError> {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Rich Error Information
//!
//! Errors are structured and contain detailed information:
//!
//! ```rust,ignore
//! let error = ValidationError::new("min_length", "Too short")
//!     .with_field("username")
//!     .with_param("min", "5");
//! ```

// Module declarations
pub mod error;
pub mod traits;

// Re-export everything at the foundation level for convenience
pub use error::ValidationError;
pub use traits::Validate;

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// A validation result using the standard `ValidationError`.
pub type ValidationResult<T> = Result<T, ValidationError>;
