//! Field-level constraint validators
//!
//! These validators implement [`Validate`](crate::foundation::Validate) and
//! are meant for use inside
//! [`Structured::violations`](crate::structural::Structured) implementations,
//! where each failing constraint becomes one entry of a
//! [`ConstraintViolation`](crate::structural::ConstraintViolation).
//!
//! - **String**: [`NotEmpty`], [`MinLength`], [`MaxLength`], [`Email`],
//!   [`MatchesRegex`]
//! - **Numeric**: [`Min`], [`Positive`]

pub mod content;
pub mod length;
pub mod numeric;

// Re-export length validators
pub use length::{MaxLength, MinLength, NotEmpty, max_length, min_length, not_empty};

// Re-export content validators
pub use content::{Email, MatchesRegex, email, matches_regex};

// Re-export numeric validators
pub use numeric::{Min, Positive, min, positive};
