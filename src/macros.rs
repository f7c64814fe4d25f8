//! Macros for creating constraint validators with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`constraint!`] — Create a complete constraint validator
//!   (struct + `Validate` impl + factory fn)
//!
//! # Examples
//!
//! ```rust,ignore
//! use param_guard::constraint;
//! use param_guard::foundation::{Validate, ValidationError};
//!
//! // Unit validator (no fields)
//! constraint! {
//!     pub NotEmpty for str;
//!     rule(input) { !input.is_empty() }
//!     error(input) { ValidationError::new("not_empty", "must not be empty") }
//!     fn not_empty();
//! }
//!
//! // Struct with fields
//! constraint! {
//!     pub MinLength { min: usize } for str;
//!     rule(self, input) { input.chars().count() >= self.min }
//!     error(self, input) {
//!         ValidationError::new("min_length", format!("must be at least {} characters", self.min))
//!     }
//!     fn min_length(min: usize);
//! }
//! ```

// ============================================================================
// CONSTRAINT MACRO
// ============================================================================

/// Creates a complete constraint validator: struct definition, `Validate`
/// implementation, constructor, and snake_case factory function.
///
/// `#[derive(Debug, Clone)]` is always applied (unit validators also get
/// `Copy`, `PartialEq`, `Eq`, `Hash`).
///
/// # Variants
///
/// **Unit validator** (zero-sized, no fields):
/// ```rust,ignore
/// constraint! {
///     pub NotEmpty for str;
///     rule(input) { !input.is_empty() }
///     error(input) { ValidationError::new("not_empty", "must not be empty") }
///     fn not_empty();
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// constraint! {
///     pub MinLength { min: usize } for str;
///     rule(self, input) { input.chars().count() >= self.min }
///     error(self, input) { ValidationError::new("min_length", "too short") }
///     fn min_length(min: usize);
/// }
/// ```
///
/// **Custom constructor** (overrides auto `new`):
/// ```rust,ignore
/// constraint! {
///     pub Email { pattern: regex::Regex } for str;
///     rule(self, input) { self.pattern.is_match(input) }
///     error(self, input) { ValidationError::new("email", "must be an email") }
///     new() { Self { pattern: EMAIL_REGEX.clone() } }
///     fn email();
/// }
/// ```
#[macro_export]
macro_rules! constraint {
    // ── Variant 1: Unit validator (no fields) ────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(
                &self,
                $inp: &Self::Input,
            ) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }

        #[must_use]
        $vis const fn $factory() -> $name {
            $name
        }
    };

    // ── Variant 2: Struct with fields + auto `new` ───────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident : $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        fn $factory:ident($($farg:ident : $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $($field: $fty),+
        }

        impl $name {
            /// Creates the validator from its fields.
            #[must_use]
            $vis fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        $crate::constraint!(@validate $name, $input;
            rule($self_, $inp) $rule
            error($self2, $einp) $err
        );

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 3: Struct with fields + custom `new` ─────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident : $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        new($($narg:ident : $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident : $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $($field: $fty),+
        }

        #[allow(clippy::new_without_default)]
        impl $name {
            /// Creates the validator.
            #[must_use]
            $vis fn new($($narg: $naty),*) -> Self $new_body
        }

        $crate::constraint!(@validate $name, $input;
            rule($self_, $inp) $rule
            error($self2, $einp) $err
        );

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Internal: shared Validate impl ───────────────────────────────────
    (@validate $name:ident, $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
    ) => {
        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(
                &$self_,
                $inp: &Self::Input,
            ) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };
}

// ============================================================================
// TESTS
// ============================================================================
