//! Structural validation round-trip tests
//!
//! Mirrors the consumer flow: a deserializable form type describes its own
//! field constraints, a schema rule guards the method parameter, and the
//! method body receives a value it can shape into the typed instance.

use param_guard::prelude::*;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;

// ============================================================================
// FORM TYPE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct DataForm {
    email: String,
}

impl Structured for DataForm {
    const NAME: &'static str = "DataForm";

    fn violations(&self) -> Vec<ConstraintViolation> {
        let mut v = Violations::new();
        v.field("email", not_empty(), self.email.as_str());
        v.field("email", email(), self.email.as_str());
        v.into_vec()
    }
}

struct Service;

fn submit() -> Enforced<'static, Service, impl Fn(&Service, &[ArgValue]) -> Option<DataForm>> {
    static REGISTERED: std::sync::Once = std::sync::Once::new();
    REGISTERED.call_once(|| {
        let _ = rules::<Service>("submit").param(0, schema::<DataForm>());
    });
    enforce::<Service, _, _>("submit", |_this, args| {
        // Validation already passed, so the shape is known good.
        serde_json::from_value(args[0].clone()).ok()
    })
}

// ============================================================================
// ROUND TRIP
// ============================================================================

#[test]
fn valid_value_reaches_the_body_as_typed_instance() {
    let method = submit();
    let form = method
        .call(&Service, &[json!({"email": "test@test.com"})])
        .unwrap()
        .unwrap();
    assert_eq!(
        form,
        DataForm {
            email: "test@test.com".to_owned()
        }
    );
}

#[test]
fn empty_field_reports_both_constraints_in_one_message() {
    let method = submit();
    let err = method.call(&Service, &[json!({"email": ""})]).unwrap_err();
    assert_eq!(
        err.message,
        "Validation failed for DataForm: email must not be empty, email must be an email"
    );
    assert_eq!(err.code, "schema_invalid");

    // Structured consumers get the individual constraints as nested errors.
    assert_eq!(err.nested.len(), 2);
    assert_eq!(err.nested[0].code, "not_empty");
    assert_eq!(err.nested[1].code, "email");
    assert_eq!(err.nested[0].field.as_deref(), Some("email"));
}

#[test]
fn malformed_field_reports_only_the_failing_constraint() {
    let method = submit();
    let err = method
        .call(&Service, &[json!({"email": "not-an-email"})])
        .unwrap_err();
    assert_eq!(
        err.message,
        "Validation failed for DataForm: email must be an email"
    );
}

#[test]
fn unshapeable_value_fails_at_transform() {
    let method = submit();
    let err = method.call(&Service, &[json!([1, 2, 3])]).unwrap_err();
    assert_eq!(err.code, "transform");
    assert!(err.message.starts_with("Validation failed for DataForm"));
}

// ============================================================================
// DEFERRED ENGINE FORM
// ============================================================================

#[test]
fn deferred_schema_resolves_at_first_call_not_registration() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct LateService;
    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    let _ = rules::<LateService>("submit").param(
        0,
        Schema::deferred(|| {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            SchemaEngine::<DataForm>::new()
        }),
    );
    assert_eq!(BUILDS.load(Ordering::SeqCst), 0);

    let method = enforce::<LateService, _, _>("submit", |_this, _args| ());
    assert!(method.call(&LateService, &[json!({"email": "a@b.com"})]).is_ok());
    assert!(method.call(&LateService, &[json!({"email": ""})]).is_err());
    assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
}

// ============================================================================
// MIXED SCALAR AND STRUCTURAL RULES
// ============================================================================

#[test]
fn scalar_and_structural_rules_coexist_on_one_method() {
    struct Mixed;

    let _ = rules::<Mixed>("store")
        .param(0, is_string())
        .param(1, schema::<DataForm>());
    let store = enforce::<Mixed, _, _>("store", |_this, _args| ());

    let form = json!({"email": "a@b.com"});
    assert!(store.call(&Mixed, &[json!("key"), form.clone()]).is_ok());

    // Index 0 fails first even though index 1 would also fail.
    let err = store
        .call(&Mixed, &[json!(7), json!({"email": ""})])
        .unwrap_err();
    assert_eq!(err.param("index"), Some("0"));
}
