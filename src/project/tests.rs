//! Tests for attribute projection

use super::*;
use crate::config::ResourceConfig;
use crate::context::RequestContext;
use crate::cursor::Cursor;
use crate::error::Error;
use crate::page::ResolvedWindow;
use crate::typecast::TypeRegistry;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn config() -> ResourceConfig {
    ResourceConfig::new("employees")
}

fn registry() -> TypeRegistry {
    TypeRegistry::builtin()
}

fn record() -> Value {
    json!({
        "id": 7,
        "name": "Jane",
        "age": "41",
        "salary": 90000
    })
}

fn project_one(
    config: &ResourceConfig,
    declaration: &AttributeDeclaration,
    context: &RequestContext,
) -> crate::Result<Projected> {
    let registry = registry();
    AttributeProjector::new(config, &registry).project(declaration, &record(), context)
}

// ============================================================================
// Visibility Tests
// ============================================================================

#[test]
fn test_always_readable_is_projected() {
    let decl = AttributeDeclaration::new("name", "string");
    let projected = project_one(&config(), &decl, &RequestContext::new()).unwrap();
    assert_eq!(projected.value(), Some(&json!("Jane")));
}

#[test]
fn test_never_readable_is_omitted_without_error() {
    let decl = AttributeDeclaration::new("name", "string").with_readable(ReadGuard::Never);
    // Even in a structured-query context.
    let projected = project_one(&config(), &decl, &RequestContext::structured()).unwrap();
    assert!(projected.is_omitted());
}

#[test]
fn test_falsy_guard_omits_in_plain_context() {
    let decl = AttributeDeclaration::new("salary", "integer")
        .with_readable(ReadGuard::context_free(|| false));
    let projected = project_one(&config(), &decl, &RequestContext::new()).unwrap();
    assert!(projected.is_omitted());
}

#[test]
fn test_falsy_guard_fails_in_structured_context() {
    let decl = AttributeDeclaration::new("salary", "integer")
        .with_readable(ReadGuard::context_free(|| false));
    let err = project_one(&config(), &decl, &RequestContext::structured()).unwrap_err();
    match err {
        Error::UnreadableAttribute {
            resource,
            attribute,
        } => {
            assert_eq!(resource, "employees");
            assert_eq!(attribute, "salary");
        }
        other => panic!("expected UnreadableAttribute, got {other:?}"),
    }
}

#[test]
fn test_truthy_guard_projects() {
    let decl = AttributeDeclaration::new("salary", "integer")
        .with_readable(ReadGuard::context_free(|| true));
    let projected = project_one(&config(), &decl, &RequestContext::structured()).unwrap();
    assert_eq!(projected.value(), Some(&json!(90000)));
}

#[test]
fn test_record_aware_guard_sees_the_record() {
    let decl = AttributeDeclaration::new("salary", "integer").with_readable(
        ReadGuard::record_aware(|record| record["name"] == json!("Jane")),
    );
    let projected = project_one(&config(), &decl, &RequestContext::new()).unwrap();
    assert_eq!(projected.value(), Some(&json!(90000)));
}

#[test]
fn test_field_aware_guard_sees_the_attribute_name() {
    let decl = AttributeDeclaration::new("salary", "integer").with_readable(
        ReadGuard::field_aware(|_record, name| name != "salary"),
    );
    let projected = project_one(&config(), &decl, &RequestContext::new()).unwrap();
    assert!(projected.is_omitted());
}

// ============================================================================
// Coercion Tests
// ============================================================================

#[test]
fn test_raw_value_is_coerced() {
    // Stored as a string, declared integer.
    let decl = AttributeDeclaration::new("age", "integer");
    let projected = project_one(&config(), &decl, &RequestContext::new()).unwrap();
    assert_eq!(projected.value(), Some(&json!(41)));
}

#[test]
fn test_missing_field_reads_as_null_and_skips_coercion() {
    let decl = AttributeDeclaration::new("nickname", "integer");
    let projected = project_one(&config(), &decl, &RequestContext::new()).unwrap();
    // A null never reaches the coercion function, so no TypecastFailed.
    assert_eq!(projected.value(), Some(&Value::Null));
}

#[test]
fn test_coercion_failure_carries_raw_value_and_cause() {
    let decl = AttributeDeclaration::new("name", "integer");
    let err = project_one(&config(), &decl, &RequestContext::new()).unwrap_err();
    match err {
        Error::TypecastFailed {
            resource,
            attribute,
            value,
            type_name,
            source,
        } => {
            assert_eq!(resource, "employees");
            assert_eq!(attribute, "name");
            assert_eq!(value, json!("Jane"));
            assert_eq!(type_name, "integer");
            assert!(source.to_string().contains("not an integer"));
        }
        other => panic!("expected TypecastFailed, got {other:?}"),
    }
}

#[test]
fn test_typecast_reads_disabled_passes_raw_through() {
    let config = config().with_typecast_reads(false);
    let decl = AttributeDeclaration::new("age", "integer");
    let projected = project_one(&config, &decl, &RequestContext::new()).unwrap();
    assert_eq!(projected.value(), Some(&json!("41")));
}

#[test]
fn test_unknown_type_fails() {
    let decl = AttributeDeclaration::new("name", "uuid");
    let err = project_one(&config(), &decl, &RequestContext::new()).unwrap_err();
    assert!(matches!(err, Error::UnknownType { .. }));
}

// ============================================================================
// Accessor Chain Tests
// ============================================================================

#[test]
fn test_custom_accessor_wins_over_field_read() {
    let decl = AttributeDeclaration::new("name", "string")
        .with_accessor(Accessor::custom(|record| {
            json!(format!("{} (staff)", record["name"].as_str().unwrap_or("")))
        }));
    let projected = project_one(&config(), &decl, &RequestContext::new()).unwrap();
    assert_eq!(projected.value(), Some(&json!("Jane (staff)")));
}

#[test]
fn test_serializer_block_output_still_coerced() {
    // A render block registered on the serializer yields a string; the
    // declared integer type still applies on its output.
    let decl = AttributeDeclaration::new("age", "integer")
        .with_accessor(Accessor::serializer(|_record| json!("42")));
    let projected = project_one(&config(), &decl, &RequestContext::new()).unwrap();
    assert_eq!(projected.value(), Some(&json!(42)));
}

#[test]
fn test_custom_accessor_output_still_coerced() {
    let decl = AttributeDeclaration::new("id", "integer_id")
        .with_accessor(Accessor::custom(|record| record["id"].clone()));
    let projected = project_one(&config(), &decl, &RequestContext::new()).unwrap();
    assert_eq!(projected.value(), Some(&json!("7")));
}

// ============================================================================
// Extra Attribute Tests
// ============================================================================

#[test]
fn test_extra_attribute_omitted_by_default() {
    let decl = AttributeDeclaration::new("salary", "integer").as_extra();
    let projected = project_one(&config(), &decl, &RequestContext::new()).unwrap();
    assert!(projected.is_omitted());
}

#[test]
fn test_extra_attribute_projected_when_requested() {
    let config = config();
    let registry = registry();
    let decl = AttributeDeclaration::new("salary", "integer").as_extra();
    let projected = AttributeProjector::new(&config, &registry)
        .with_extra_fields()
        .project(&decl, &record(), &RequestContext::new())
        .unwrap();
    assert_eq!(projected.value(), Some(&json!(90000)));
}

// ============================================================================
// Cursor Metadata Tests
// ============================================================================

fn window(number: u64, size: u64, starting_offset: u64) -> ResolvedWindow {
    ResolvedWindow {
        number,
        size,
        offset: starting_offset,
        starting_offset,
    }
}

#[test]
fn test_record_cursor_from_page_number() {
    let config = config().with_cursor_pagination();
    let registry = registry();
    // page 2, size 10: starting offset 10; position 3 encodes offset 14.
    let window = window(2, 10, 10);
    let projector = AttributeProjector::new(&config, &registry).with_window(&window);

    let token = projector.record_cursor(&window, 3).unwrap();
    assert_eq!(Cursor::decode(&token).unwrap().offset, Some(14));
}

#[test]
fn test_record_cursor_position_zero_is_one_based() {
    let config = config().with_cursor_pagination();
    let registry = registry();
    let window = window(1, 10, 0);
    let projector = AttributeProjector::new(&config, &registry).with_window(&window);

    let token = projector.record_cursor(&window, 0).unwrap();
    assert_eq!(Cursor::decode(&token).unwrap().offset, Some(1));
}

#[test]
fn test_record_cursor_saturates_near_max_offset() {
    let config = config().with_cursor_pagination();
    let registry = registry();
    let window = window(1, 10, u64::MAX - 1);
    let projector = AttributeProjector::new(&config, &registry).with_window(&window);

    // starting_offset + position + 1 would wrap; it must pin at u64::MAX.
    let token = projector.record_cursor(&window, 7).unwrap();
    assert_eq!(Cursor::decode(&token).unwrap().offset, Some(u64::MAX));
}

#[test]
fn test_project_record_attaches_meta_cursor() {
    let config = config().with_cursor_pagination();
    let registry = registry();
    let window = window(2, 10, 10);
    let declarations = vec![
        AttributeDeclaration::new("id", "integer_id"),
        AttributeDeclaration::new("name", "string"),
    ];

    let projected = AttributeProjector::new(&config, &registry)
        .with_window(&window)
        .project_record(&declarations, &record(), &RequestContext::new(), 3)
        .unwrap();

    assert_eq!(projected.attributes.get("id"), Some(&json!("7")));
    assert_eq!(projected.attributes.get("name"), Some(&json!("Jane")));
    let meta = projected.meta.expect("cursor meta");
    assert_eq!(Cursor::decode(&meta.cursor).unwrap().offset, Some(14));
}

#[test]
fn test_project_record_without_cursor_pagination_has_no_meta() {
    let config = config();
    let registry = registry();
    let window = window(2, 10, 10);
    let declarations = vec![AttributeDeclaration::new("name", "string")];

    let projected = AttributeProjector::new(&config, &registry)
        .with_window(&window)
        .project_record(&declarations, &record(), &RequestContext::new(), 3)
        .unwrap();
    assert!(projected.meta.is_none());
}

#[test]
fn test_project_record_without_window_has_no_meta() {
    let config = config().with_cursor_pagination();
    let registry = registry();
    let declarations = vec![AttributeDeclaration::new("name", "string")];

    let projected = AttributeProjector::new(&config, &registry)
        .project_record(&declarations, &record(), &RequestContext::new(), 3)
        .unwrap();
    assert!(projected.meta.is_none());
}

// ============================================================================
// Determinism Tests
// ============================================================================

#[test]
fn test_projection_is_deterministic() {
    let config = config().with_cursor_pagination();
    let registry = registry();
    let window = window(2, 10, 10);
    let declarations = vec![
        AttributeDeclaration::new("id", "integer_id"),
        AttributeDeclaration::new("name", "string"),
        AttributeDeclaration::new("age", "integer"),
    ];
    let projector = AttributeProjector::new(&config, &registry).with_window(&window);

    let first = projector
        .project_record(&declarations, &record(), &RequestContext::new(), 5)
        .unwrap();
    let second = projector
        .project_record(&declarations, &record(), &RequestContext::new(), 5)
        .unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
