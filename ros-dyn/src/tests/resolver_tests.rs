//! Tests for definition resolution and the schema registry.

use std::sync::Arc;

use crate::error::DynamicError;
use crate::provider::{DefinitionProvider, StaticProvider};
use crate::resolver::DefinitionResolver;
use crate::schema::{Arity, FieldType, PrimitiveType};

use super::test_factory;

fn resolver_with(definitions: &[(&str, &str)]) -> DefinitionResolver {
    let provider = Arc::new(StaticProvider::new());
    for (name, source) in definitions {
        provider.add(*name, *source);
    }
    DefinitionResolver::new(provider)
}

#[test]
fn test_resolve_primitive_fields() {
    let resolver = resolver_with(&[("std_msgs/Int32", "int32 data")]);

    let schema = resolver.resolve("std_msgs/Int32").unwrap();
    assert_eq!(schema.type_name, "std_msgs/Int32");
    assert_eq!(schema.fields.len(), 1);
    assert_eq!(schema.fields[0].name, "data");
    assert_eq!(
        schema.fields[0].field_type,
        FieldType::Primitive(PrimitiveType::Int32)
    );
    assert_eq!(schema.fields[0].arity, Arity::Scalar);
}

#[test]
fn test_resolution_is_memoized() {
    let resolver = resolver_with(&[("std_msgs/Int32", "int32 data")]);

    let first = resolver.resolve("std_msgs/Int32").unwrap();
    let second = resolver.resolve("std_msgs/Int32").unwrap();

    // Within one resolver both handles are the identical object.
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(resolver.registry().len(), 1);
}

#[test]
fn test_independent_resolvers_build_equal_schemas() {
    let a = resolver_with(&[("std_msgs/Int32", "int32 data")]);
    let b = resolver_with(&[("std_msgs/Int32", "int32 data")]);

    let left = a.resolve("std_msgs/Int32").unwrap();
    let right = b.resolve("std_msgs/Int32").unwrap();

    assert!(!Arc::ptr_eq(&left, &right));
    assert_eq!(*left, *right);
}

#[test]
fn test_resolve_nested_reference() {
    let resolver = resolver_with(&[
        ("foo/foo", "std_msgs/String data"),
        ("std_msgs/String", "string data"),
    ]);

    let schema = resolver.resolve("foo/foo").unwrap();
    let nested = match &schema.fields[0].field_type {
        FieldType::Message(nested) => nested,
        other => panic!("expected nested message, got {:?}", other),
    };
    assert_eq!(nested.type_name, "std_msgs/String");

    // The nested schema shares the cache entry.
    let direct = resolver.resolve("std_msgs/String").unwrap();
    assert!(Arc::ptr_eq(nested, &direct));
    assert_eq!(resolver.registry().len(), 2);
}

#[test]
fn test_bare_reference_qualified_against_enclosing_package() {
    let resolver = resolver_with(&[
        ("foo/Outer", "Inner data"),
        ("foo/Inner", "int32 data"),
    ]);

    let schema = resolver.resolve("foo/Outer").unwrap();
    match &schema.fields[0].field_type {
        FieldType::Message(nested) => assert_eq!(nested.type_name, "foo/Inner"),
        other => panic!("expected nested message, got {:?}", other),
    }
}

#[test]
fn test_missing_definition() {
    let resolver = resolver_with(&[]);

    match resolver.resolve("nowhere/Missing") {
        Err(DynamicError::DefinitionNotFound(name)) => assert_eq!(name, "nowhere/Missing"),
        other => panic!("expected DefinitionNotFound, got {:?}", other),
    }
}

#[test]
fn test_missing_nested_definition_not_cached() {
    let provider = Arc::new(StaticProvider::new());
    provider.add("foo/Outer", "foo/Inner data");
    let resolver = DefinitionResolver::new(provider.clone());

    assert!(matches!(
        resolver.resolve("foo/Outer"),
        Err(DynamicError::DefinitionNotFound(_))
    ));
    // Nothing partial was retained.
    assert!(resolver.registry().is_empty());

    // Registering the missing dependency makes a retry succeed.
    provider.add("foo/Inner", "int32 data");
    assert!(resolver.resolve("foo/Outer").is_ok());
    assert_eq!(resolver.registry().len(), 2);
}

#[test]
fn test_self_referential_definition() {
    let resolver = resolver_with(&[("foo/Loop", "foo/Loop next")]);

    assert!(matches!(
        resolver.resolve("foo/Loop"),
        Err(DynamicError::CyclicDefinition(_))
    ));
    assert!(resolver.registry().is_empty());
}

#[test]
fn test_mutually_recursive_definitions() {
    let resolver = resolver_with(&[("foo/A", "foo/B other"), ("foo/B", "foo/A other")]);

    assert!(matches!(
        resolver.resolve("foo/A"),
        Err(DynamicError::CyclicDefinition(_))
    ));
}

#[test]
fn test_diamond_dependency_is_not_a_cycle() {
    // Outer references Shared twice through two intermediates; Shared is
    // resolved once and shared, not reported as a cycle.
    let resolver = resolver_with(&[
        ("foo/Outer", "foo/Left left\nfoo/Right right"),
        ("foo/Left", "foo/Shared shared"),
        ("foo/Right", "foo/Shared shared"),
        ("foo/Shared", "int32 data"),
    ]);

    let schema = resolver.resolve("foo/Outer").unwrap();
    assert_eq!(schema.fields.len(), 2);
    assert_eq!(resolver.registry().len(), 4);
}

#[test]
fn test_parse_failure_propagates_and_is_not_cached() {
    let provider = Arc::new(StaticProvider::new());
    provider.add("foo/Broken", "int32 CONST = 7");
    let resolver = DefinitionResolver::new(provider.clone());

    assert!(matches!(
        resolver.resolve("foo/Broken"),
        Err(DynamicError::Parse { .. })
    ));
    assert!(resolver.registry().is_empty());

    provider.add("foo/Broken", "int32 data");
    assert!(resolver.resolve("foo/Broken").is_ok());
}

#[test]
fn test_resolve_rejects_unqualified_type_name() {
    let resolver = resolver_with(&[]);
    assert!(matches!(
        resolver.resolve("Int32"),
        Err(DynamicError::InvalidTypeName(_))
    ));
}

#[test]
fn test_registry_introspection() {
    let resolver = resolver_with(&[
        ("std_msgs/Int32", "int32 data"),
        ("std_msgs/String", "string data"),
    ]);

    assert!(resolver.registry().is_empty());
    resolver.resolve("std_msgs/Int32").unwrap();
    resolver.resolve("std_msgs/String").unwrap();

    let registry = resolver.registry();
    assert_eq!(registry.len(), 2);
    assert!(registry.contains("std_msgs/Int32"));
    assert!(!registry.contains("std_msgs/Bool"));

    let mut names = registry.type_names();
    names.sort();
    assert_eq!(names, ["std_msgs/Int32", "std_msgs/String"]);

    registry.clear();
    assert!(registry.is_empty());
}

#[test]
fn test_provider_lookup_contract() {
    let provider = StaticProvider::new();
    provider.add("std_msgs/Int32", "int32 data");

    assert_eq!(provider.lookup("std_msgs/Int32").unwrap(), "int32 data");
    assert!(matches!(
        provider.lookup("std_msgs/Bool"),
        Err(DynamicError::DefinitionNotFound(_))
    ));
}

#[test]
fn test_factory_builds_empty_bound_container() {
    let (_provider, factory) = test_factory();

    let msg = factory.new_from_type("std_msgs/Int32").unwrap();
    assert_eq!(msg.identifier(), "std_msgs/Int32");
    assert!(!msg.is_fully_set());
}

#[test]
fn test_factory_shares_schemas_between_messages() {
    let (_provider, factory) = test_factory();

    let a = factory.new_from_type("std_msgs/Int32").unwrap();
    let b = factory.new_from_type("std_msgs/Int32").unwrap();
    assert!(Arc::ptr_eq(&a.schema_arc(), &b.schema_arc()));
}
