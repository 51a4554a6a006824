mod common;

use common::*;
use crd_swagger::common::DefinitionKey;
use crd_swagger::config::GeneratorConfig;
use crd_swagger::converter::{generate_definitions, Diagnostic};
use crd_swagger::error::SourceError;
use crd_swagger::schema::StructuralSchema;
use crd_swagger::source::SchemaBundle;
use crd_swagger::swagger::GroupVersionKind;
use crd_swagger::Error;
use serde_json::json;

fn assert_closed(generation: &crd_swagger::converter::Generation) {
    for (key, schema) in &generation.document.definitions {
        for reference in schema.references() {
            let target = reference
                .strip_prefix("#/definitions/")
                .unwrap_or_else(|| panic!("{key}: malformed reference {reference}"));
            assert!(
                target.starts_with("io.k8s")
                    || generation
                        .document
                        .definitions
                        .contains_key(&DefinitionKey::new(target)),
                "{key}: dangling reference {reference}"
            );
        }
    }
}

#[test]
fn reference_cycle_emits_each_type_once() {
    let widget = StructuralSchema::object([("a", reference(V1, "A"))]);
    let mut bundle = example_bundle(widget);
    bundle.add_type(name(V1, "A"), StructuralSchema::object([("b", reference(V1, "B"))]));
    bundle.add_type(name(V1, "B"), StructuralSchema::object([("a", reference(V1, "A"))]));

    let generation = generate(&mut bundle);

    assert_eq!(
        keys(&generation),
        [
            "io.example.v1.A",
            "io.example.v1.B",
            "io.example.v1.Widget",
            "io.example.v1beta1.Gadget",
        ]
    );
    assert_eq!(
        serde_json::to_value(definition(&generation, "io.example.v1.B")).unwrap(),
        json!({
            "type": "object",
            "properties": {"a": {"$ref": "#/definitions/io.example.v1.A"}}
        })
    );
    assert_closed(&generation);
}

#[test]
fn self_reference_is_a_pointer() {
    let widget = StructuralSchema::object([("head", reference(V1, "Node"))]);
    let mut bundle = example_bundle(widget);
    bundle.add_type(
        name(V1, "Node"),
        StructuralSchema::object([("value", string()), ("next", reference(V1, "Node"))]),
    );

    let generation = generate(&mut bundle);
    let node = definition(&generation, "io.example.v1.Node");

    assert_eq!(
        property(node, "next").reference.as_deref(),
        Some("#/definitions/io.example.v1.Node")
    );
    assert_closed(&generation);
}

#[test]
fn foreign_types_are_referenced_not_emitted() {
    let widget = StructuralSchema::object([
        ("metadata", reference(META_V1, "ObjectMeta")),
        ("created", reference(META_V1, "Time")),
    ]);
    let mut bundle = example_bundle(widget);
    bundle.add_type(
        name(META_V1, "Time"),
        StructuralSchema::primitive("string", Some("date-time")),
    );

    let generation = generate(&mut bundle);
    let widget = definition(&generation, "io.example.v1.Widget");

    assert_eq!(
        serde_json::to_value(property(widget, "metadata")).unwrap(),
        json!({"$ref": "#/definitions/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"})
    );
    assert_eq!(
        serde_json::to_value(property(widget, "created")).unwrap(),
        json!({"type": "string", "format": "date-time"})
    );
    assert_eq!(
        keys(&generation),
        ["io.example.v1.Widget", "io.example.v1beta1.Gadget"]
    );
    assert!(generation.diagnostics.is_empty());
    assert_closed(&generation);
}

#[test]
fn only_referenced_types_are_loaded() {
    let widget = StructuralSchema::object([("spec", reference(V1, "WidgetSpec"))]);
    let mut bundle = example_bundle(widget);
    bundle.add_type(
        name(V1, "WidgetSpec"),
        StructuralSchema::object([("size", integer())]),
    );
    bundle.add_type(name(V1, "Unused"), StructuralSchema::object([("x", string())]));

    let generation = generate(&mut bundle);

    assert!(bundle.is_loaded(&name(V1, "WidgetSpec")));
    assert!(!bundle.is_loaded(&name(V1, "Unused")));
    assert!(!keys(&generation).contains(&"io.example.v1.Unused".to_string()));
}

#[test]
fn unloadable_reference_fails_generation() {
    let widget = StructuralSchema::object([("x", reference(V1, "Missing"))]);
    let mut bundle = example_bundle(widget);

    let result = generate_definitions(&mut bundle, &GeneratorConfig::default());

    match result {
        Err(Error::Source(SourceError::Unloadable(missing))) => {
            assert_eq!(missing, name(V1, "Missing"))
        }
        other => panic!("expected an unloadable type, got {other:?}"),
    }
}

#[test]
fn simple_kind_is_skipped() {
    let mut bundle = example_bundle(string());

    let generation = generate(&mut bundle);

    assert_eq!(keys(&generation), ["io.example.v1beta1.Gadget"]);
    assert!(generation.diagnostics.contains(&Diagnostic::SkippedDefinition {
        key: DefinitionKey::new("io.example.v1.Widget"),
        reason: "kind schema is a simple type".to_string(),
    }));
}

#[test]
fn untyped_reference_target_passes_through() {
    let widget = StructuralSchema::object([("blob", reference(V1, "Blob"))]);
    let mut bundle = example_bundle(widget);
    bundle.add_type(
        name(V1, "Blob"),
        StructuralSchema::primitive("", None).with_description("opaque payload"),
    );

    let generation = generate(&mut bundle);

    assert_eq!(
        serde_json::to_value(definition(&generation, "io.example.v1.Blob")).unwrap(),
        json!({"description": "opaque payload"})
    );
    assert!(generation.diagnostics.contains(&Diagnostic::UnknownSchemaShape {
        r#type: String::new(),
        format: None,
    }));
    assert_closed(&generation);
}

#[test]
fn foreign_prefix_holds_without_declared_foreign_namespaces() {
    let mut bundle = SchemaBundle::new();
    bundle.add_kind(
        name(V1, "Widget"),
        GroupVersionKind::new("example.io", "v1", "Widget"),
        StructuralSchema::object([
            ("metadata", reference(META_V1, "ObjectMeta")),
            ("created", reference(META_V1, "Time")),
            (
                "base",
                StructuralSchema::all_of(vec![reference(META_V1, "ListMeta")]),
            ),
        ]),
    );
    bundle.add_type(
        name(META_V1, "Time"),
        StructuralSchema::primitive("string", Some("date-time")),
    );

    let generation = generate(&mut bundle);
    let widget = definition(&generation, "io.example.Widget");

    assert_eq!(
        serde_json::to_value(property(widget, "metadata")).unwrap(),
        json!({"$ref": "#/definitions/io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"})
    );
    assert_eq!(
        serde_json::to_value(property(widget, "created")).unwrap(),
        json!({"type": "string", "format": "date-time"})
    );
    assert_eq!(keys(&generation), ["io.example.Widget"]);
    assert!(generation.diagnostics.is_empty());
    assert_closed(&generation);
}

#[test]
fn colliding_keys_keep_first_type() {
    // `example.io/v1` has no group profile; its cleaned-up form lands on the
    // same key as the profiled `github.com/org/proj/api/v1`.
    let widget = StructuralSchema::object([
        ("a", reference(V1, "Spec")),
        ("b", reference("example.io/v1", "Spec")),
    ]);
    let mut bundle = example_bundle(widget);
    bundle.add_type(name(V1, "Spec"), StructuralSchema::object([("a", string())]));
    bundle.add_type(
        name("example.io/v1", "Spec"),
        StructuralSchema::object([("b", string())]),
    );

    let generation = generate(&mut bundle);

    assert_eq!(
        keys(&generation),
        [
            "io.example.v1.Spec",
            "io.example.v1.Widget",
            "io.example.v1beta1.Gadget",
        ]
    );
    assert!(generation.diagnostics.iter().any(|d| matches!(
        d,
        Diagnostic::KeyCollision { key, .. } if key.as_str() == "io.example.v1.Spec"
    )));
}

#[test]
fn document_carries_group_title() {
    let mut bundle = example_bundle(StructuralSchema::object([("x", string())]));

    let generation = generate(&mut bundle);

    assert_eq!(generation.document.swagger, "2.0");
    assert_eq!(generation.document.info.title, "Kubernetes (example.io)");
    assert_eq!(generation.document.info.version, "v1.18.2");
    assert!(generation.document.paths.is_empty());
}
