#![allow(dead_code)]
use crd_swagger::common::QualifiedTypeName;
use crd_swagger::config::GeneratorConfig;
use crd_swagger::converter::{generate_definitions, Generation};
use crd_swagger::schema::StructuralSchema;
use crd_swagger::source::SchemaBundle;
use crd_swagger::swagger::{GroupVersionKind, OutputSchema};

pub const V1: &str = "github.com/org/proj/api/v1";
pub const V1BETA1: &str = "github.com/org/proj/api/v1beta1";
pub const META_V1: &str = "k8s.io/apimachinery/pkg/apis/meta/v1";

pub fn name(namespace: &str, local: &str) -> QualifiedTypeName {
    QualifiedTypeName::new(namespace, local)
}

pub fn string() -> StructuralSchema {
    StructuralSchema::primitive("string", None)
}

pub fn integer() -> StructuralSchema {
    StructuralSchema::primitive("integer", None)
}

pub fn reference(namespace: &str, local: &str) -> StructuralSchema {
    StructuralSchema::reference(name(namespace, local))
}

/// Two example.io kinds: `Widget` in v1 and `Gadget` in v1beta1.
///
/// Their shared prefix is `github.com/org/proj/api`, so v1 types map to
/// `io.example.v1.*`.
pub fn example_bundle(widget: StructuralSchema) -> SchemaBundle {
    let mut bundle = SchemaBundle::new();
    bundle.add_kind(
        name(V1, "Widget"),
        GroupVersionKind::new("example.io", "v1", "Widget"),
        widget,
    );
    bundle.add_kind(
        name(V1BETA1, "Gadget"),
        GroupVersionKind::new("example.io", "v1beta1", "Gadget"),
        StructuralSchema::object([("enabled", StructuralSchema::primitive("boolean", None))]),
    );
    bundle.add_foreign_namespace("k8s.io");
    bundle
}

pub fn generate(bundle: &mut SchemaBundle) -> Generation {
    generate_definitions(bundle, &GeneratorConfig::default()).expect("generation succeeds")
}

pub fn keys(generation: &Generation) -> Vec<String> {
    generation
        .document
        .definitions
        .keys()
        .map(|k| k.to_string())
        .collect()
}

pub fn definition<'a>(generation: &'a Generation, key: &str) -> &'a OutputSchema {
    generation
        .document
        .definitions
        .iter()
        .find(|(k, _)| k.as_str() == key)
        .map(|(_, v)| v)
        .unwrap_or_else(|| panic!("missing definition {key}"))
}

pub fn property<'a>(schema: &'a OutputSchema, property: &str) -> &'a OutputSchema {
    schema
        .properties
        .get(property)
        .unwrap_or_else(|| panic!("missing property {property}"))
}
