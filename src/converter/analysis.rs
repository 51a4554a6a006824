use crate::schema::{SchemaKind, StructuralSchema};

/// Whether a schema is embedded inline rather than given its own definition.
///
/// Checked in order:
/// - a bare reference is never simple before it is resolved;
/// - a node declaring nothing at all (no type, format, reference or anyOf)
///   is treated as unresolved and not simple;
/// - a map-shaped object is simple;
/// - any declared type other than `object` is simple;
/// - an object with properties is not.
pub fn is_simple_type(schema: &StructuralSchema) -> bool {
    match &schema.kind {
        SchemaKind::Ref { .. } => false,
        SchemaKind::Primitive { r#type, format } if r#type.is_empty() && format.is_none() => false,
        SchemaKind::Map { .. } => true,
        _ => schema.declared_type() != "object",
    }
}

/// Whether a schema can stand as a named definition.
pub fn is_object_like(schema: &StructuralSchema) -> bool {
    matches!(
        schema.kind,
        SchemaKind::Object { .. } | SchemaKind::AllOf { .. }
    ) || (matches!(schema.kind, SchemaKind::AnyOf { .. }) && !is_simple_type(schema))
}
