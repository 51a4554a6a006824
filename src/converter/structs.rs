use std::collections::BTreeMap;

use crate::common::DefinitionKey;
use crate::swagger::{GroupVersionKind, OutputSchema};

/// An object schema with the given properties.
pub fn create_object_schema(
    properties: BTreeMap<String, OutputSchema>,
    required: Vec<String>,
) -> OutputSchema {
    OutputSchema {
        r#type: Some("object".to_string()),
        properties,
        required,
        ..OutputSchema::default()
    }
}

/// An array schema. `items` is absent for unsupported tuple-style items.
pub fn create_array_schema(items: Option<OutputSchema>) -> OutputSchema {
    OutputSchema {
        r#type: Some("array".to_string()),
        items: items.map(Box::new),
        ..OutputSchema::default()
    }
}

/// An object schema whose values all follow `values`.
pub fn create_map_schema(values: OutputSchema) -> OutputSchema {
    OutputSchema {
        r#type: Some("object".to_string()),
        additional_properties: Some(Box::new(values)),
        ..OutputSchema::default()
    }
}

/// `{description, $ref, required}` pointing at another definition.
pub fn create_pointer_schema(
    key: &DefinitionKey,
    description: Option<String>,
    required: Vec<String>,
) -> OutputSchema {
    OutputSchema {
        description,
        reference: Some(key.reference()),
        required,
        ..OutputSchema::default()
    }
}

/// Tag a definition with the single kind it serves.
pub fn tag_group_version_kind(schema: &mut OutputSchema, gvk: &GroupVersionKind) {
    schema.group_version_kind = vec![gvk.clone()];
}
