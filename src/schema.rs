use serde::Deserialize;
use std::collections::BTreeMap;

use crate::common::QualifiedTypeName;
use crate::error::Error;

pub type Properties = BTreeMap<String, StructuralSchema>;

/// One node of a CRD structural schema.
///
/// `description` and `required` are carried by every kind of node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawSchema")]
pub struct StructuralSchema {
    pub description: Option<String>,
    pub required: Vec<String>,
    pub kind: SchemaKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// Scalar type. An empty `type` marks a malformed or unresolved node.
    Primitive {
        r#type: String,
        format: Option<String>,
    },
    /// `items` is `None` when the source declared tuple-style items.
    Array {
        items: Option<Box<StructuralSchema>>,
    },
    /// Object with only an additional-value schema.
    Map { values: Box<StructuralSchema> },
    Object { properties: Properties },
    Ref { target: QualifiedTypeName },
    AllOf {
        parts: Vec<StructuralSchema>,
        properties: Properties,
    },
    AnyOf {
        r#type: Option<String>,
        parts: Vec<StructuralSchema>,
        properties: Properties,
    },
}

impl StructuralSchema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            description: None,
            required: Vec::new(),
            kind,
        }
    }

    pub fn primitive(r#type: &str, format: Option<&str>) -> Self {
        Self::new(SchemaKind::Primitive {
            r#type: r#type.to_string(),
            format: format.map(str::to_string),
        })
    }

    pub fn array(items: StructuralSchema) -> Self {
        Self::new(SchemaKind::Array {
            items: Some(Box::new(items)),
        })
    }

    pub fn map(values: StructuralSchema) -> Self {
        Self::new(SchemaKind::Map {
            values: Box::new(values),
        })
    }

    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, StructuralSchema)>,
        K: Into<String>,
    {
        Self::new(SchemaKind::Object {
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })
    }

    pub fn reference(target: QualifiedTypeName) -> Self {
        Self::new(SchemaKind::Ref { target })
    }

    pub fn all_of(parts: Vec<StructuralSchema>) -> Self {
        Self::new(SchemaKind::AllOf {
            parts,
            properties: Properties::new(),
        })
    }

    pub fn any_of(parts: Vec<StructuralSchema>) -> Self {
        Self::new(SchemaKind::AnyOf {
            r#type: None,
            parts,
            properties: Properties::new(),
        })
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_required<I, S>(mut self, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = required.into_iter().map(Into::into).collect();
        self
    }

    /// Attach own properties to a composition node.
    pub fn with_properties<I, K>(mut self, own: I) -> Self
    where
        I: IntoIterator<Item = (K, StructuralSchema)>,
        K: Into<String>,
    {
        if let Some(properties) = self.properties_mut() {
            properties.extend(own.into_iter().map(|(k, v)| (k.into(), v)));
        }
        self
    }

    /// The `type` this node declares, `""` when it declares none.
    pub fn declared_type(&self) -> &str {
        match &self.kind {
            SchemaKind::Primitive { r#type, .. } => r#type,
            SchemaKind::Array { .. } => "array",
            SchemaKind::Map { .. } | SchemaKind::Object { .. } | SchemaKind::AllOf { .. } => {
                "object"
            }
            SchemaKind::AnyOf { r#type, .. } => r#type.as_deref().unwrap_or(""),
            SchemaKind::Ref { .. } => "",
        }
    }

    /// Properties declared directly on this node.
    pub fn properties(&self) -> Option<&Properties> {
        match &self.kind {
            SchemaKind::Object { properties }
            | SchemaKind::AllOf { properties, .. }
            | SchemaKind::AnyOf { properties, .. } => Some(properties),
            _ => None,
        }
    }

    fn properties_mut(&mut self) -> Option<&mut Properties> {
        match &mut self.kind {
            SchemaKind::Object { properties }
            | SchemaKind::AllOf { properties, .. }
            | SchemaKind::AnyOf { properties, .. } => Some(properties),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&QualifiedTypeName> {
        match &self.kind {
            SchemaKind::Ref { target } => Some(target),
            _ => None,
        }
    }
}

/// Wire shape of a CRD `JSONSchemaProps` node.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    #[serde(rename = "type")]
    r#type: Option<String>,
    format: Option<String>,
    description: Option<String>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    properties: Properties,
    items: Option<RawItems>,
    additional_properties: Option<RawAdditional>,
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(default)]
    all_of: Vec<StructuralSchema>,
    #[serde(default)]
    any_of: Vec<StructuralSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawItems {
    Tuple(Vec<serde_json::Value>),
    Schema(Box<StructuralSchema>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAdditional {
    Allowed(bool),
    Schema(Box<StructuralSchema>),
}

impl TryFrom<RawSchema> for StructuralSchema {
    type Error = Error;

    fn try_from(raw: RawSchema) -> Result<Self, Self::Error> {
        let kind = if let Some(token) = raw.reference {
            SchemaKind::Ref {
                target: QualifiedTypeName::parse_reference(&token)?,
            }
        } else if !raw.all_of.is_empty() {
            SchemaKind::AllOf {
                parts: raw.all_of,
                properties: raw.properties,
            }
        } else if !raw.any_of.is_empty() {
            SchemaKind::AnyOf {
                r#type: raw.r#type,
                parts: raw.any_of,
                properties: raw.properties,
            }
        } else {
            match raw.r#type.as_deref() {
                Some("array") => SchemaKind::Array {
                    items: match raw.items {
                        Some(RawItems::Schema(items)) => Some(items),
                        Some(RawItems::Tuple(_)) | None => None,
                    },
                },
                Some("object") => match raw.additional_properties {
                    Some(RawAdditional::Schema(values)) if raw.properties.is_empty() => {
                        SchemaKind::Map { values }
                    }
                    _ => SchemaKind::Object {
                        properties: raw.properties,
                    },
                },
                None if !raw.properties.is_empty() => SchemaKind::Object {
                    properties: raw.properties,
                },
                other => SchemaKind::Primitive {
                    r#type: other.unwrap_or_default().to_string(),
                    format: raw.format,
                },
            }
        };

        Ok(StructuralSchema {
            description: raw.description,
            required: raw.required,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> StructuralSchema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn object_with_only_additional_properties_is_a_map() {
        let schema = parse(json!({
            "type": "object",
            "additionalProperties": {"type": "string"}
        }));
        assert_eq!(
            schema.kind,
            SchemaKind::Map {
                values: Box::new(StructuralSchema::primitive("string", None))
            }
        );
    }

    #[test]
    fn reference_token_is_parsed_at_load_time() {
        let schema = parse(json!({
            "$ref": "#/definitions/org~1proj~1api~1v1~0Inner",
            "description": "inner"
        }));
        assert_eq!(
            schema.as_reference(),
            Some(&QualifiedTypeName::new("org/proj/api/v1", "Inner"))
        );
        assert_eq!(schema.description.as_deref(), Some("inner"));
    }

    #[test]
    fn malformed_reference_fails_to_load() {
        let result: Result<StructuralSchema, _> =
            serde_json::from_value(json!({"$ref": "#/definitions/Inner"}));
        assert!(result.is_err());
    }

    #[test]
    fn tuple_items_are_dropped() {
        let schema = parse(json!({
            "type": "array",
            "items": [{"type": "string"}, {"type": "integer"}]
        }));
        assert_eq!(schema.kind, SchemaKind::Array { items: None });
    }

    #[test]
    fn all_of_keeps_own_properties() {
        let schema = parse(json!({
            "type": "object",
            "allOf": [{"$ref": "#/definitions/a~0B"}],
            "properties": {"x": {"type": "string"}}
        }));
        assert_eq!(schema.declared_type(), "object");
        assert!(schema.properties().unwrap().contains_key("x"));
    }
}
