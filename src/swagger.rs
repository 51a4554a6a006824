use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::common::DefinitionKey;

pub const SWAGGER_VERSION: &str = "2.0";

/// Version reported in the document info block.
pub const API_VERSION: &str = "v1.18.2";

/// Group / version / kind identity of a top-level kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub kind: String,
    pub version: String,
}

impl GroupVersionKind {
    pub fn new(group: &str, version: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            kind: kind.to_string(),
            version: version.to_string(),
        }
    }
}

/// A Swagger 2.0 schema object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<OutputSchema>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, OutputSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<OutputSchema>>,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(
        rename = "x-kubernetes-group-version-kind",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub group_version_kind: Vec<GroupVersionKind>,
}

impl OutputSchema {
    /// Every `$ref` target inside this schema, depth first.
    pub fn references(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        if let Some(reference) = &self.reference {
            refs.push(reference);
        }
        if let Some(items) = &self.items {
            items.collect_references(refs);
        }
        if let Some(values) = &self.additional_properties {
            values.collect_references(refs);
        }
        for property in self.properties.values() {
            property.collect_references(refs);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

/// The document produced by one generation pass.
///
/// Only `definitions` is populated here; `paths` belongs to the operation
/// builder that consumes the assigned definition keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerDocument {
    pub swagger: String,
    pub info: Info,
    #[serde(default)]
    pub paths: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub definitions: BTreeMap<DefinitionKey, OutputSchema>,
}

impl SwaggerDocument {
    /// Empty document titled after the API groups it covers.
    pub fn new<'a>(groups: impl IntoIterator<Item = &'a str>) -> Self {
        let mut groups: Vec<&str> = groups.into_iter().collect();
        groups.sort_unstable();
        groups.dedup();
        Self {
            swagger: SWAGGER_VERSION.to_string(),
            info: Info {
                title: format!("Kubernetes ({})", groups.join(", ")),
                version: API_VERSION.to_string(),
            },
            paths: BTreeMap::new(),
            definitions: BTreeMap::new(),
        }
    }
}
