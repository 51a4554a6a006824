use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::common::{NamespacePath, QualifiedTypeName};
use crate::error::{Error, Result, SourceError};
use crate::schema::StructuralSchema;
use crate::swagger::GroupVersionKind;

/// Supplies structural schemas and kind metadata for source types.
pub trait SchemaSource {
    /// Schema of an already-loaded type.
    fn schema_for(&self, name: &QualifiedTypeName) -> Option<&StructuralSchema>;

    fn kind_metadata_for(&self, name: &QualifiedTypeName) -> Option<&GroupVersionKind>;

    /// Every user-declared kind with its group/version/kind identity.
    fn top_level_kinds(&self) -> Vec<(QualifiedTypeName, GroupVersionKind)>;

    /// Load a type first discovered while closing over references.
    ///
    /// Types in foreign namespaces may stay unloaded without an error.
    fn ensure_loaded(&mut self, name: &QualifiedTypeName) -> Result<(), SourceError>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEntry {
    pub namespace: NamespacePath,
    pub name: String,
    #[serde(default)]
    pub kind: Option<GroupVersionKind>,
    pub schema: StructuralSchema,
}

/// Raw bundle document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleDocument {
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    #[serde(default)]
    pub foreign_namespaces: Vec<NamespacePath>,
}

/// In-memory schema source built from a bundle of types.
///
/// Kind types are loaded up front; every other type is held back until
/// [`SchemaSource::ensure_loaded`] asks for it.
#[derive(Debug, Clone, Default)]
pub struct SchemaBundle {
    schemata: BTreeMap<QualifiedTypeName, StructuralSchema>,
    available: BTreeMap<QualifiedTypeName, StructuralSchema>,
    kinds: BTreeMap<QualifiedTypeName, GroupVersionKind>,
    foreign_namespaces: Vec<NamespacePath>,
}

impl SchemaBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(document: BundleDocument) -> Self {
        let mut bundle = Self {
            foreign_namespaces: document.foreign_namespaces,
            ..Self::default()
        };
        for entry in document.types {
            let name = QualifiedTypeName::new(entry.namespace, entry.name);
            match entry.kind {
                Some(gvk) => bundle.add_kind(name, gvk, entry.schema),
                None => bundle.add_type(name, entry.schema),
            }
        }
        bundle
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_document(serde_json::from_str(json)?))
    }

    /// Read a bundle from a file path or an `http(s)`/`file` URL.
    pub fn load(location: &str) -> Result<Self> {
        Self::from_json(&fetch_content(location)?)
    }

    /// Register a top-level kind; it is loaded immediately.
    pub fn add_kind(
        &mut self,
        name: QualifiedTypeName,
        gvk: GroupVersionKind,
        schema: StructuralSchema,
    ) {
        self.kinds.insert(name.clone(), gvk);
        self.schemata.insert(name, schema);
    }

    /// Register a type that is loaded on demand.
    pub fn add_type(&mut self, name: QualifiedTypeName, schema: StructuralSchema) {
        self.available.insert(name, schema);
    }

    pub fn add_foreign_namespace(&mut self, namespace: &str) {
        self.foreign_namespaces.push(NamespacePath::from(namespace));
    }

    pub fn is_loaded(&self, name: &QualifiedTypeName) -> bool {
        self.schemata.contains_key(name)
    }

    fn is_foreign(&self, namespace: &NamespacePath) -> bool {
        self.foreign_namespaces
            .iter()
            .any(|root| root.is_prefix_of(namespace))
    }
}

impl SchemaSource for SchemaBundle {
    fn schema_for(&self, name: &QualifiedTypeName) -> Option<&StructuralSchema> {
        self.schemata.get(name)
    }

    fn kind_metadata_for(&self, name: &QualifiedTypeName) -> Option<&GroupVersionKind> {
        self.kinds.get(name)
    }

    fn top_level_kinds(&self) -> Vec<(QualifiedTypeName, GroupVersionKind)> {
        self.kinds
            .iter()
            .map(|(name, gvk)| (name.clone(), gvk.clone()))
            .collect()
    }

    fn ensure_loaded(&mut self, name: &QualifiedTypeName) -> Result<(), SourceError> {
        if self.schemata.contains_key(name) {
            return Ok(());
        }
        if let Some(schema) = self.available.remove(name) {
            tracing::debug!(%name, "loading type on demand");
            self.schemata.insert(name.clone(), schema);
            return Ok(());
        }
        if self.is_foreign(&name.namespace) {
            return Ok(());
        }
        Err(SourceError::Unloadable(name.clone()))
    }
}

/// Read document text from a file path or an `http(s)`/`file` URL.
pub fn fetch_content(location: &str) -> Result<String> {
    let fetch_error = |message: String| Error::Fetch {
        location: location.to_string(),
        message,
    };

    let parsed = match Url::parse(location) {
        Ok(url) if url.scheme().len() > 1 => url,
        // Plain paths, including Windows drive letters parsed as a scheme
        _ => return read_file(Path::new(location)),
    };

    match parsed.scheme() {
        "http" | "https" => {
            let client = Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .map_err(|e| fetch_error(format!("client build error: {e}")))?;
            client
                .get(parsed.as_str())
                .send()
                .and_then(|resp| resp.error_for_status())
                .map_err(|e| fetch_error(format!("HTTP request error: {e}")))?
                .text()
                .map_err(|e| fetch_error(format!("error reading response: {e}")))
        }
        "file" => {
            let path = parsed
                .to_file_path()
                .map_err(|_| fetch_error("invalid file URL".to_string()))?;
            read_file(&path)
        }
        scheme => Err(fetch_error(format!("unsupported scheme {scheme}"))),
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })
}
