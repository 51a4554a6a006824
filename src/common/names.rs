use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::Error;

/// Prefix carried by JSON references into a Swagger definitions map.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Escaped path separator inside a raw reference token.
const ESCAPED_SLASH: &str = "~1";

/// Separator between namespace and local name inside a raw reference token.
const NAME_SEPARATOR: &str = "~0";

static REFERENCE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#/definitions/)?(?P<namespace>.*)~0(?P<name>[^~/]+)$")
        .expect("reference token pattern is valid")
});

/// Hierarchical source namespace, compared segment by segment.
///
/// `"org/proj/api"` is a prefix of `"org/proj/api/v1"` but not of
/// `"org/proj/apiserver"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NamespacePath {
    segments: Vec<String>,
}

impl NamespacePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Segment-wise prefix test. The empty path is a prefix of every path.
    pub fn is_prefix_of(&self, other: &NamespacePath) -> bool {
        self.segments.len() <= other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| a == b)
    }

    /// Segments of `self` remaining after `prefix`, if `prefix` matches.
    pub fn strip_prefix(&self, prefix: &NamespacePath) -> Option<&[String]> {
        prefix
            .is_prefix_of(self)
            .then(|| &self.segments[prefix.segments.len()..])
    }

    /// Longest shared leading run of whole segments.
    pub fn common_prefix(&self, other: &NamespacePath) -> NamespacePath {
        let shared = self
            .segments
            .iter()
            .zip(&other.segments)
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.clone())
            .collect();
        NamespacePath { segments: shared }
    }
}

impl From<&str> for NamespacePath {
    fn from(path: &str) -> Self {
        NamespacePath::new(path.split('/'))
    }
}

impl From<String> for NamespacePath {
    fn from(path: String) -> Self {
        NamespacePath::from(path.as_str())
    }
}

impl From<NamespacePath> for String {
    fn from(path: NamespacePath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Identity of a source type: its namespace plus local name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QualifiedTypeName {
    pub namespace: NamespacePath,
    #[serde(rename = "name")]
    pub local_name: String,
}

impl QualifiedTypeName {
    pub fn new(namespace: impl Into<NamespacePath>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    /// Parse a raw `#/definitions/<ns ~1-escaped>~0<Name>` reference token.
    pub fn parse_reference(token: &str) -> Result<Self, Error> {
        let caps = REFERENCE_TOKEN
            .captures(token)
            .ok_or_else(|| Error::InvalidReference(token.to_string()))?;
        let namespace = caps["namespace"].replace(ESCAPED_SLASH, "/");
        Ok(Self::new(namespace.as_str(), &caps["name"]))
    }

    /// Render back into the raw reference token form.
    pub fn to_reference(&self) -> String {
        format!(
            "{DEFINITIONS_PREFIX}{}{NAME_SEPARATOR}{}",
            self.namespace.segments().join(ESCAPED_SLASH),
            self.local_name
        )
    }
}

impl FromStr for QualifiedTypeName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_reference(s)
    }
}

impl fmt::Display for QualifiedTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.local_name)
    }
}

/// Dotted name of an entry in the output definitions map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionKey(String);

impl DefinitionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `#/definitions/<key>`
    pub fn reference(&self) -> String {
        format!("{DEFINITIONS_PREFIX}{}", self.0)
    }

    /// Keys under the foreign prefix are owned by the base platform document.
    pub fn is_foreign(&self, foreign_prefix: &str) -> bool {
        !foreign_prefix.is_empty() && self.0.starts_with(foreign_prefix)
    }
}

impl fmt::Display for DefinitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DefinitionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reverse the dot-delimited labels of a group: `apps.example.com` → `com.example.apps`.
pub fn reverse_labels(group: &str) -> String {
    group
        .split('.')
        .filter(|s| !s.is_empty())
        .rev()
        .collect::<Vec<_>>()
        .join(".")
}

/// Swap the first two dot-segments of a name, keeping the rest in place.
///
/// `k8s.io.api.core.v1` → `io.k8s.api.core.v1`. Names with fewer than two
/// segments come back unchanged.
pub fn swap_leading_segments(dotted: &str) -> String {
    let mut parts: Vec<&str> = dotted.split('.').collect();
    if parts.len() >= 2 {
        parts.swap(0, 1);
    }
    parts.join(".")
}

/// Join non-empty parts with dots.
pub fn compose_dotted<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}
