use std::fmt;

use crate::common::{DefinitionKey, QualifiedTypeName};

/// Non-fatal condition met during one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A type/format combination outside the known table, passed through verbatim.
    UnknownSchemaShape {
        r#type: String,
        format: Option<String>,
    },
    /// Several group profiles claim a namespace; `chosen` won the tie-break.
    AmbiguousNamespace {
        namespace: String,
        candidates: Vec<String>,
        chosen: String,
    },
    /// A top-level type that cannot stand as a definition of its own.
    SkippedDefinition { key: DefinitionKey, reason: String },
    /// A reference no source could resolve; kept as a pointer.
    UnresolvedReference { target: QualifiedTypeName },
    /// A simple type reached itself while being inlined; the inner
    /// occurrence is a pointer to its own definition.
    RecursiveEmbedding { target: QualifiedTypeName },
    /// Two source types mapped onto one key; the first one keeps it.
    KeyCollision {
        key: DefinitionKey,
        kept: QualifiedTypeName,
        dropped: QualifiedTypeName,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownSchemaShape { r#type: ty, format } => write!(
                f,
                "unknown schema shape: type {ty:?} with format {:?}, passed through",
                format.as_deref().unwrap_or("")
            ),
            Diagnostic::AmbiguousNamespace {
                namespace,
                candidates,
                chosen,
            } => write!(
                f,
                "namespace {namespace} matches groups [{}], using {chosen}",
                candidates.join(", ")
            ),
            Diagnostic::SkippedDefinition { key, reason } => {
                write!(f, "skipping definition {key}: {reason}")
            }
            Diagnostic::UnresolvedReference { target } => {
                write!(f, "reference to {target} could not be resolved")
            }
            Diagnostic::RecursiveEmbedding { target } => {
                write!(f, "simple type {target} contains itself, referenced by pointer")
            }
            Diagnostic::KeyCollision { key, kept, dropped } => {
                write!(f, "{dropped} maps onto key {key} already held by {kept}")
            }
        }
    }
}

/// Collects diagnostics for one pass, logging each as it arrives.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if !self.entries.contains(&diagnostic) {
            tracing::warn!("{diagnostic}");
            self.entries.push(diagnostic);
        }
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
