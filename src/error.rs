use thiserror::Error;

use crate::common::QualifiedTypeName;

/// Failures raised by a [`SchemaSource`](crate::source::SchemaSource).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("type {0} cannot be loaded: it is not part of the schema source")]
    Unloadable(QualifiedTypeName),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("invalid reference token {0:?}")]
    InvalidReference(String),

    #[error("composition cycle through {}", render_cycle(.cycle))]
    CompositionCycle { cycle: Vec<QualifiedTypeName> },

    #[error("reference alias cycle through {}", render_cycle(.cycle))]
    AliasCycle { cycle: Vec<QualifiedTypeName> },

    #[error("failed to fetch {location}: {message}")]
    Fetch { location: String, message: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn render_cycle(cycle: &[QualifiedTypeName]) -> String {
    cycle
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
