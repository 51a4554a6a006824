pub mod analysis;
pub mod closure;
pub mod composition;
pub mod conversion;
pub mod definitions;
pub mod diagnostics;
pub mod merging;
pub mod namespaces;
pub mod references;
pub mod state;
pub mod structs;
pub mod types;

pub use closure::{ClosureDriver, ClosureOutput};
pub use conversion::Translator;
pub use diagnostics::Diagnostic;
pub use namespaces::{GroupNamingProfile, NamespaceMapper, TieBreakPolicy};

use std::fs;

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::source::{SchemaBundle, SchemaSource};
use crate::swagger::SwaggerDocument;

/// Result of one generation pass.
#[derive(Debug)]
pub struct Generation {
    pub document: SwaggerDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the definitions section for every kind the source declares.
///
/// Group naming profiles are computed once from the full kind set before
/// any type is translated.
pub fn generate_definitions<S>(source: &mut S, config: &GeneratorConfig) -> Result<Generation>
where
    S: SchemaSource + ?Sized,
{
    let kinds = source.top_level_kinds();
    let mapper = NamespaceMapper::build(&kinds, config);
    generate_with_mapper(source, &mapper, config)
}

/// As [`generate_definitions`], with a prepared mapper (e.g. a custom tie-break).
pub fn generate_with_mapper<S>(
    source: &mut S,
    mapper: &NamespaceMapper,
    config: &GeneratorConfig,
) -> Result<Generation>
where
    S: SchemaSource + ?Sized,
{
    let kinds = source.top_level_kinds();
    let mut document = SwaggerDocument::new(kinds.iter().map(|(_, gvk)| gvk.group.as_str()));
    tracing::info!("groups: {}", mapper.groups().collect::<Vec<_>>().join(", "));

    let output = ClosureDriver::new(source, mapper, config).run()?;
    document.definitions = output.definitions;

    Ok(Generation {
        document,
        diagnostics: output.diagnostics,
    })
}

/// Convert a schema bundle file (or URL) into a Swagger document on disk.
///
/// Returns the diagnostics of the pass; shape anomalies never fail it.
pub fn convert_bundle_to_swagger(
    bundle_location: &str,
    output_path: &str,
    config: &GeneratorConfig,
) -> Result<Vec<Diagnostic>> {
    let mut bundle = SchemaBundle::load(bundle_location)?;
    let generation = generate_definitions(&mut bundle, config)?;

    let rendered = serde_json::to_string_pretty(&generation.document)?;
    fs::write(output_path, rendered + "\n").map_err(|source| Error::Io {
        path: output_path.to_string(),
        source,
    })?;

    Ok(generation.diagnostics)
}
