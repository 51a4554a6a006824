use std::collections::BTreeMap;

use crate::common::{DefinitionKey, QualifiedTypeName};
use crate::config::GeneratorConfig;
use crate::converter::analysis::is_simple_type;
use crate::converter::conversion::Translator;
use crate::converter::diagnostics::{Diagnostic, Diagnostics};
use crate::converter::namespaces::NamespaceMapper;
use crate::converter::state::{ClosureState, DefinitionRegistry};
use crate::error::Result;
use crate::source::SchemaSource;
use crate::swagger::OutputSchema;

/// Definitions and diagnostics of a finished closure run.
#[derive(Debug)]
pub struct ClosureOutput {
    pub definitions: BTreeMap<DefinitionKey, OutputSchema>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Drives translation over the reference graph until no new type is found.
///
/// Every reachable type that is neither simple nor foreign is translated
/// exactly once; reference cycles end at the visited check.
pub struct ClosureDriver<'a, S: SchemaSource + ?Sized> {
    source: &'a mut S,
    mapper: &'a NamespaceMapper,
    config: &'a GeneratorConfig,
    state: ClosureState,
    registry: DefinitionRegistry,
    diagnostics: Diagnostics,
}

impl<'a, S: SchemaSource + ?Sized> ClosureDriver<'a, S> {
    pub fn new(source: &'a mut S, mapper: &'a NamespaceMapper, config: &'a GeneratorConfig) -> Self {
        Self {
            source,
            mapper,
            config,
            state: ClosureState::new(),
            registry: DefinitionRegistry::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn run(mut self) -> Result<ClosureOutput> {
        self.seed()?;

        let mut round = 0;
        while self.state.has_pending() {
            round += 1;
            let pending = self.state.take_pending();
            tracing::debug!(round, pending = pending.len(), "closure round");

            for name in pending {
                if self.state.is_visited(&name) {
                    continue;
                }
                self.state.mark_visited(name.clone());
                self.define(&name)?;
            }
        }

        tracing::debug!(
            rounds = round,
            definitions = self.registry.len(),
            "closure complete"
        );
        Ok(ClosureOutput {
            definitions: self.registry.into_definitions(),
            diagnostics: self.diagnostics.into_vec(),
        })
    }

    /// Translate every top-level kind that is not simple.
    fn seed(&mut self) -> Result<()> {
        for (name, _) in self.source.top_level_kinds() {
            let simple = self.source.schema_for(&name).map_or(false, is_simple_type);
            if simple {
                let key = self.mapper.map_type(&name);
                self.diagnostics.report(Diagnostic::SkippedDefinition {
                    key,
                    reason: "kind schema is a simple type".to_string(),
                });
                continue;
            }
            if self.state.mark_visited(name.clone()) {
                self.define(&name)?;
            }
        }
        Ok(())
    }

    fn define(&mut self, name: &QualifiedTypeName) -> Result<()> {
        let mut translator = Translator::new(
            &mut *self.source,
            self.mapper,
            self.config,
            &mut self.state,
            &mut self.diagnostics,
        );
        translator.process_definition(name, &mut self.registry)
    }
}
