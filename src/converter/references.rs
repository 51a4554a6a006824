use crate::common::{DefinitionKey, QualifiedTypeName};
use crate::converter::analysis::is_simple_type;
use crate::converter::conversion::Translator;
use crate::converter::diagnostics::Diagnostic;
use crate::converter::structs::create_pointer_schema;
use crate::error::{Error, Result};
use crate::schema::StructuralSchema;
use crate::source::SchemaSource;
use crate::swagger::OutputSchema;

impl<S: SchemaSource + ?Sized> Translator<'_, S> {
    /// Definition key of a source type, noting ambiguous group matches.
    pub fn key_for(&mut self, name: &QualifiedTypeName) -> DefinitionKey {
        if let Some(ambiguity) = self.mapper.ambiguity(&name.namespace) {
            self.diagnostics.report(ambiguity);
        }
        self.mapper.map_type(name)
    }

    pub(crate) fn is_foreign(&self, key: &DefinitionKey) -> bool {
        key.is_foreign(&self.config.foreign_prefix)
    }

    /// Load a referenced type's schema, one hop.
    ///
    /// `None` means the source left it unloaded. A type keyed under the
    /// foreign prefix that the source cannot load is expected and never an
    /// error; one it can load is still used for embedding.
    pub fn resolve(&mut self, name: &QualifiedTypeName) -> Result<Option<StructuralSchema>> {
        let key = self.key_for(name);
        let foreign = self.is_foreign(&key);
        match self.source.ensure_loaded(name) {
            Ok(()) => {}
            Err(e) if foreign => {
                tracing::debug!(%name, %key, "foreign type left to the base document: {e}");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }

        let schema = self.source.schema_for(name).cloned();
        if schema.is_none() && !foreign {
            self.diagnostics.report(Diagnostic::UnresolvedReference {
                target: name.clone(),
            });
        }
        Ok(schema)
    }

    /// Follow a chain of pure references to the first non-reference schema.
    ///
    /// `None` when the chain ends in a type the source cannot provide.
    pub fn follow_chain(&mut self, target: &QualifiedTypeName) -> Result<Option<StructuralSchema>> {
        let mut chain = vec![target.clone()];
        let mut current = target.clone();
        loop {
            let Some(schema) = self.resolve(&current)? else {
                return Ok(None);
            };
            let Some(next) = schema.as_reference().cloned() else {
                return Ok(Some(schema));
            };
            let revisited = chain.contains(&next);
            chain.push(next.clone());
            if revisited {
                return Err(Error::AliasCycle { cycle: chain });
            }
            current = next;
        }
    }

    /// Embed a simple target inline, otherwise point at its definition.
    pub fn translate_reference(
        &mut self,
        node: &StructuralSchema,
        target: &QualifiedTypeName,
    ) -> Result<OutputSchema> {
        match self.follow_chain(target)? {
            Some(resolved) if is_simple_type(&resolved) => self.embed(node, target, &resolved),
            _ => Ok(self.pointer(node, target)),
        }
    }

    /// Inline `resolved` in place of the reference. A simple type that
    /// reaches itself while being inlined is pointed at instead.
    fn embed(
        &mut self,
        node: &StructuralSchema,
        target: &QualifiedTypeName,
        resolved: &StructuralSchema,
    ) -> Result<OutputSchema> {
        if self.embedding.contains(target) {
            self.diagnostics.report(Diagnostic::RecursiveEmbedding {
                target: target.clone(),
            });
            return Ok(self.pointer(node, target));
        }

        self.embedding.push(target.clone());
        let translated = self.translate(resolved, None);
        self.embedding.pop();

        let mut out = translated?;
        if node.description.is_some() {
            out.description = self.describe(node.description.as_deref());
        }
        Ok(out)
    }

    fn pointer(&mut self, node: &StructuralSchema, target: &QualifiedTypeName) -> OutputSchema {
        let key = self.key_for(target);
        if !self.is_foreign(&key) && self.state.register(target) {
            tracing::debug!(%target, %key, "queued reference");
        }
        create_pointer_schema(
            &key,
            self.describe(node.description.as_deref()),
            node.required.clone(),
        )
    }
}
