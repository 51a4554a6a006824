use crate::common::QualifiedTypeName;
use crate::converter::analysis::is_object_like;
use crate::converter::conversion::Translator;
use crate::converter::diagnostics::Diagnostic;
use crate::converter::state::{DefinitionRegistry, Emitted};
use crate::error::Result;
use crate::source::SchemaSource;

impl<S: SchemaSource + ?Sized> Translator<'_, S> {
    /// Translate one source type and add it to `registry` under its key.
    ///
    /// Foreign types and types the source leaves unloaded are skipped. A type
    /// whose root is a bare reference becomes the translated reference. Any
    /// other root is emitted as translated, so every pointer queued for it
    /// lands on a definition; untyped roots pass through with a diagnostic.
    #[cfg_attr(feature = "trace", tracing::instrument(level = "debug", skip_all, fields(%name)))]
    pub fn process_definition(
        &mut self,
        name: &QualifiedTypeName,
        registry: &mut DefinitionRegistry,
    ) -> Result<()> {
        let key = self.key_for(name);
        if self.is_foreign(&key) {
            return Ok(());
        }
        let Some(schema) = self.resolve(name)? else {
            return Ok(());
        };

        let definition = if let Some(target) = schema.as_reference() {
            self.translate_reference(&schema, target)?
        } else {
            // The type being defined is never inlined into itself.
            self.embedding.push(name.clone());
            let translated = if is_object_like(&schema) {
                self.translate_object(&schema, Some(name))
            } else {
                self.translate(&schema, Some(name))
            };
            self.embedding.pop();
            translated?
        };

        match registry.emit(key.clone(), name, definition) {
            Emitted::Added => tracing::debug!(%name, %key, "emitted definition"),
            Emitted::Collision { owner } => {
                self.diagnostics.report(Diagnostic::KeyCollision {
                    key,
                    kept: owner,
                    dropped: name.clone(),
                });
            }
        }
        Ok(())
    }
}
