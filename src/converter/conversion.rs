use crate::common::text::truncate_description;
use crate::common::QualifiedTypeName;
use crate::config::GeneratorConfig;
use crate::converter::diagnostics::{Diagnostic, Diagnostics};
use crate::converter::namespaces::NamespaceMapper;
use crate::converter::state::ClosureState;
use crate::converter::structs::{create_array_schema, create_map_schema, tag_group_version_kind};
use crate::converter::types::{int_or_string_schema, is_known_primitive, primitive_schema};
use crate::error::Result;
use crate::schema::{SchemaKind, StructuralSchema};
use crate::source::SchemaSource;
use crate::swagger::OutputSchema;

/// Converts structural schema nodes into Swagger schema objects.
///
/// Borrows everything it touches from the closure run that created it:
/// references it cannot embed are queued on the run's [`ClosureState`].
pub struct Translator<'a, S: SchemaSource + ?Sized> {
    pub(crate) source: &'a mut S,
    pub(crate) mapper: &'a NamespaceMapper,
    pub(crate) config: &'a GeneratorConfig,
    pub(crate) state: &'a mut ClosureState,
    pub(crate) diagnostics: &'a mut Diagnostics,
    /// Types currently being inlined, innermost last.
    pub(crate) embedding: Vec<QualifiedTypeName>,
}

impl<'a, S: SchemaSource + ?Sized> Translator<'a, S> {
    pub fn new(
        source: &'a mut S,
        mapper: &'a NamespaceMapper,
        config: &'a GeneratorConfig,
        state: &'a mut ClosureState,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            source,
            mapper,
            config,
            state,
            diagnostics,
            embedding: Vec::new(),
        }
    }

    /// Translate one node. `ident` names the source type when the node is a
    /// type's root schema; kinds get their group/version/kind tag from it.
    #[cfg_attr(feature = "trace", tracing::instrument(level = "trace", skip_all, fields(ident = ?ident)))]
    pub fn translate(
        &mut self,
        schema: &StructuralSchema,
        ident: Option<&QualifiedTypeName>,
    ) -> Result<OutputSchema> {
        match &schema.kind {
            SchemaKind::Primitive { r#type, format } => {
                Ok(self.translate_primitive(schema, r#type, format.as_deref()))
            }
            SchemaKind::Array { items } => {
                let items = match items {
                    Some(items) => Some(self.translate(items, None)?),
                    None => None,
                };
                let mut out = create_array_schema(items);
                out.description = self.describe(schema.description.as_deref());
                out.required = schema.required.clone();
                Ok(out)
            }
            SchemaKind::Map { values } => {
                let values = self.translate(values, None)?;
                let mut out = create_map_schema(values);
                out.description = self.describe(schema.description.as_deref());
                Ok(out)
            }
            SchemaKind::Ref { target } => self.translate_reference(schema, target),
            SchemaKind::AnyOf { parts, .. } if self.is_int_or_string(parts) => {
                let mut out = int_or_string_schema();
                out.description = self.describe(schema.description.as_deref());
                Ok(out)
            }
            SchemaKind::Object { .. } | SchemaKind::AllOf { .. } | SchemaKind::AnyOf { .. } => {
                self.translate_object(schema, ident)
            }
        }
    }

    fn translate_primitive(
        &mut self,
        schema: &StructuralSchema,
        r#type: &str,
        format: Option<&str>,
    ) -> OutputSchema {
        if !is_known_primitive(r#type, format) {
            self.diagnostics.report(Diagnostic::UnknownSchemaShape {
                r#type: r#type.to_string(),
                format: format.map(str::to_string),
            });
        }
        let mut out = primitive_schema(r#type, format);
        out.description = self.describe(schema.description.as_deref());
        out.required = schema.required.clone();
        out
    }

    /// Flatten an object, `allOf` or `anyOf` node into one object schema.
    pub fn translate_object(
        &mut self,
        schema: &StructuralSchema,
        ident: Option<&QualifiedTypeName>,
    ) -> Result<OutputSchema> {
        let mut out = self.flatten(schema, ident)?;
        out.description = self.describe(schema.description.as_deref());

        if let Some(gvk) = ident.and_then(|name| self.source.kind_metadata_for(name)) {
            tag_group_version_kind(&mut out, gvk);
        }
        Ok(out)
    }

    /// Apply the configured description limit.
    pub(crate) fn describe(&self, description: Option<&str>) -> Option<String> {
        description.and_then(|d| truncate_description(d, self.config.max_description_len))
    }
}
