use crate::common::QualifiedTypeName;
use crate::converter::conversion::Translator;
use crate::converter::merging::Flattened;
use crate::converter::types::UNKNOWN_UNION_FORMAT;
use crate::error::{Error, Result};
use crate::schema::{SchemaKind, StructuralSchema};
use crate::source::SchemaSource;
use crate::swagger::OutputSchema;

impl<S: SchemaSource + ?Sized> Translator<'_, S> {
    /// `anyOf` whose branches are plain `integer` and `string`, both present.
    pub(crate) fn is_int_or_string(&self, parts: &[StructuralSchema]) -> bool {
        let (mut integer, mut string) = (false, false);
        for part in parts {
            match &part.kind {
                SchemaKind::Primitive { r#type, .. } if r#type == "integer" => integer = true,
                SchemaKind::Primitive { r#type, .. } if r#type == "string" => string = true,
                _ => return false,
            }
        }
        integer && string
    }

    /// Collapse a node and everything it composes into one object schema.
    ///
    /// `allOf` parents are merged depth first, then the node's own
    /// properties, which override inherited ones. `anyOf` branches are merged
    /// the same way without their required names, and the result is tagged
    /// as an unknown union: the alternatives are lost.
    pub(crate) fn flatten(
        &mut self,
        schema: &StructuralSchema,
        ident: Option<&QualifiedTypeName>,
    ) -> Result<OutputSchema> {
        let mut walk: Vec<QualifiedTypeName> = ident.cloned().into_iter().collect();
        let mut flattened = Flattened::default();
        self.collect(schema, &mut flattened, &mut walk, true)?;

        let mut out = flattened.into_object();
        if matches!(schema.kind, SchemaKind::AnyOf { .. }) {
            out.format = Some(UNKNOWN_UNION_FORMAT.to_string());
        }
        Ok(out)
    }

    fn collect(
        &mut self,
        node: &StructuralSchema,
        flattened: &mut Flattened,
        walk: &mut Vec<QualifiedTypeName>,
        inherit_required: bool,
    ) -> Result<()> {
        match &node.kind {
            SchemaKind::AllOf { parts, .. } => {
                for part in parts {
                    self.collect_parent(part, flattened, walk, inherit_required)?;
                }
            }
            SchemaKind::AnyOf { parts, .. } => {
                for part in parts {
                    self.collect_parent(part, flattened, walk, false)?;
                }
            }
            _ => {}
        }

        if let Some(properties) = node.properties() {
            for (name, property) in properties {
                let translated = self.translate(property, None)?;
                flattened.merge_property(name, translated);
            }
        }
        if inherit_required {
            flattened.merge_required(&node.required);
        }
        Ok(())
    }

    /// Merge one composed part. A reference is resolved a single hop; the
    /// target's own composition is then walked by the same recursion.
    fn collect_parent(
        &mut self,
        part: &StructuralSchema,
        flattened: &mut Flattened,
        walk: &mut Vec<QualifiedTypeName>,
        inherit_required: bool,
    ) -> Result<()> {
        let Some(target) = part.as_reference() else {
            return self.collect(part, flattened, walk, inherit_required);
        };

        if walk.contains(target) {
            let mut cycle = walk.clone();
            cycle.push(target.clone());
            return Err(Error::CompositionCycle { cycle });
        }

        if let Some(resolved) = self.resolve(target)? {
            walk.push(target.clone());
            let merged = self.collect(&resolved, flattened, walk, inherit_required);
            walk.pop();
            merged?;
        }
        Ok(())
    }
}
