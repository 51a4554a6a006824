use std::collections::BTreeMap;

use crate::converter::structs::create_object_schema;
use crate::swagger::OutputSchema;

/// Properties and required names gathered while flattening composition.
///
/// Later merges win: a property merged after an inherited one of the same
/// name replaces it.
#[derive(Debug, Default)]
pub struct Flattened {
    properties: BTreeMap<String, OutputSchema>,
    required: Vec<String>,
}

impl Flattened {
    pub fn merge_property(&mut self, name: &str, schema: OutputSchema) {
        self.properties.insert(name.to_string(), schema);
    }

    /// Union of required names, first-seen order.
    pub fn merge_required(&mut self, names: &[String]) {
        for name in names {
            if !self.required.contains(name) {
                self.required.push(name.clone());
            }
        }
    }

    pub fn into_object(self) -> OutputSchema {
        create_object_schema(self.properties, self.required)
    }
}
