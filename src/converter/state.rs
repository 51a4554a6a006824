use std::collections::{BTreeMap, BTreeSet};
use std::mem;

use crate::common::{DefinitionKey, QualifiedTypeName};
use crate::swagger::OutputSchema;

/// Visited set and pending worklist of one closure run.
#[derive(Debug, Default)]
pub struct ClosureState {
    visited: BTreeSet<QualifiedTypeName>,
    pending: BTreeSet<QualifiedTypeName>,
}

impl ClosureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visited(&self, name: &QualifiedTypeName) -> bool {
        self.visited.contains(name)
    }

    /// Returns `false` when `name` had already been visited.
    pub fn mark_visited(&mut self, name: QualifiedTypeName) -> bool {
        self.pending.remove(&name);
        self.visited.insert(name)
    }

    /// Queue a discovered reference for the next round unless already visited.
    pub fn register(&mut self, name: &QualifiedTypeName) -> bool {
        !self.visited.contains(name) && self.pending.insert(name.clone())
    }

    /// Hand over this round's worklist, leaving an empty one for discoveries.
    pub fn take_pending(&mut self) -> BTreeSet<QualifiedTypeName> {
        mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Append-only output definitions of one run.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    definitions: BTreeMap<DefinitionKey, OutputSchema>,
    owners: BTreeMap<DefinitionKey, QualifiedTypeName>,
}

/// Outcome of [`DefinitionRegistry::emit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    Added,
    /// The key is already held by a different source type.
    Collision { owner: QualifiedTypeName },
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition. An occupied key keeps its first schema.
    pub fn emit(
        &mut self,
        key: DefinitionKey,
        owner: &QualifiedTypeName,
        schema: OutputSchema,
    ) -> Emitted {
        if let Some(existing) = self.owners.get(&key) {
            return Emitted::Collision {
                owner: existing.clone(),
            };
        }
        self.owners.insert(key.clone(), owner.clone());
        self.definitions.insert(key, schema);
        Emitted::Added
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn into_definitions(self) -> BTreeMap<DefinitionKey, OutputSchema> {
        self.definitions
    }
}
