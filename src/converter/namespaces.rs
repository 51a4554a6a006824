use std::collections::BTreeMap;
use std::fmt;

use crate::common::names::{compose_dotted, reverse_labels, swap_leading_segments};
use crate::common::{DefinitionKey, NamespacePath, QualifiedTypeName};
use crate::config::{GeneratorConfig, NamingMode};
use crate::converter::diagnostics::Diagnostic;
use crate::swagger::GroupVersionKind;

/// Naming profile of one API group, fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNamingProfile {
    pub group: String,
    /// Longest whole-segment prefix shared by the group's member namespaces.
    pub shared_prefix: NamespacePath,
    /// Leading part of every key mapped through this profile.
    pub mapped_namespace: String,
}

/// Decides whether `candidate` should replace `incumbent` when both
/// profiles claim the same namespace.
pub type TieBreakPolicy = fn(candidate: &GroupNamingProfile, incumbent: &GroupNamingProfile) -> bool;

/// The longer group label wins; on equal length the first profile stays.
///
/// A heuristic matching observed output, not a proof that the longer label
/// is the more specific group.
pub fn longest_group_label(candidate: &GroupNamingProfile, incumbent: &GroupNamingProfile) -> bool {
    candidate.group.len() > incumbent.group.len()
}

/// Turn a group label into the leading part of a definition key.
pub fn group_to_namespace(group: &str, mode: NamingMode) -> String {
    match mode {
        NamingMode::Reversed => reverse_labels(group),
        NamingMode::Legacy => group.to_string(),
    }
}

/// Fallback for namespaces no group claims: join all segments with dots and
/// swap the first two dot-segments (`k8s.io.api.core.v1` → `io.k8s.api.core.v1`).
pub fn generic_cleanup(namespace: &NamespacePath, local_name: &str) -> String {
    let dotted = namespace.segments().join(".");
    compose_dotted([swap_leading_segments(&dotted).as_str(), local_name])
}

/// Maps qualified type names to definition keys.
#[derive(Clone)]
pub struct NamespaceMapper {
    profiles: Vec<GroupNamingProfile>,
    tie_break: TieBreakPolicy,
}

impl fmt::Debug for NamespaceMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceMapper")
            .field("profiles", &self.profiles)
            .finish_non_exhaustive()
    }
}

impl NamespaceMapper {
    /// Compute one profile per group present among `kinds`.
    ///
    /// Only member namespaces under the configured root contribute; a group
    /// with no such member gets no profile.
    pub fn build(kinds: &[(QualifiedTypeName, GroupVersionKind)], config: &GeneratorConfig) -> Self {
        let mut shared: BTreeMap<&str, NamespacePath> = BTreeMap::new();
        for (name, gvk) in kinds {
            if !config.in_root(&name.namespace) {
                continue;
            }
            shared
                .entry(gvk.group.as_str())
                .and_modify(|prefix| *prefix = prefix.common_prefix(&name.namespace))
                .or_insert_with(|| name.namespace.clone());
        }

        let profiles = shared
            .into_iter()
            .map(|(group, shared_prefix)| GroupNamingProfile {
                group: group.to_string(),
                mapped_namespace: group_to_namespace(group, config.naming_mode),
                shared_prefix,
            })
            .collect();

        let mapper = Self {
            profiles,
            tie_break: longest_group_label,
        };
        mapper.log_profiles(kinds);
        mapper
    }

    pub fn from_profiles(profiles: Vec<GroupNamingProfile>) -> Self {
        Self {
            profiles,
            tie_break: longest_group_label,
        }
    }

    /// Replace the tie-break used when several profiles claim a namespace.
    pub fn with_tie_break(mut self, policy: TieBreakPolicy) -> Self {
        self.tie_break = policy;
        self
    }

    pub fn profiles(&self) -> &[GroupNamingProfile] {
        &self.profiles
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.group.as_str())
    }

    fn candidates<'a>(
        &'a self,
        namespace: &'a NamespacePath,
    ) -> impl Iterator<Item = &'a GroupNamingProfile> + 'a {
        self.profiles
            .iter()
            .filter(move |p| p.shared_prefix.is_prefix_of(namespace))
    }

    /// The profile whose shared prefix covers `namespace`, tie-broken.
    pub fn matching_profile<'a>(
        &'a self,
        namespace: &'a NamespacePath,
    ) -> Option<&'a GroupNamingProfile> {
        self.candidates(namespace).fold(None, |best, candidate| match best {
            Some(incumbent) if !(self.tie_break)(candidate, incumbent) => Some(incumbent),
            _ => Some(candidate),
        })
    }

    /// Report when more than one profile claims `namespace`.
    pub fn ambiguity(&self, namespace: &NamespacePath) -> Option<Diagnostic> {
        let candidates: Vec<String> = self.candidates(namespace).map(|p| p.group.clone()).collect();
        if candidates.len() < 2 {
            return None;
        }
        let chosen = self.matching_profile(namespace)?.group.clone();
        Some(Diagnostic::AmbiguousNamespace {
            namespace: namespace.to_string(),
            candidates,
            chosen,
        })
    }

    pub fn map_name(&self, namespace: &NamespacePath, local_name: &str) -> DefinitionKey {
        let key = match self.matching_profile(namespace) {
            Some(profile) => {
                let remaining = namespace
                    .strip_prefix(&profile.shared_prefix)
                    .unwrap_or_default();
                compose_dotted(
                    std::iter::once(profile.mapped_namespace.as_str())
                        .chain(remaining.iter().map(String::as_str))
                        .chain(std::iter::once(local_name)),
                )
            }
            None => generic_cleanup(namespace, local_name),
        };
        DefinitionKey::new(key)
    }

    pub fn map_type(&self, name: &QualifiedTypeName) -> DefinitionKey {
        self.map_name(&name.namespace, &name.local_name)
    }

    fn log_profiles(&self, kinds: &[(QualifiedTypeName, GroupVersionKind)]) {
        for profile in &self.profiles {
            tracing::info!(
                "[{}] shared prefix = {} => {}",
                profile.group,
                profile.shared_prefix,
                profile.mapped_namespace
            );
            for (name, _) in kinds.iter().filter(|(_, gvk)| gvk.group == profile.group) {
                tracing::info!("\t{name} => {}", self.map_type(name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_cleanup_swaps_domain_labels() {
        let namespace = NamespacePath::from("k8s.io/apimachinery/pkg/apis/meta/v1");
        assert_eq!(
            generic_cleanup(&namespace, "ObjectMeta"),
            "io.k8s.apimachinery.pkg.apis.meta.v1.ObjectMeta"
        );
        assert_eq!(generic_cleanup(&NamespacePath::default(), "Bare"), "Bare");
    }

    #[test]
    fn legacy_mode_keeps_label_order() {
        assert_eq!(group_to_namespace("apps.example.com", NamingMode::Legacy), "apps.example.com");
        assert_eq!(group_to_namespace("apps.example.com", NamingMode::Reversed), "com.example.apps");
    }
}
