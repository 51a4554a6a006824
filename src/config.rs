use serde::Deserialize;

use crate::common::NamespacePath;

/// Reserved key prefix of definitions owned by the base platform document.
pub const DEFAULT_FOREIGN_PREFIX: &str = "io.k8s";

/// How a group label becomes the leading part of a definition key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum NamingMode {
    /// `apps.example.com` → `com.example.apps`, as the platform's own document names groups.
    #[default]
    Reversed,
    /// The group label verbatim.
    Legacy,
}

/// Settings for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Only namespaces under this root count toward a group's shared prefix.
    pub root_namespace: Option<NamespacePath>,
    pub naming_mode: NamingMode,
    pub foreign_prefix: String,
    /// `Some(0)` drops descriptions, `Some(n)` truncates them to `n` bytes.
    pub max_description_len: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root_namespace: None,
            naming_mode: NamingMode::default(),
            foreign_prefix: DEFAULT_FOREIGN_PREFIX.to_string(),
            max_description_len: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_root_namespace(mut self, root: &str) -> Self {
        self.root_namespace = Some(NamespacePath::from(root));
        self
    }

    pub fn with_naming_mode(mut self, mode: NamingMode) -> Self {
        self.naming_mode = mode;
        self
    }

    pub fn with_max_description_len(mut self, max_len: usize) -> Self {
        self.max_description_len = Some(max_len);
        self
    }

    /// Whether a namespace lies under the configured root.
    pub fn in_root(&self, namespace: &NamespacePath) -> bool {
        self.root_namespace
            .as_ref()
            .map_or(true, |root| root.is_prefix_of(namespace))
    }
}
