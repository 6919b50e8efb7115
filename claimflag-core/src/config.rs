//! Configuration types

use crate::{DEFAULT_NAMESPACE, LEGACY_MARKER};
use serde::{Deserialize, Serialize};

/// What a multi-definition load does when one definition is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidDefinitionPolicy {
    /// Stop at the first invalid definition and return its error.
    #[default]
    Abort,
    /// Log the error, record the rejection and keep loading.
    Skip,
}

/// Options shared by the definition reader and writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionOptions {
    /// Marker character for legacy color codes in descriptions.
    pub legacy_marker: char,
    /// Namespace prepended to bare `source`/`target` values.
    pub default_namespace: String,
    pub on_invalid: InvalidDefinitionPolicy,
}

impl Default for DefinitionOptions {
    fn default() -> Self {
        Self {
            legacy_marker: LEGACY_MARKER,
            default_namespace: DEFAULT_NAMESPACE.to_string(),
            on_invalid: InvalidDefinitionPolicy::Abort,
        }
    }
}

impl DefinitionOptions {
    pub fn with_policy(mut self, on_invalid: InvalidDefinitionPolicy) -> Self {
        self.on_invalid = on_invalid;
        self
    }
}
