//! Flag definitions: named bundles of (flag, contexts) permission entries

use crate::{Context, ContextSet, DefinitionError, DefinitionResult, FlagReference, RichText};

/// One linked flag plus the contexts scoping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionEntry {
    flag: FlagReference,
    contexts: ContextSet,
}

impl PermissionEntry {
    pub fn new(flag: FlagReference, contexts: impl IntoIterator<Item = Context>) -> Self {
        Self {
            flag,
            contexts: contexts.into_iter().collect(),
        }
    }

    pub fn flag(&self) -> &FlagReference {
        &self.flag
    }

    pub fn contexts(&self) -> &ContextSet {
        &self.contexts
    }
}

/// A named, switchable bundle of permission entries.
///
/// Always holds at least one [`PermissionEntry`]; the entries are fixed at
/// construction. Only the enabled switch and the definition-wide contexts can
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDefinition {
    display_name: String,
    enabled: bool,
    description: RichText,
    permissions: Vec<PermissionEntry>,
    contexts: ContextSet,
}

impl FlagDefinition {
    /// Build an enabled definition with no definition-wide contexts.
    ///
    /// Fails with [`DefinitionError::MissingPermissions`] when `permissions`
    /// is empty.
    pub fn new(
        permissions: Vec<PermissionEntry>,
        display_name: impl Into<String>,
        description: RichText,
    ) -> DefinitionResult<Self> {
        let display_name = display_name.into();
        if permissions.is_empty() {
            return Err(DefinitionError::MissingPermissions {
                definition: display_name,
            });
        }
        Ok(Self {
            display_name,
            enabled: true,
            description,
            permissions,
            contexts: ContextSet::new(),
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn description(&self) -> &RichText {
        &self.description
    }

    pub fn permissions(&self) -> &[PermissionEntry] {
        &self.permissions
    }

    pub fn definition_contexts(&self) -> &ContextSet {
        &self.contexts
    }

    pub fn set_definition_contexts(&mut self, contexts: impl IntoIterator<Item = Context>) {
        self.contexts = contexts.into_iter().collect();
    }
}
