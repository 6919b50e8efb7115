//! Whole-file loading of flag definitions
//!
//! A definitions file is a YAML mapping of display name to definition block,
//! optionally nested under a top-level `definitions:` key. The wrapper must
//! then be the only top-level key; a top-level block that itself has
//! `enabled` or `permissions` is a definition named `definitions`.

use super::node::ConfigNode;
use super::serializer::{definition_to_node, deserialize_definition, ENABLED, PERMISSIONS};
use claimflag_core::{
    DefinitionError, DefinitionOptions, DefinitionResult, FlagDefinition, FlagRegistry,
    InvalidDefinitionPolicy,
};
use std::collections::HashSet;

/// Top-level key that may wrap the definition mapping.
pub const DEFINITIONS: &str = "definitions";

/// A definition that failed to load under [`InvalidDefinitionPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedDefinition {
    pub name: String,
    pub error: DefinitionError,
}

/// Definitions loaded from one file, in document order.
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    definitions: Vec<FlagDefinition>,
    rejected: Vec<RejectedDefinition>,
}

impl DefinitionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Display names are unique ignoring case.
    pub fn insert(&mut self, definition: FlagDefinition) -> DefinitionResult<()> {
        if self.get(definition.display_name()).is_some() {
            return Err(DefinitionError::DuplicateDefinition {
                definition: definition.display_name().to_string(),
            });
        }
        self.definitions.push(definition);
        Ok(())
    }

    /// Look up a definition by display name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&FlagDefinition> {
        self.definitions
            .iter()
            .find(|d| d.display_name().eq_ignore_ascii_case(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FlagDefinition> {
        self.definitions
            .iter_mut()
            .find(|d| d.display_name().eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlagDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions skipped during loading.
    pub fn rejected(&self) -> &[RejectedDefinition] {
        &self.rejected
    }
}

/// Load every definition in a YAML document.
///
/// With [`InvalidDefinitionPolicy::Abort`] the first invalid definition fails
/// the load. With [`InvalidDefinitionPolicy::Skip`] it is logged, recorded in
/// [`DefinitionSet::rejected`] and loading continues. Malformed YAML always
/// fails.
pub fn load_definitions(
    yaml: &str,
    registry: &dyn FlagRegistry,
    options: &DefinitionOptions,
) -> DefinitionResult<DefinitionSet> {
    let root = ConfigNode::from_yaml_str("", yaml)?;
    let container = unwrap_definitions(root)?;

    let mut set = DefinitionSet::new();
    let mut seen = HashSet::new();
    for node in container.children()? {
        let result = if seen.insert(node.key().to_lowercase()) {
            deserialize_definition(&node, registry, options).and_then(|d| set.insert(d))
        } else {
            Err(DefinitionError::DuplicateDefinition {
                definition: node.key().to_string(),
            })
        };

        if let Err(error) = result {
            match options.on_invalid {
                InvalidDefinitionPolicy::Abort => return Err(error),
                InvalidDefinitionPolicy::Skip => {
                    tracing::warn!(definition = node.key(), error = %error, "skipping invalid flag definition");
                    set.rejected.push(RejectedDefinition {
                        name: node.key().to_string(),
                        error,
                    });
                }
            }
        }
    }

    tracing::info!(
        loaded = set.len(),
        rejected = set.rejected.len(),
        "loaded flag definitions"
    );
    Ok(set)
}

/// The node holding the definition blocks: the `definitions:` wrapper when
/// present, otherwise the document root.
fn unwrap_definitions(root: ConfigNode) -> DefinitionResult<ConfigNode> {
    let wrapped = root.child(DEFINITIONS);
    let is_wrapper = wrapped.value().is_mapping()
        && wrapped.child(ENABLED).is_virtual()
        && wrapped.child(PERMISSIONS).is_virtual();
    if !is_wrapper {
        return Ok(root);
    }

    match root.children()?.iter().find(|n| n.key() != DEFINITIONS) {
        Some(sibling) => Err(DefinitionError::MixedDocumentLayout {
            key: sibling.key().to_string(),
        }),
        None => Ok(wrapped),
    }
}

/// Render a set back into a YAML document (unwrapped, document order).
pub fn render_definitions(
    set: &DefinitionSet,
    options: &DefinitionOptions,
) -> DefinitionResult<String> {
    let mut root = ConfigNode::new("");
    for definition in set.iter() {
        root.set_node(definition_to_node(definition, options));
    }
    root.to_yaml_string()
}
