//! Flag definition reader/writer over a [`ConfigNode`]
//!
//! A definition block looks like:
//!
//! ```yaml
//! no-zombie-doors:
//!   enabled: true
//!   description: "&cZombies cannot break doors"
//!   contexts:
//!     - default=basic
//!   permissions:
//!     - flag=block-break, source=zombie, target=wooden_door
//! ```

use super::node::ConfigNode;
use crate::parser::{
    parse_definition_context, render_definition_context, render_permission_entry, ClauseParser,
};
use claimflag_core::{
    legacy, ContextSet, DefinitionError, DefinitionOptions, DefinitionResult, FlagDefinition,
    FlagRegistry, RichText,
};

pub const ENABLED: &str = "enabled";
pub const DESCRIPTION: &str = "description";
pub const CONTEXTS: &str = "contexts";
pub const PERMISSIONS: &str = "permissions";

/// Read one flag definition from a node keyed by its display name.
///
/// Fails fast: the first invalid field or clause aborts the whole definition
/// and the error is tagged with the display name.
pub fn deserialize_definition(
    node: &ConfigNode,
    registry: &dyn FlagRegistry,
    options: &DefinitionOptions,
) -> DefinitionResult<FlagDefinition> {
    read_definition(node, registry, options).map_err(|e| e.in_definition(node.key()))
}

fn read_definition(
    node: &ConfigNode,
    registry: &dyn FlagRegistry,
    options: &DefinitionOptions,
) -> DefinitionResult<FlagDefinition> {
    let display_name = node.key();

    let enabled = node
        .child(ENABLED)
        .get_bool()?
        .ok_or_else(|| DefinitionError::MissingField {
            field: ENABLED.to_string(),
        })?;

    let description = match node.child(DESCRIPTION).get_string()? {
        Some(text) => legacy::decode(&text, options.legacy_marker),
        None => RichText::empty(),
    };

    let permissions = node
        .child(PERMISSIONS)
        .get_string_list()?
        .filter(|entries| !entries.is_empty())
        .ok_or_else(|| DefinitionError::MissingPermissions {
            definition: display_name.to_string(),
        })?;

    let parser = ClauseParser::new(registry, options);
    let entries = permissions
        .iter()
        .map(|entry| parser.parse_permission_entry(entry))
        .collect::<DefinitionResult<Vec<_>>>()?;

    let contexts = node
        .child(CONTEXTS)
        .get_string_list()?
        .map(|clauses| {
            clauses
                .iter()
                .map(|clause| parse_definition_context(display_name, clause))
                .collect::<DefinitionResult<ContextSet>>()
        })
        .transpose()?;

    let mut definition = FlagDefinition::new(entries, display_name, description)?;
    definition.set_enabled(enabled);
    if let Some(contexts) = contexts {
        definition.set_definition_contexts(contexts);
    }

    tracing::debug!(
        definition = display_name,
        permissions = definition.permissions().len(),
        contexts = definition.definition_contexts().len(),
        "parsed flag definition"
    );
    Ok(definition)
}

/// Write a definition's fields into `node`. Never fails; the definition's
/// construction invariants already guarantee a well-formed result.
pub fn serialize_definition(
    definition: &FlagDefinition,
    node: &mut ConfigNode,
    options: &DefinitionOptions,
) {
    node.set_child(ENABLED, definition.is_enabled());

    if !definition.description().is_empty() {
        node.set_child(
            DESCRIPTION,
            legacy::encode(definition.description(), options.legacy_marker),
        );
    }

    if !definition.definition_contexts().is_empty() {
        let contexts = definition
            .definition_contexts()
            .iter()
            .map(render_definition_context)
            .collect();
        node.set_string_list(CONTEXTS, contexts);
    }

    let permissions = definition
        .permissions()
        .iter()
        .map(render_permission_entry)
        .collect();
    node.set_string_list(PERMISSIONS, permissions);
}

/// Serialize into a fresh node keyed by the definition's display name.
pub fn definition_to_node(definition: &FlagDefinition, options: &DefinitionOptions) -> ConfigNode {
    let mut node = ConfigNode::new(definition.display_name());
    serialize_definition(definition, &mut node, options);
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimflag_core::{Context, Flag, InMemoryFlagRegistry};

    fn registry() -> InMemoryFlagRegistry {
        ["build", "break", "block-break", "entity-damage"]
            .into_iter()
            .map(Flag::new)
            .collect()
    }

    fn node(name: &str, yaml: &str) -> ConfigNode {
        match ConfigNode::from_yaml_str(name, yaml) {
            Ok(node) => node,
            Err(e) => panic!("bad fixture: {}", e),
        }
    }

    #[test]
    fn test_deserialize_full_block() -> DefinitionResult<()> {
        let node = node(
            "no-zombie-doors",
            r#"
enabled: false
description: "&cZombies cannot break doors"
contexts:
  - default=basic
  - override=admin
permissions:
  - flag=block-break, source=zombie, target=wooden_door
"#,
        );
        let definition = deserialize_definition(&node, &registry(), &DefinitionOptions::default())?;

        assert_eq!(definition.display_name(), "no-zombie-doors");
        assert!(!definition.is_enabled());
        assert_eq!(definition.description().plain_text(), "Zombies cannot break doors");
        assert_eq!(definition.permissions().len(), 1);
        assert!(definition
            .definition_contexts()
            .contains(&Context::new("gd_claim_default", "basic")));
        assert!(definition
            .definition_contexts()
            .contains(&Context::new("gd_claim_override", "admin")));
        Ok(())
    }

    #[test]
    fn test_missing_description_is_empty() -> DefinitionResult<()> {
        let node = node("d", "enabled: true\npermissions: [\"flag=build\"]\n");
        let definition = deserialize_definition(&node, &registry(), &DefinitionOptions::default())?;
        assert!(definition.description().is_empty());
        assert!(definition.definition_contexts().is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_enabled() {
        let node = node("d", "permissions: [\"flag=build\"]\n");
        let err = deserialize_definition(&node, &registry(), &DefinitionOptions::default()).unwrap_err();
        assert_eq!(err.definition(), Some("d"));
        assert_eq!(
            err.root(),
            &DefinitionError::MissingField {
                field: "enabled".to_string()
            }
        );
    }

    #[test]
    fn test_absent_and_empty_permissions() {
        for yaml in ["enabled: true\n", "enabled: true\npermissions: []\n"] {
            let node = node("lonely", yaml);
            let result = deserialize_definition(&node, &registry(), &DefinitionOptions::default());
            assert_eq!(
                result,
                Err(DefinitionError::MissingPermissions {
                    definition: "lonely".to_string()
                })
            );
        }
    }

    #[test]
    fn test_clause_errors_carry_definition_name() {
        let node = node("weather", "enabled: true\npermissions: [\"flag=build, weather=rain\"]\n");
        let err = deserialize_definition(&node, &registry(), &DefinitionOptions::default()).unwrap_err();
        assert_eq!(err.definition(), Some("weather"));
        assert_eq!(
            err.root(),
            &DefinitionError::InvalidContextKey {
                key: "weather".to_string(),
                value: "rain".to_string(),
            }
        );
    }

    #[test]
    fn test_serialize_layout() -> DefinitionResult<()> {
        let node = node(
            "d",
            r#"
enabled: true
description: "&aGreen"
contexts: ["Override=Admin"]
permissions: ["flag=Build, item_name=Excalibur"]
"#,
        );
        let definition = deserialize_definition(&node, &registry(), &DefinitionOptions::default())?;
        let out = definition_to_node(&definition, &DefinitionOptions::default());

        assert_eq!(out.key(), "d");
        assert_eq!(out.child(ENABLED).get_bool()?, Some(true));
        assert_eq!(out.child(DESCRIPTION).get_string()?, Some("&aGreen".to_string()));
        assert_eq!(
            out.child(CONTEXTS).get_string_list()?,
            Some(vec!["gd_claim_override=admin".to_string()])
        );
        assert_eq!(
            out.child(PERMISSIONS).get_string_list()?,
            Some(vec!["flag=build, item_name=Excalibur".to_string()])
        );
        Ok(())
    }

    #[test]
    fn test_serialize_omits_empty_optional_fields() -> DefinitionResult<()> {
        let node = node("d", "enabled: true\npermissions: [\"flag=break, state=on\"]\n");
        let definition = deserialize_definition(&node, &registry(), &DefinitionOptions::default())?;
        let out = definition_to_node(&definition, &DefinitionOptions::default());

        assert!(out.child(DESCRIPTION).is_virtual());
        assert!(out.child(CONTEXTS).is_virtual());
        Ok(())
    }
}
