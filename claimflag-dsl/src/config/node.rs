//! YAML-backed configuration tree
//!
//! A [`ConfigNode`] is a keyed view over a `serde_yaml::Value`. Missing
//! children read as null ("virtual") nodes so optional fields can be probed
//! without special cases; typed getters distinguish "absent" (`Ok(None)`) from
//! "present with the wrong type" (`Err`).

use claimflag_core::{DefinitionError, DefinitionResult};
use serde_yaml::{Mapping, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigNode {
    key: String,
    value: Value,
}

impl ConfigNode {
    /// An empty node with the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Value::Null,
        }
    }

    pub fn from_value(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Parse a YAML document into a node.
    pub fn from_yaml_str(key: impl Into<String>, yaml: &str) -> DefinitionResult<Self> {
        let value: Value = serde_yaml::from_str(yaml).map_err(|e| DefinitionError::Yaml {
            reason: e.to_string(),
        })?;
        Ok(Self::from_value(key, value))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// True when the node holds no value.
    pub fn is_virtual(&self) -> bool {
        self.value.is_null()
    }

    /// Child node by key; a null node if the child does not exist.
    pub fn child(&self, key: &str) -> ConfigNode {
        let value = self
            .value
            .as_mapping()
            .and_then(|m| m.get(key))
            .cloned()
            .unwrap_or(Value::Null);
        ConfigNode::from_value(key, value)
    }

    /// Children of a mapping node, in document order.
    pub fn children(&self) -> DefinitionResult<Vec<ConfigNode>> {
        let Some(mapping) = self.value.as_mapping() else {
            return match self.value {
                Value::Null => Ok(Vec::new()),
                _ => Err(self.type_error("a mapping")),
            };
        };
        mapping
            .iter()
            .map(|(k, v)| {
                let key = scalar_to_string(k)
                    .ok_or_else(|| self.type_error("a mapping with scalar keys"))?;
                Ok(ConfigNode::from_value(key, v.clone()))
            })
            .collect()
    }

    pub fn get_bool(&self) -> DefinitionResult<Option<bool>> {
        match &self.value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
            _ => Err(self.type_error("a boolean")),
        }
    }

    /// Scalar value as a string. Numbers and booleans are stringified.
    pub fn get_string(&self) -> DefinitionResult<Option<String>> {
        match &self.value {
            Value::Null => Ok(None),
            other => scalar_to_string(other)
                .map(Some)
                .ok_or_else(|| self.type_error("a string")),
        }
    }

    pub fn get_string_list(&self) -> DefinitionResult<Option<Vec<String>>> {
        match &self.value {
            Value::Null => Ok(None),
            Value::Sequence(items) => items
                .iter()
                .map(|item| scalar_to_string(item).ok_or_else(|| self.type_error("a list of strings")))
                .collect::<DefinitionResult<Vec<_>>>()
                .map(Some),
            _ => Err(self.type_error("a list of strings")),
        }
    }

    /// Set (or replace) a child value. A non-mapping node becomes a mapping.
    pub fn set_child(&mut self, key: &str, value: impl Into<Value>) {
        if !self.value.is_mapping() {
            self.value = Value::Mapping(Mapping::new());
        }
        if let Value::Mapping(mapping) = &mut self.value {
            mapping.insert(Value::String(key.to_string()), value.into());
        }
    }

    pub fn set_string_list(&mut self, key: &str, items: Vec<String>) {
        let sequence = items.into_iter().map(Value::String).collect::<Vec<_>>();
        self.set_child(key, Value::Sequence(sequence));
    }

    /// Attach another node as a child under its own key.
    pub fn set_node(&mut self, node: ConfigNode) {
        let ConfigNode { key, value } = node;
        self.set_child(&key, value);
    }

    pub fn to_yaml_string(&self) -> DefinitionResult<String> {
        serde_yaml::to_string(&self.value).map_err(|e| DefinitionError::Yaml {
            reason: e.to_string(),
        })
    }

    fn type_error(&self, expected: &str) -> DefinitionError {
        DefinitionError::InvalidFieldType {
            field: self.key.clone(),
            expected: expected.to_string(),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
enabled: true
description: "&aHi"
count: 3
permissions:
  - flag=build
  - flag=break
nested:
  inner: yes
"#;

    #[test]
    fn test_typed_getters() -> DefinitionResult<()> {
        let node = ConfigNode::from_yaml_str("root", DOC)?;
        assert_eq!(node.child("enabled").get_bool()?, Some(true));
        assert_eq!(node.child("description").get_string()?, Some("&aHi".to_string()));
        assert_eq!(node.child("count").get_string()?, Some("3".to_string()));
        assert_eq!(
            node.child("permissions").get_string_list()?,
            Some(vec!["flag=build".to_string(), "flag=break".to_string()])
        );
        Ok(())
    }

    #[test]
    fn test_missing_child_is_virtual() -> DefinitionResult<()> {
        let node = ConfigNode::from_yaml_str("root", DOC)?;
        let missing = node.child("contexts");
        assert!(missing.is_virtual());
        assert_eq!(missing.key(), "contexts");
        assert_eq!(missing.get_string_list()?, None);
        assert_eq!(missing.get_bool()?, None);
        Ok(())
    }

    #[test]
    fn test_wrong_type_names_field() -> DefinitionResult<()> {
        let node = ConfigNode::from_yaml_str("root", DOC)?;
        assert_eq!(
            node.child("permissions").get_bool(),
            Err(DefinitionError::InvalidFieldType {
                field: "permissions".to_string(),
                expected: "a boolean".to_string(),
            })
        );
        assert!(node.child("nested").get_string_list().is_err());
        Ok(())
    }

    #[test]
    fn test_string_booleans() {
        let node = ConfigNode::from_value("enabled", Value::String("False".to_string()));
        assert_eq!(node.get_bool(), Ok(Some(false)));
    }

    #[test]
    fn test_children_in_document_order() -> DefinitionResult<()> {
        let node = ConfigNode::from_yaml_str("root", DOC)?;
        let keys: Vec<String> = node.children()?.iter().map(|c| c.key().to_string()).collect();
        assert_eq!(keys, vec!["enabled", "description", "count", "permissions", "nested"]);
        Ok(())
    }

    #[test]
    fn test_set_and_write() -> DefinitionResult<()> {
        let mut node = ConfigNode::new("def");
        node.set_child("enabled", false);
        node.set_string_list("permissions", vec!["flag=build".to_string()]);
        node.set_child("enabled", true);

        let yaml = node.to_yaml_string()?;
        assert_eq!(yaml, "enabled: true\npermissions:\n- flag=build\n");

        let reread = ConfigNode::from_yaml_str("def", &yaml)?;
        assert_eq!(reread, node);
        Ok(())
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            ConfigNode::from_yaml_str("root", "enabled: [unclosed"),
            Err(DefinitionError::Yaml { .. })
        ));
    }
}
