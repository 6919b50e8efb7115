//! Integration tests for whole-file definition loading
//!
//! Tests verify:
//! - Abort and Skip policies
//! - Rejections keep their definition name and root cause
//! - Rendered documents reload to the same definitions

use claimflag_dsl::{load_definitions, render_definitions};
use claimflag_test_utils::assertions::assert_equivalent;
use claimflag_test_utils::fixtures;
use claimflag_test_utils::*;

fn skip() -> DefinitionOptions {
    DefinitionOptions::default().with_policy(InvalidDefinitionPolicy::Skip)
}

#[test]
fn test_mixed_file_aborts_on_typo() {
    let err = load_definitions(fixtures::MIXED_FILE, &standard_registry(), &DefinitionOptions::default())
        .unwrap_err();
    assert_eq!(err.definition(), Some("typo"));
    assert_eq!(
        err.root(),
        &DefinitionError::UnknownFlag {
            name: "block-brake".to_string()
        }
    );
    assert!(err.to_string().contains("typo"));
}

#[test]
fn test_mixed_file_skips_typo() -> DefinitionResult<()> {
    let set = load_definitions(fixtures::MIXED_FILE, &standard_registry(), &skip())?;

    let names: Vec<&str> = set.iter().map(|d| d.display_name()).collect();
    assert_eq!(names, vec!["no-mob-griefing", "admin-items"]);

    let rejected = set.rejected();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].name, "typo");
    assert_eq!(
        rejected[0].error.root(),
        &DefinitionError::UnknownFlag {
            name: "block-brake".to_string()
        }
    );

    let admin = set.get("ADMIN-ITEMS").map(|d| (d.is_enabled(), d.definition_contexts().len()));
    assert_eq!(admin, Some((false, 1)));
    Ok(())
}

#[test]
fn test_tagged_source_kept() -> DefinitionResult<()> {
    let set = load_definitions(fixtures::MIXED_FILE, &standard_registry(), &skip())?;
    let definition = set.get("no-mob-griefing").map(|d| d.permissions()[0].contexts().clone());
    assert_eq!(
        definition.map(|c| c.contains(&Context::new("source", "#minecraft:monsters"))),
        Some(true)
    );
    Ok(())
}

#[test]
fn test_rendered_file_reloads() -> DefinitionResult<()> {
    let set = load_definitions(fixtures::MIXED_FILE, &standard_registry(), &skip())?;
    let yaml = render_definitions(&set, &DefinitionOptions::default())?;
    assert!(!yaml.contains("typo"));

    let reloaded = load_definitions(&yaml, &standard_registry(), &DefinitionOptions::default())?;
    assert_eq!(reloaded.len(), set.len());
    for (actual, expected) in reloaded.iter().zip(set.iter()) {
        assert_equivalent(actual, expected);
    }
    Ok(())
}

#[test]
fn test_malformed_yaml_fails_under_both_policies() {
    for options in [DefinitionOptions::default(), skip()] {
        let result = load_definitions("a: [unclosed", &standard_registry(), &options);
        assert!(matches!(result, Err(DefinitionError::Yaml { .. })));
    }
}

#[test]
fn test_non_mapping_document() {
    let result = load_definitions("- just\n- a list\n", &standard_registry(), &skip());
    assert!(matches!(result, Err(DefinitionError::InvalidFieldType { .. })));
}

#[test]
fn test_skip_records_every_failure() -> DefinitionResult<()> {
    let yaml = r#"
one:
  enabled: true
two:
  enabled: true
  permissions: ["flag=build, weather=rain"]
three:
  enabled: true
  contexts: ["default=nowhere"]
  permissions: ["flag=build"]
"#;
    let set = load_definitions(yaml, &standard_registry(), &skip())?;
    assert!(set.is_empty());

    let roots: Vec<&DefinitionError> = set.rejected().iter().map(|r| r.error.root()).collect();
    assert_eq!(
        roots,
        vec![
            &DefinitionError::MissingPermissions {
                definition: "one".to_string()
            },
            &DefinitionError::InvalidContextKey {
                key: "weather".to_string(),
                value: "rain".to_string()
            },
            &DefinitionError::InvalidContextValue {
                key: "default".to_string(),
                value: "nowhere".to_string()
            },
        ]
    );
    Ok(())
}

#[test]
fn test_wrapper_beside_top_level_definition_is_rejected() {
    let yaml = r#"
definitions:
  a:
    enabled: true
    permissions: ["flag=build"]
b:
  enabled: true
  permissions: ["flag=nope"]
"#;
    for options in [DefinitionOptions::default(), skip()] {
        assert_eq!(
            load_definitions(yaml, &standard_registry(), &options).map(|set| set.len()),
            Err(DefinitionError::MixedDocumentLayout {
                key: "b".to_string()
            })
        );
    }
}

#[test]
fn test_definition_named_definitions() -> DefinitionResult<()> {
    let yaml = r#"
definitions:
  enabled: true
  permissions: ["flag=build"]
"#;
    let set = load_definitions(yaml, &standard_registry(), &DefinitionOptions::default())?;
    assert_eq!(set.len(), 1);
    assert_eq!(
        set.get("definitions").map(|d| d.permissions()[0].flag().name().to_string()),
        Some("build".to_string())
    );
    Ok(())
}

#[test]
fn test_definition_named_definitions_beside_others() -> DefinitionResult<()> {
    let yaml = r#"
definitions:
  enabled: false
  permissions: ["flag=build"]
other:
  enabled: true
  permissions: ["flag=break"]
"#;
    let set = load_definitions(yaml, &standard_registry(), &DefinitionOptions::default())?;
    let names: Vec<&str> = set.iter().map(|d| d.display_name()).collect();
    assert_eq!(names, vec!["definitions", "other"]);
    Ok(())
}
