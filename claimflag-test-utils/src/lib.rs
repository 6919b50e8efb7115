//! CLAIMFLAG Test Utilities
//!
//! Centralized test infrastructure for the CLAIMFLAG workspace:
//! - Mock flag registries
//! - Proptest generators for contexts, rich text and definitions
//! - YAML fixtures for common scenarios
//! - Custom assertions for definition errors and round-trips

// Re-export core types for convenience
pub use claimflag_core::{
    keys, legacy, ClaimType, Context, ContextSet, Decorations, DefinitionError,
    DefinitionOptions, DefinitionResult, Flag, FlagDefinition, FlagReference, FlagRegistry,
    InMemoryFlagRegistry, InvalidDefinitionPolicy, NamedColor, PermissionEntry, RichText, Style,
};

use std::sync::atomic::{AtomicUsize, Ordering};

/// Flag names known to [`standard_registry`].
pub const STANDARD_FLAGS: &[&str] = &[
    "block-break",
    "block-place",
    "build",
    "break",
    "entity-damage",
    "interact-block-secondary",
    "interact-item-primary",
    "item-drop",
];

/// Registry populated with [`STANDARD_FLAGS`].
pub fn standard_registry() -> InMemoryFlagRegistry {
    STANDARD_FLAGS.iter().copied().map(Flag::new).collect()
}

// ============================================================================
// MOCK REGISTRIES
// ============================================================================

/// Registry wrapper that counts lookups.
#[derive(Debug, Default)]
pub struct MockFlagRegistry {
    inner: InMemoryFlagRegistry,
    lookups: AtomicUsize,
    misses: AtomicUsize,
}

impl MockFlagRegistry {
    pub fn new(flags: &[&str]) -> Self {
        Self {
            inner: flags.iter().copied().map(Flag::new).collect(),
            lookups: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_FLAGS)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}

impl FlagRegistry for MockFlagRegistry {
    fn lookup_by_name(&self, name: &str) -> Option<FlagReference> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let found = self.inner.lookup_by_name(name);
        if found.is_none() {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }
}

/// Registry that knows no flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFlagRegistry;

impl FlagRegistry for EmptyFlagRegistry {
    fn lookup_by_name(&self, _name: &str) -> Option<FlagReference> {
        None
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating definition types.
    //!
    //! Generated values are canonical: they survive serialize-then-deserialize
    //! unchanged (lower-case definition contexts, namespaced sources/targets,
    //! description text free of the `&` marker).

    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    /// Generate a ClaimType variant.
    pub fn arb_claim_type() -> impl Strategy<Value = ClaimType> {
        prop::sample::select(ClaimType::ALL.to_vec())
    }

    /// Generate a lower-case identifier usable as a clause value.
    pub fn arb_identifier() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,11}"
    }

    /// Generate a namespaced id, a tag, or a `minecraft:` id.
    pub fn arb_namespaced_value() -> impl Strategy<Value = String> {
        prop_oneof![
            arb_identifier().prop_map(|id| format!("minecraft:{}", id)),
            (arb_identifier(), arb_identifier()).prop_map(|(ns, id)| format!("{}:{}", ns, id)),
            arb_identifier().prop_map(|id| format!("#{}", id)),
        ]
    }

    /// Generate a context valid in a permission entry.
    pub fn arb_permission_context() -> impl Strategy<Value = Context> {
        prop_oneof![
            arb_namespaced_value().prop_map(|v| Context::new(keys::SOURCE, v)),
            arb_namespaced_value().prop_map(|v| Context::new(keys::TARGET, v)),
            arb_identifier().prop_map(|v| Context::new(keys::USED_ITEM, v)),
            "[A-Za-z][A-Za-z0-9_]{0,11}".prop_map(|v| Context::new(keys::ITEM_NAME, v)),
            prop::sample::select(vec!["on", "off", "open"]).prop_map(|v| Context::new(keys::STATE, v)),
        ]
    }

    /// Generate a lower-case hyphenated UUID string.
    pub fn arb_uuid_string() -> impl Strategy<Value = String> {
        any::<[u8; 16]>().prop_map(|bytes| Uuid::from_bytes(bytes).to_string())
    }

    /// Generate a context valid in a definition's `contexts` list.
    pub fn arb_definition_context() -> impl Strategy<Value = Context> {
        prop_oneof![
            arb_claim_type().prop_map(|t| Context::new(keys::CLAIM_DEFAULT, t.as_str())),
            arb_claim_type().prop_map(|t| Context::new(keys::CLAIM_OVERRIDE, t.as_str())),
            arb_uuid_string().prop_map(|u| Context::new(keys::CLAIM_OVERRIDE, u)),
            (prop::sample::select(vec!["server", "world", "region"]), arb_identifier())
                .prop_map(|(k, v)| Context::new(k, v)),
        ]
    }

    /// Generate a style.
    pub fn arb_style() -> impl Strategy<Value = Style> {
        (
            prop::option::of(0u32..16),
            any::<u8>().prop_map(Decorations::from_bits_truncate),
        )
            .prop_map(|(color, decorations)| Style {
                color: color
                    .and_then(|c| std::char::from_digit(c, 16))
                    .and_then(NamedColor::from_code),
                decorations,
            })
    }

    /// Generate rich text whose spans contain no `&`.
    pub fn arb_rich_text() -> impl Strategy<Value = RichText> {
        prop::collection::vec((arb_style(), "[A-Za-z0-9 .!]{1,8}"), 0..5).prop_map(|spans| {
            let mut text = RichText::empty();
            for (style, content) in spans {
                text.push(content, style);
            }
            text
        })
    }

    /// Generate one of the standard flag names.
    pub fn arb_flag_name() -> impl Strategy<Value = &'static str> {
        prop::sample::select(STANDARD_FLAGS.to_vec())
    }

    /// Generate a permission entry linked to a standard flag.
    pub fn arb_permission_entry() -> impl Strategy<Value = PermissionEntry> {
        (
            arb_flag_name(),
            prop::collection::btree_set(arb_permission_context(), 0..4),
        )
            .prop_filter_map("flag must be registered", |(name, contexts)| {
                standard_registry()
                    .lookup_by_name(name)
                    .map(|flag| PermissionEntry::new(flag, contexts))
            })
    }

    /// Generate a complete, canonical flag definition.
    pub fn arb_flag_definition() -> impl Strategy<Value = FlagDefinition> {
        (
            "[a-z][a-z0-9-]{0,15}",
            any::<bool>(),
            arb_rich_text(),
            prop::collection::vec(arb_permission_entry(), 1..4),
            prop::collection::btree_set(arb_definition_context(), 0..3),
        )
            .prop_filter_map(
                "definition needs permissions",
                |(name, enabled, description, entries, contexts)| {
                    let mut definition = FlagDefinition::new(entries, name, description).ok()?;
                    definition.set_enabled(enabled);
                    definition.set_definition_contexts(contexts);
                    Some(definition)
                },
            )
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built YAML fixtures for common testing scenarios.

    /// A single definition exercising every field.
    pub const FULL_DEFINITION: &str = r#"
enabled: true
description: "&8[&bGD&8] &7Zombies cannot break doors"
contexts:
  - default=basic
  - override=town
permissions:
  - flag=block-break, source=zombie, target=wooden_door
  - flag=interact-block-secondary, source=player, target=lever, state=on
"#;

    /// Two permission entries, no optional fields.
    pub const TWO_ENTRIES: &str = r#"
enabled: true
permissions:
  - flag=build, source=zombie
  - flag=break, state=on
"#;

    /// A definitions file with one invalid definition in the middle.
    pub const MIXED_FILE: &str = r#"
definitions:
  no-mob-griefing:
    enabled: true
    description: "&cMobs cannot grief"
    permissions:
      - flag=block-break, source=#minecraft:monsters
      - flag=block-place, source=enderman
  typo:
    enabled: true
    permissions:
      - flag=block-brake
  admin-items:
    enabled: false
    contexts:
      - override=admin
    permissions:
      - flag=item-drop, used_item=diamond_sword, item_name=Excalibur
"#;
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertion functions for definition validation.

    use super::*;

    /// Assert that a result failed with `expected` once definition wrapping
    /// is removed.
    #[track_caller]
    pub fn assert_root_error<T: std::fmt::Debug>(result: &DefinitionResult<T>, expected: &DefinitionError) {
        match result {
            Err(err) => assert_eq!(err.root(), expected, "full error: {}", err),
            Ok(value) => panic!("Expected Err({:?}), got Ok({:?})", expected, value),
        }
    }

    /// Assert that two definitions agree on everything that survives a
    /// round-trip: name, enabled switch, description, definition contexts and
    /// the (flag, contexts) pairs of their permission entries.
    #[track_caller]
    pub fn assert_equivalent(actual: &FlagDefinition, expected: &FlagDefinition) {
        assert_eq!(actual.display_name(), expected.display_name());
        assert_eq!(actual.is_enabled(), expected.is_enabled(), "enabled");
        assert_eq!(actual.description(), expected.description(), "description");
        assert_eq!(
            actual.definition_contexts(),
            expected.definition_contexts(),
            "definition contexts"
        );
        let pairs = |d: &FlagDefinition| {
            d.permissions()
                .iter()
                .map(|e| (e.flag().name().to_lowercase(), e.contexts().clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(pairs(actual), pairs(expected), "permission entries");
    }
}

// ============================================================================
// TESTS
// ============================================================================
