//! Contexts: key/value constraints that narrow when a flag applies

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CONTEXT KEYS
// ============================================================================

/// Well-known context keys.
pub mod keys {
    pub const SOURCE: &str = "source";
    pub const TARGET: &str = "target";
    pub const USED_ITEM: &str = "used_item";
    pub const ITEM_NAME: &str = "item_name";
    pub const STATE: &str = "state";
    pub const CLAIM_DEFAULT: &str = "gd_claim_default";
    pub const CLAIM_OVERRIDE: &str = "gd_claim_override";

    /// Short alias accepted for [`CLAIM_DEFAULT`] in definition contexts.
    pub const DEFAULT_ALIAS: &str = "default";
    /// Short alias accepted for [`CLAIM_OVERRIDE`] in definition contexts.
    pub const OVERRIDE_ALIAS: &str = "override";
    /// Key that links a permission entry to a registry flag.
    pub const FLAG: &str = "flag";
}

/// Namespace prepended to bare `source`/`target` identifiers.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Prepend `namespace:` to `value` unless it already carries a namespace
/// separator (`:`) or is a tag (`#`).
///
/// Idempotent: normalizing an already-normalized value returns it unchanged.
pub fn normalize_namespace(value: &str, namespace: &str) -> String {
    if value.contains(':') || value.contains('#') {
        value.to_string()
    } else {
        format!("{}:{}", namespace, value)
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

/// A single key/value constraint.
///
/// Identity is the `(key, value)` pair; a [`ContextSet`] may hold several
/// contexts with the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Context {
    key: String,
    value: String,
}

impl Context {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Ordered, deduplicated set of contexts.
pub type ContextSet = BTreeSet<Context>;

// ============================================================================
// CLAIM TYPES
// ============================================================================

/// Claim types accepted by `gd_claim_default` / `gd_claim_override`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    Global,
    Basic,
    Admin,
    Subdivision,
    Town,
}

impl ClaimType {
    pub const ALL: [ClaimType; 5] = [
        ClaimType::Global,
        ClaimType::Basic,
        ClaimType::Admin,
        ClaimType::Subdivision,
        ClaimType::Town,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Global => "global",
            ClaimType::Basic => "basic",
            ClaimType::Admin => "admin",
            ClaimType::Subdivision => "subdivision",
            ClaimType::Town => "town",
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known claim type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownClaimType(pub String);

impl fmt::Display for UnknownClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown claim type '{}'", self.0)
    }
}

impl std::error::Error for UnknownClaimType {}

impl FromStr for ClaimType {
    type Err = UnknownClaimType;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownClaimType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_identifier() {
        assert_eq!(normalize_namespace("zombie", DEFAULT_NAMESPACE), "minecraft:zombie");
    }

    #[test]
    fn test_normalize_leaves_namespaced_and_tags() {
        assert_eq!(normalize_namespace("modid:zombie", DEFAULT_NAMESPACE), "modid:zombie");
        assert_eq!(normalize_namespace("#undead", DEFAULT_NAMESPACE), "#undead");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_namespace("creeper", DEFAULT_NAMESPACE);
        let twice = normalize_namespace(&once, DEFAULT_NAMESPACE);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_claim_type_case_insensitive() {
        assert_eq!("admin".parse::<ClaimType>(), Ok(ClaimType::Admin));
        assert_eq!("Admin".parse::<ClaimType>(), Ok(ClaimType::Admin));
        assert_eq!("SUBDIVISION".parse::<ClaimType>(), Ok(ClaimType::Subdivision));
        assert!("wilderness".parse::<ClaimType>().is_err());
    }

    #[test]
    fn test_context_set_allows_shared_keys() {
        let mut set = ContextSet::new();
        set.insert(Context::new(keys::SOURCE, "minecraft:zombie"));
        set.insert(Context::new(keys::SOURCE, "minecraft:skeleton"));
        set.insert(Context::new(keys::SOURCE, "minecraft:zombie"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_context_display() {
        assert_eq!(Context::new("state", "on").to_string(), "state=on");
    }
}
