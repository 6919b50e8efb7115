//! Flags and the registry that owns them

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A named permission rule known to a registry (e.g. `block-break`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flag {
    name: String,
    permission: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Flag {
    /// Create a flag whose permission node is derived from its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let permission = format!("griefdefender.flag.{}", name.to_lowercase());
        Self {
            name,
            permission,
            description: None,
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = permission.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permission(&self) -> &str {
        &self.permission
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Shared handle to a registry-owned [`Flag`].
///
/// Definitions hold these to record which flag they link to; the registry
/// keeps ownership of the flag itself. Equality is by flag name
/// (case-insensitive), matching registry lookup.
///
/// References are only handed out by [`InMemoryFlagRegistry`]; other
/// [`FlagRegistry`] implementations delegate to one.
///
/// ```compile_fail
/// use claimflag_core::{Flag, FlagReference};
/// use std::sync::Arc;
///
/// let forged = FlagReference::from_registry(Arc::new(Flag::new("build")));
/// ```
#[derive(Debug, Clone)]
pub struct FlagReference(Arc<Flag>);

impl FlagReference {
    pub(crate) fn from_registry(flag: Arc<Flag>) -> Self {
        Self(flag)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn flag(&self) -> &Flag {
        &self.0
    }
}

impl PartialEq for FlagReference {
    fn eq(&self, other: &Self) -> bool {
        self.name().eq_ignore_ascii_case(other.name())
    }
}

impl Eq for FlagReference {}

impl fmt::Display for FlagReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Read-only lookup of flags by name.
///
/// Implementations must tolerate concurrent lookups; parsing only ever reads.
pub trait FlagRegistry: Send + Sync {
    fn lookup_by_name(&self, name: &str) -> Option<FlagReference>;
}

impl<R: FlagRegistry + ?Sized> FlagRegistry for Arc<R> {
    fn lookup_by_name(&self, name: &str) -> Option<FlagReference> {
        (**self).lookup_by_name(name)
    }
}

impl<R: FlagRegistry + ?Sized> FlagRegistry for &R {
    fn lookup_by_name(&self, name: &str) -> Option<FlagReference> {
        (**self).lookup_by_name(name)
    }
}

/// Registry backed by a name-indexed map. The only source of
/// [`FlagReference`] values.
///
/// Names are matched case-insensitively, and a `namespace:` prefix on the
/// requested name is ignored (`griefdefender:block-break` finds `block-break`).
#[derive(Debug, Clone, Default)]
pub struct InMemoryFlagRegistry {
    flags: HashMap<String, Arc<Flag>>,
}

impl InMemoryFlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flag, replacing any flag with the same name.
    pub fn register(&mut self, flag: Flag) -> FlagReference {
        let flag = Arc::new(flag);
        self.flags.insert(flag.name().to_lowercase(), Arc::clone(&flag));
        FlagReference::from_registry(flag)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Registered flag names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.flags.values().map(|f| f.name()).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<Flag> for InMemoryFlagRegistry {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut registry = Self::new();
        for flag in iter {
            registry.register(flag);
        }
        registry
    }
}

impl FlagRegistry for InMemoryFlagRegistry {
    fn lookup_by_name(&self, name: &str) -> Option<FlagReference> {
        let bare = name.rsplit_once(':').map_or(name, |(_, rest)| rest);
        self.flags
            .get(&bare.to_lowercase())
            .map(|flag| FlagReference::from_registry(Arc::clone(flag)))
    }
}
