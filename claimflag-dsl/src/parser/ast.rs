//! Parsed clause types

use crate::lexer::Span;
use claimflag_core::{Context, FlagReference};

/// A syntactically valid `key=value` clause, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawClause {
    pub key: String,
    pub value: String,
    pub span: Span,
}

impl RawClause {
    /// The clause as it would be written, without whitespace.
    pub fn text(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

/// A validated clause of a permission entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionClause {
    /// `flag=<name>`, resolved against the registry.
    Flag(FlagReference),
    /// Any other clause.
    Context(Context),
}
