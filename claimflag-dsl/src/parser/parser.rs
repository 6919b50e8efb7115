//! Context clause parser
//!
//! Two dialects share the `key=value` clause syntax:
//!
//! - **permission entries** (`flag=block-break, source=zombie`): tokenized by
//!   [`Lexer`], exactly one `flag=` clause, all other keys drawn from a closed
//!   vocabulary.
//! - **definition contexts** (`default=basic`): one clause per string, split on
//!   the first `=`, only the claim default/override keys are validated.

use super::ast::*;
use crate::lexer::*;
use claimflag_core::{
    keys, normalize_namespace, ClaimType, Context, ContextSet, DefinitionError,
    DefinitionOptions, DefinitionResult, FlagReference, FlagRegistry, PermissionEntry,
};
use uuid::Uuid;

// ============================================================================
// CLAUSE SPLITTING
// ============================================================================

/// Splits a permission string into `key=value` clauses.
pub struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str) -> Self {
        let tokens = Lexer::new(source).tokenize();
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Parse `clause (',' clause)*` up to end of input.
    pub fn parse_clauses(&mut self) -> DefinitionResult<Vec<RawClause>> {
        let mut clauses = Vec::new();
        loop {
            clauses.push(self.parse_clause()?);
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(clauses)
    }

    /// Parse a single `word '=' word` clause, stopping at `,` or end of input.
    fn parse_clause(&mut self) -> DefinitionResult<RawClause> {
        let start = self.pos;
        while !self.check(&TokenKind::Comma) && !self.is_at_end() {
            self.advance();
        }
        let group = &self.tokens[start..self.pos];

        match group {
            [Token {
                kind: TokenKind::Word(key),
                span: first,
            }, Token {
                kind: TokenKind::Eq, ..
            }, Token {
                kind: TokenKind::Word(value),
                span: last,
            }] => Ok(RawClause {
                key: key.clone(),
                value: value.clone(),
                span: Span {
                    start: first.start,
                    end: last.end,
                    column: first.column,
                },
            }),
            [] => Err(DefinitionError::EmptyClause {
                entry: strip_whitespace(self.source),
            }),
            _ => Err(DefinitionError::MalformedClause {
                clause: self.group_text(group),
            }),
        }
    }

    fn group_text(&self, group: &[Token]) -> String {
        match (group.first(), group.last()) {
            (Some(first), Some(last)) => strip_whitespace(&self.source[first.span.start..last.span.end]),
            _ => String::new(),
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

// ============================================================================
// PERMISSION-ENTRY DIALECT
// ============================================================================

/// Validates permission-entry clauses against a flag registry.
pub struct ClauseParser<'a> {
    registry: &'a dyn FlagRegistry,
    namespace: &'a str,
}

impl<'a> ClauseParser<'a> {
    pub fn new(registry: &'a dyn FlagRegistry, options: &'a DefinitionOptions) -> Self {
        Self {
            registry,
            namespace: &options.default_namespace,
        }
    }

    /// Parse one `permissions` list string into a [`PermissionEntry`].
    pub fn parse_permission_entry(&self, entry: &str) -> DefinitionResult<PermissionEntry> {
        let clauses = Parser::new(entry).parse_clauses()?;

        let mut flag: Option<FlagReference> = None;
        let mut contexts = ContextSet::new();
        for clause in clauses {
            tracing::trace!(key = %clause.key, value = %clause.value, "permission clause");
            match self.validate_permission_clause(clause)? {
                PermissionClause::Flag(linked) => {
                    if flag.replace(linked).is_some() {
                        return Err(DefinitionError::DuplicateFlagReference {
                            entry: strip_whitespace(entry),
                        });
                    }
                }
                PermissionClause::Context(context) => {
                    contexts.insert(context);
                }
            }
        }

        let flag = flag.ok_or_else(|| DefinitionError::MissingFlagReference {
            entry: strip_whitespace(entry),
        })?;
        Ok(PermissionEntry::new(flag, contexts))
    }

    /// Parse a single permission clause such as `source=zombie`.
    pub fn parse_permission_clause(&self, clause: &str) -> DefinitionResult<PermissionClause> {
        let mut clauses = Parser::new(clause).parse_clauses()?;
        match clauses.len() {
            1 => self.validate_permission_clause(clauses.remove(0)),
            _ => Err(DefinitionError::MalformedClause {
                clause: strip_whitespace(clause),
            }),
        }
    }

    /// Apply the permission-entry vocabulary to a split clause.
    pub fn validate_permission_clause(&self, clause: RawClause) -> DefinitionResult<PermissionClause> {
        let RawClause { key, value, .. } = clause;

        if key.eq_ignore_ascii_case(keys::FLAG) {
            return self
                .registry
                .lookup_by_name(&value)
                .map(PermissionClause::Flag)
                .ok_or(DefinitionError::UnknownFlag { name: value });
        }

        let value = match key.as_str() {
            keys::SOURCE | keys::TARGET => normalize_namespace(&value, self.namespace),
            keys::USED_ITEM
            | keys::ITEM_NAME
            | keys::CLAIM_DEFAULT
            | keys::CLAIM_OVERRIDE
            | keys::STATE => value,
            _ => {
                return Err(DefinitionError::InvalidContextKey {
                    key: key.clone(),
                    value,
                })
            }
        };
        Ok(PermissionClause::Context(Context::new(key, value)))
    }
}

// ============================================================================
// DEFINITION-CONTEXT DIALECT
// ============================================================================

/// Parse one entry of a definition's `contexts` list.
///
/// `default`/`gd_claim_default` and `override`/`gd_claim_override` are mapped
/// to their canonical keys and their values checked; other keys are kept as
/// written.
pub fn parse_definition_context(definition: &str, clause: &str) -> DefinitionResult<Context> {
    let invalid = || DefinitionError::InvalidContext {
        definition: definition.to_string(),
        clause: clause.to_string(),
    };
    let (key, value) = clause.split_once('=').ok_or_else(invalid)?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return Err(invalid());
    }

    if key.eq_ignore_ascii_case(keys::DEFAULT_ALIAS) || key.eq_ignore_ascii_case(keys::CLAIM_DEFAULT) {
        validate_claim_value(key, value, false)?;
        Ok(Context::new(keys::CLAIM_DEFAULT, value))
    } else if key.eq_ignore_ascii_case(keys::OVERRIDE_ALIAS)
        || key.eq_ignore_ascii_case(keys::CLAIM_OVERRIDE)
    {
        validate_claim_value(key, value, true)?;
        Ok(Context::new(keys::CLAIM_OVERRIDE, value))
    } else {
        Ok(Context::new(key, value))
    }
}

/// Claim type, or for overrides also a hyphenated UUID (a specific claim).
fn validate_claim_value(key: &str, value: &str, allow_uuid: bool) -> DefinitionResult<()> {
    if value.parse::<ClaimType>().is_ok() {
        return Ok(());
    }
    if allow_uuid && value.len() == 36 && Uuid::parse_str(value).is_ok() {
        return Ok(());
    }
    Err(DefinitionError::InvalidContextValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

// ============================================================================
// RENDERING
// ============================================================================

/// `key=value` with the key lower-cased. No validation.
pub fn render_context(context: &Context) -> String {
    format!("{}={}", context.key().to_lowercase(), context.value())
}

/// Definition contexts are written fully lower-cased.
pub fn render_definition_context(context: &Context) -> String {
    render_context(context).to_lowercase()
}

/// `flag=<name>` followed by `, key=value` for each context. Context values
/// keep their case.
pub fn render_permission_entry(entry: &PermissionEntry) -> String {
    let mut out = format!("{}={}", keys::FLAG, entry.flag().name().to_lowercase());
    for context in entry.contexts() {
        out.push_str(", ");
        out.push_str(&render_context(context));
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
