//! CLAIMFLAG DSL - Flag Definition Language
//!
//! Parser and serializer for the compact clause language used to define
//! custom permission flags in YAML configuration.
//!
//! Architecture:
//! ```text
//! YAML document
//!     ↓
//! ConfigNode (per display name)
//!     ↓
//! Definition builder ── permissions ──→ Lexer → Parser → ClauseParser ──→ FlagRegistry
//!     │             └── contexts ────→ parse_definition_context
//!     ↓
//! FlagDefinition
//!     ↓
//! serialize_definition (for round-trip and programmatic edits)
//! ```

pub mod config;
pub mod lexer;
pub mod parser;

// Re-export key types for convenience
pub use config::*;
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::*;
