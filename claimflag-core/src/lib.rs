//! CLAIMFLAG Core - Definition Types
//!
//! Data structures shared by the definition parser and its callers:
//! contexts, flags and the registry seam, permission entries, flag
//! definitions, rich text, options and the error taxonomy.
//! This crate contains no parsing logic.

mod config;
mod context;
mod definition;
mod error;
mod flag;
pub mod text;

pub use config::*;
pub use context::*;
pub use definition::*;
pub use error::*;
pub use flag::*;
pub use text::{legacy, Decorations, NamedColor, RichText, Style, TextSpan, LEGACY_MARKER};
