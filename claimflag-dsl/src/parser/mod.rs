//! Parser module for permission clauses

pub mod ast;
pub mod parser;

pub use ast::*;
pub use parser::*;
