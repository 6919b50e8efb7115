//! Lexer module for permission clauses

pub mod token;
pub mod scanner;

pub use token::*;
pub use scanner::*;
