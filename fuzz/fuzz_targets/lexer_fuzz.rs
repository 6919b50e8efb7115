//! Fuzz test for the permission clause lexer
//!
//! Looks for panics, infinite loops and span arithmetic errors on arbitrary
//! UTF-8 input.
//!
//! Run with: cargo +nightly fuzz run lexer_fuzz -- -max_total_time=60

#![no_main]

use claimflag_dsl::{Lexer, TokenKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let tokens = Lexer::new(input).tokenize();

        assert_eq!(
            tokens.last().map(|t| &t.kind),
            Some(&TokenKind::Eof),
            "Last token should always be Eof"
        );

        for token in &tokens {
            assert!(token.span.start <= token.span.end, "Span start should be <= end");
            assert!(token.span.end <= input.len(), "Span should stay inside the input");
            assert!(token.span.column >= 1, "Column numbers should be >= 1");
            if let TokenKind::Word(word) = &token.kind {
                assert!(!word.is_empty(), "Words are never empty");
            }
        }
    }
});
