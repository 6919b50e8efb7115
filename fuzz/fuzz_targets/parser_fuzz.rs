//! Fuzz test for the permission-entry and definition-context parsers
//!
//! Both dialects must return `Ok` or `Err` for any input, and anything the
//! permission-entry parser accepts must re-parse to the same entry once
//! rendered.
//!
//! Run with: cargo +nightly fuzz run parser_fuzz -- -max_total_time=60

#![no_main]

use claimflag_core::{DefinitionOptions, Flag, InMemoryFlagRegistry};
use claimflag_dsl::{parse_definition_context, render_permission_entry, ClauseParser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let registry: InMemoryFlagRegistry = ["build", "break", "block-break"]
            .into_iter()
            .map(Flag::new)
            .collect();
        let options = DefinitionOptions::default();
        let parser = ClauseParser::new(&registry, &options);

        if let Ok(entry) = parser.parse_permission_entry(input) {
            let rendered = render_permission_entry(&entry);
            let reparsed = parser.parse_permission_entry(&rendered);
            assert_eq!(reparsed.as_ref(), Ok(&entry), "rendered entry should re-parse: {}", rendered);
        }

        let _ = parse_definition_context("fuzz", input);
    }
});
