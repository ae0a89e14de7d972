//! Fuzz target for parsing and dependency analysis.
//!
//! This fuzzer tests that:
//! 1. The delimited parser never panics on malformed input
//! 2. Any batch it accepts can be analyzed without panicking
//! 3. Equivalences stay canonical

#![no_main]

use fieldorder::{DependencyAnalyzer, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 20_000 {
        return;
    }

    let parser = Parser::new();
    for delimiter in [b',', b'\t'] {
        if let Ok(batch) = parser.parse_bytes(data, delimiter) {
            let report = DependencyAnalyzer::new()
                .analyze(&batch)
                .expect("parsed batches are uniform");
            for pair in &report.equivalences {
                assert!(pair.first() < pair.second());
            }
        }
    }
});
