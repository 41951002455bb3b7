//! Fuzz target for the row tokenizer and classifier.
//!
//! This fuzzer tests that tokenizing and classifying:
//! 1. Never panics on malformed input
//! 2. Never produces a data row with fewer than two fields

#![no_main]

use libfuzzer_sys::fuzz_target;
use regstat::input::Tokenizer;
use regstat::schema::ColumnClassifier;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(tokenized) = Tokenizer::new().tokenize(data) {
        assert!(tokenized.table.rows().iter().all(|row| row.len() >= 2));
        let _ = ColumnClassifier::new().classify(tokenized.table.headers());
    }
});
