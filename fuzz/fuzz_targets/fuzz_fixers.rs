#![no_main]

use libfuzzer_sys::fuzz_target;
use mydata_fixtures::fix::{AfmNormalizer, Fixer, SummaryFiller};
use mydata_fixtures::xml::Document;

fuzz_target!(|data: &[u8]| {
    // Both fixers are idempotent on any parseable input.
    if let Ok(mut doc) = Document::from_bytes(data) {
        AfmNormalizer.fix(&mut doc);
        SummaryFiller.fix(&mut doc);
        assert!(AfmNormalizer.fix(&mut doc).is_empty());
        assert!(SummaryFiller.fix(&mut doc).is_empty());
    }
});
