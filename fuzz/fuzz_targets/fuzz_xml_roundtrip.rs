#![no_main]

use libfuzzer_sys::fuzz_target;
use mydata_fixtures::xml::Document;

fuzz_target!(|data: &[u8]| {
    // Parse → serialize → parse must not panic at any step.
    if let Ok(doc) = Document::from_bytes(data) {
        if let Ok(bytes) = doc.to_bytes() {
            let _ = Document::from_bytes(&bytes);
        }
    }
});
