#![no_main]

use kwic::index::RotationSet;
use kwic::query::{parse_query, Searcher};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing and running arbitrary queries must never panic
    if let Ok(query) = parse_query(data) {
        let set = RotationSet::new("It is my shift now http://example.com");
        let _ = Searcher::new(&set).run(&query, true);
    }
});
