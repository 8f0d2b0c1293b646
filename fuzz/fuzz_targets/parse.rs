#![no_main]

use gettext_po::{read_po, ParseOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must never panic the parser; errors are fine.
    let _ = read_po(data, &ParseOptions::default());
    let strict = ParseOptions {
        abort_invalid: true,
        ..ParseOptions::default()
    };
    let _ = read_po(data, &strict);
});
