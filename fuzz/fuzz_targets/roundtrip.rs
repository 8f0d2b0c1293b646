#![no_main]

use gettext_po::{read_po, write_po, GenerateOptions, ParseOptions};
use gettext_po_fuzz::create_catalog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|translations: Vec<(&str, &str)>| {
    let catalog = create_catalog(translations);

    let mut buf = Vec::new();
    write_po(&mut buf, &catalog, &GenerateOptions::default()).unwrap();
    let reread = read_po(&buf[..], &ParseOptions::default()).unwrap();

    for message in catalog.messages() {
        let found = reread.get(&message.key()).unwrap();
        assert_eq!(found.id, message.id);
        assert_eq!(found.strings, message.strings);
    }
});
