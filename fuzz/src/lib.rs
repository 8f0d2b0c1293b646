use gettext_po::catalog::{Catalog, Location, Message};

/// Generate a random Catalog for fuzzing.
pub fn create_catalog(translations: Vec<(&str, &str)>) -> Catalog {
    let mut catalog = Catalog::new();
    for (idx, (msgid, msgstr)) in translations.iter().enumerate() {
        let mut message = Message::new(*msgid);
        message.strings = vec![String::from(*msgstr)];
        message.locations.push(Location::new("foo.rs", Some(idx + 1)));
        catalog.add(message);
    }
    catalog
}
