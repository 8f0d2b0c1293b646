// Copyright 2024 the gettext-po authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The in-memory representation of a message catalog: [`Message`]
//! values keyed by their original string (and optional context),
//! collected in a [`Catalog`] which preserves insertion order.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// A reference into the source code a message was extracted from.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub file: String,
    /// 1-based line number, if known.
    pub line: Option<usize>,
}

impl Location {
    pub fn new(file: impl Into<String>, line: Option<usize>) -> Self {
        Location {
            file: file.into(),
            line,
        }
    }
}

/// The original string of a message: either a plain singular string or
/// a singular/plural pair for messages with plural forms.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageId {
    Singular(String),
    Plural { singular: String, plural: String },
}

impl MessageId {
    /// The singular form, which identifies the message.
    pub fn singular(&self) -> &str {
        match self {
            MessageId::Singular(s) => s,
            MessageId::Plural { singular, .. } => singular,
        }
    }

    /// The plural form, for plural messages.
    pub fn plural(&self) -> Option<&str> {
        match self {
            MessageId::Singular(_) => None,
            MessageId::Plural { plural, .. } => Some(plural),
        }
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, MessageId::Plural { .. })
    }
}

impl Ord for MessageId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.singular()
            .cmp(other.singular())
            .then_with(|| self.plural().cmp(&other.plural()))
    }
}

impl PartialOrd for MessageId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for MessageId {
    fn from(singular: &str) -> Self {
        MessageId::Singular(singular.to_string())
    }
}

/// The key a message is stored under in a catalog: its singular form
/// plus the optional `msgctxt` disambiguation context.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub singular: String,
    pub context: Option<String>,
}

/// Append the elements of `additions` that are not already in `items`,
/// preserving order.
fn extend_distinct<T: PartialEq>(items: &mut Vec<T>, additions: Vec<T>) {
    for addition in additions {
        if !items.contains(&addition) {
            items.push(addition);
        }
    }
}

/// Derive the catalog key for a message id and context.
pub fn message_key(id: &MessageId, context: Option<&str>) -> MessageKey {
    MessageKey {
        singular: id.singular().to_string(),
        context: context.map(String::from),
    }
}

/// A single translatable message together with its translation and the
/// comment metadata a PO file carries for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    /// Translations, one per plural form. Always length 1 for a
    /// singular message.
    pub strings: Vec<String>,
    pub locations: Vec<Location>,
    pub flags: BTreeSet<String>,
    /// Extracted comments (`#.`).
    pub auto_comments: Vec<String>,
    /// Translator comments (`#`).
    pub user_comments: Vec<String>,
    /// `msgctxt` disambiguation context.
    pub context: Option<String>,
    /// Previous original string (`#|`), recorded by merging tools.
    pub previous_id: Option<MessageId>,
    /// 1-based line number of the `msgid` keyword in the source file,
    /// or 0 for messages built in memory.
    pub lineno: usize,
}

impl Message {
    pub fn new(id: impl Into<MessageId>) -> Self {
        let id = id.into();
        let forms = if id.is_plural() { 2 } else { 1 };
        Message {
            id,
            strings: vec![String::new(); forms],
            locations: Vec::new(),
            flags: BTreeSet::new(),
            auto_comments: Vec::new(),
            user_comments: Vec::new(),
            context: None,
            previous_id: None,
            lineno: 0,
        }
    }

    /// The header pseudo-message has an empty singular id and no
    /// context.
    pub fn is_header(&self) -> bool {
        self.id.singular().is_empty() && self.context.is_none()
    }

    /// The singular translation (the only one for singular messages).
    pub fn string(&self) -> &str {
        self.strings.first().map(String::as_str).unwrap_or_default()
    }

    pub fn key(&self) -> MessageKey {
        message_key(&self.id, self.context.as_deref())
    }
}

/// An insertion-ordered collection of messages, plus the obsolete
/// (`#~`) messages kept at the end of a PO file.
#[derive(Clone, Debug)]
pub struct Catalog {
    messages: Vec<Message>,
    index: HashMap<MessageKey, usize>,
    obsolete: Vec<Message>,
    obsolete_index: HashMap<MessageKey, usize>,
    /// Number of plural forms translations have in this catalog.
    pub num_plurals: usize,
    /// Character set declared in the header; only UTF-8 is produced.
    pub charset: String,
    /// The free-form comment block above the header message.
    pub header_comment: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            messages: Vec::new(),
            index: HashMap::new(),
            obsolete: Vec::new(),
            obsolete_index: HashMap::new(),
            num_plurals: 2,
            charset: String::from("UTF-8"),
            header_comment: String::new(),
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Add a message, or merge it into an existing message with the
    /// same key. Merging extends the locations and comments (skipping
    /// entries already present) and unions the flags, keeping the
    /// existing translation.
    ///
    /// Adding the header message moves its translator comments into
    /// [`Catalog::header_comment`] instead, since the comment block
    /// above the header belongs to the file, not the message.
    pub fn add(&mut self, mut message: Message) {
        if message.is_header() {
            if !message.user_comments.is_empty() {
                let mut comment = String::new();
                for line in &message.user_comments {
                    if line.is_empty() {
                        comment.push_str("#\n");
                    } else {
                        comment.push_str("# ");
                        comment.push_str(line);
                        comment.push('\n');
                    }
                }
                // Drop the trailing newline; the generator adds one
                // per line.
                comment.pop();
                self.header_comment = comment;
                message.user_comments.clear();
            }
        }
        let key = message.key();
        match self.index.get(&key) {
            Some(&idx) => {
                let existing = &mut self.messages[idx];
                extend_distinct(&mut existing.locations, message.locations);
                existing.flags.extend(message.flags);
                extend_distinct(&mut existing.auto_comments, message.auto_comments);
                extend_distinct(&mut existing.user_comments, message.user_comments);
                if existing.previous_id.is_none() {
                    existing.previous_id = message.previous_id;
                }
            }
            None => {
                self.index.insert(key, self.messages.len());
                self.messages.push(message);
            }
        }
    }

    pub fn get(&self, key: &MessageKey) -> Option<&Message> {
        self.index.get(key).map(|&idx| &self.messages[idx])
    }

    /// Live messages in insertion order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn add_obsolete(&mut self, message: Message) {
        let key = message.key();
        match self.obsolete_index.get(&key) {
            Some(&idx) => self.obsolete[idx] = message,
            None => {
                self.obsolete_index.insert(key, self.obsolete.len());
                self.obsolete.push(message);
            }
        }
    }

    pub fn obsolete_messages(&self) -> impl Iterator<Item = &Message> {
        self.obsolete.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn message_id_ordering() {
        let a = MessageId::from("apple");
        let b = MessageId::Plural {
            singular: "apple".to_string(),
            plural: "apples".to_string(),
        };
        let c = MessageId::from("banana");
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn new_plural_message_has_two_strings() {
        let message = Message::new(MessageId::Plural {
            singular: "one".to_string(),
            plural: "many".to_string(),
        });
        assert_eq!(message.strings, vec!["", ""]);
    }

    #[test]
    fn key_distinguishes_context() {
        let plain = message_key(&MessageId::from("Open"), None);
        let menu = message_key(&MessageId::from("Open"), Some("menu"));
        assert_ne!(plain, menu);
        assert_eq!(menu.context.as_deref(), Some("menu"));
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut catalog = Catalog::new();
        for id in ["zebra", "apple", "mango"] {
            catalog.add(Message::new(id));
        }
        let ids: Vec<_> = catalog.messages().map(|m| m.id.singular()).collect();
        assert_eq!(ids, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn add_merges_duplicate_keys() {
        let mut catalog = Catalog::new();
        let mut first = Message::new("hello");
        first.strings = vec!["hallo".to_string()];
        first.locations.push(Location::new("a.rs", Some(1)));
        first.flags.insert("fuzzy".to_string());
        catalog.add(first);

        let mut second = Message::new("hello");
        second.locations.push(Location::new("b.rs", Some(2)));
        second.flags.insert("rust-format".to_string());
        catalog.add(second);

        assert_eq!(catalog.len(), 1);
        let merged = catalog
            .get(&message_key(&MessageId::from("hello"), None))
            .unwrap();
        assert_eq!(merged.string(), "hallo");
        assert_eq!(
            merged.locations,
            vec![Location::new("a.rs", Some(1)), Location::new("b.rs", Some(2))],
        );
        assert_eq!(
            merged.flags.iter().collect::<Vec<_>>(),
            ["fuzzy", "rust-format"],
        );
    }

    #[test]
    fn add_merge_skips_duplicate_metadata() {
        let mut catalog = Catalog::new();
        let mut first = Message::new("hello");
        first.locations.push(Location::new("a.rs", Some(1)));
        first.user_comments.push("Translator note".to_string());
        catalog.add(first.clone());
        catalog.add(first);

        let merged = catalog
            .get(&message_key(&MessageId::from("hello"), None))
            .unwrap();
        assert_eq!(merged.locations, vec![Location::new("a.rs", Some(1))]);
        assert_eq!(merged.user_comments, vec!["Translator note"]);
    }

    #[test]
    fn context_separates_entries() {
        let mut catalog = Catalog::new();
        catalog.add(Message::new("Open"));
        let mut menu = Message::new("Open");
        menu.context = Some("menu".to_string());
        catalog.add(menu);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn header_comments_move_to_catalog() {
        let mut catalog = Catalog::new();
        let mut header = Message::new("");
        header.user_comments = vec![
            "Translations template for my-project.".to_string(),
            String::new(),
            "More text.".to_string(),
        ];
        catalog.add(header);
        assert_eq!(
            catalog.header_comment,
            "# Translations template for my-project.\n#\n# More text.",
        );
        let stored = catalog
            .get(&message_key(&MessageId::from(""), None))
            .unwrap();
        assert!(stored.user_comments.is_empty());
    }

    #[test]
    fn obsolete_messages_are_separate() {
        let mut catalog = Catalog::new();
        catalog.add(Message::new("live"));
        catalog.add_obsolete(Message::new("gone"));
        assert_eq!(catalog.len(), 1);
        let obsolete: Vec<_> = catalog
            .obsolete_messages()
            .map(|m| m.id.singular())
            .collect();
        assert_eq!(obsolete, ["gone"]);
    }
}
