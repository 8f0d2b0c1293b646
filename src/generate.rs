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

//! Generation of PO files from a [`Catalog`].

use crate::catalog::{Catalog, Message};
use crate::normalize;
use std::collections::VecDeque;
use std::io::{self, Write};
use textwrap::Options;

/// Criteria for ordering messages in the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortBy {
    /// By original string.
    Message,
    /// By the list of source locations.
    Location,
}

/// Options controlling [`generate_po`] and [`write_po`].
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Maximum line width; 0 disables wrapping of message strings.
    /// Comments are always wrapped (at 76 columns when wrapping is
    /// otherwise disabled), like xgettext does.
    pub width: usize,
    /// Do not emit `#:` location comments.
    pub no_location: bool,
    /// Do not emit the `msgid ""` header entry.
    pub omit_header: bool,
    /// Emit messages in the given order instead of catalog order.
    pub sort_by: Option<SortBy>,
    /// Do not emit obsolete (`#~`) messages.
    pub ignore_obsolete: bool,
    /// Emit `#|` comments carrying the previous original string.
    pub include_previous: bool,
    /// Include line numbers in location comments.
    pub include_lineno: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            width: 76,
            no_location: false,
            omit_header: false,
            sort_by: None,
            ignore_obsolete: false,
            include_previous: false,
            include_lineno: true,
        }
    }
}

/// Lazy stream of PO file text fragments, produced by [`generate_po`].
/// Each item ends with a newline; concatenating them gives the file.
pub struct PoLines<'a> {
    catalog: &'a Catalog,
    options: GenerateOptions,
    live: std::vec::IntoIter<&'a Message>,
    obsolete: std::vec::IntoIter<&'a Message>,
    buffer: VecDeque<String>,
}

impl Iterator for PoLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(line) = self.buffer.pop_front() {
                return Some(line);
            }
            if let Some(message) = self.live.next() {
                self.emit_message(message);
            } else if let Some(message) = self.obsolete.next() {
                self.emit_obsolete(message);
            } else {
                return None;
            }
        }
    }
}

impl PoLines<'_> {
    fn emit_message(&mut self, message: &Message) {
        if message.is_header() {
            if self.options.omit_header {
                return;
            }
            self.emit_header_comment();
        }

        for comment in &message.user_comments {
            self.emit_comment(comment, "");
        }
        for comment in &message.auto_comments {
            self.emit_comment(comment, ".");
        }

        if !self.options.no_location {
            self.emit_locations(message);
        }

        if !message.flags.is_empty() {
            let mut line = String::from("#");
            for flag in &message.flags {
                line.push_str(", ");
                line.push_str(flag);
            }
            line.push('\n');
            self.buffer.push_back(line);
        }

        if self.options.include_previous {
            if let Some(previous) = &message.previous_id {
                let width = self.options.width;
                self.emit_comment(
                    &format!("msgid {}", normalize(previous.singular(), "", width)),
                    "|",
                );
                if let Some(plural) = previous.plural() {
                    self.emit_comment(&format!("msgid_plural {}", normalize(plural, "", width)), "|");
                }
            }
        }

        self.emit_body(message, "");
        self.buffer.push_back(String::from("\n"));
    }

    fn emit_obsolete(&mut self, message: &Message) {
        for comment in &message.user_comments {
            self.emit_comment(comment, "");
        }
        self.emit_body(message, "#~ ");
        self.buffer.push_back(String::from("\n"));
    }

    /// The comment block above the header, rewrapped per logical line
    /// with continuation lines indented by `# `.
    fn emit_header_comment(&mut self) {
        let header = &self.catalog.header_comment;
        if self.options.width > 0 {
            let wrap_options = Options::new(self.options.width)
                .subsequent_indent("# ")
                .break_words(false);
            let mut lines = Vec::new();
            for line in header.split('\n') {
                lines.extend(textwrap::wrap(line, &wrap_options).into_iter().map(String::from));
            }
            self.buffer.push_back(format!("{}\n", lines.join("\n")));
        } else {
            self.buffer.push_back(format!("{header}\n"));
        }
    }

    /// Wrap `comment` and emit it as `#{prefix} ...` lines; embedded
    /// whitespace collapses to single spaces. Nothing is emitted for
    /// an empty comment.
    fn emit_comment(&mut self, comment: &str, prefix: &str) {
        let text = comment.split_whitespace().collect::<Vec<_>>().join(" ");
        self.emit_wrapped(&text, prefix);
    }

    /// Wrap `text` without touching its whitespace and emit it as
    /// `#{prefix} ...` lines. Comments wrap even when message wrapping
    /// is disabled (at 76 columns), like xgettext. Nothing is emitted
    /// for empty text.
    fn emit_wrapped(&mut self, text: &str, prefix: &str) {
        if text.is_empty() {
            return;
        }
        let width = if self.options.width > 0 {
            self.options.width
        } else {
            76
        };
        let wrap_options = Options::new(width).break_words(false);
        for line in textwrap::wrap(text, &wrap_options) {
            self.buffer.push_back(format!("#{prefix} {}\n", line.trim()));
        }
    }

    fn emit_locations(&mut self, message: &Message) {
        let mut locations = message.locations.clone();
        // Entries without a line number (or with line 0) sort first
        // within their file.
        locations.sort_by_key(|location| {
            let line = match location.line {
                Some(line) if line > 0 => line as i64,
                _ => -1,
            };
            (location.file.clone(), line)
        });

        let mut tokens: Vec<String> = Vec::new();
        for location in &locations {
            let filename = location.file.replace(std::path::MAIN_SEPARATOR, "/");
            let mut token = enclose_filename_if_necessary(&filename);
            if let Some(line) = location.line {
                if line > 0 && self.options.include_lineno {
                    token.push(':');
                    token.push_str(&line.to_string());
                }
            }
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        // Isolate-quoted filenames can contain whitespace runs, so the
        // tokens must not go through the comment whitespace collapse.
        self.emit_wrapped(&tokens.join(" "), ":");
    }

    fn emit_body(&mut self, message: &Message, prefix: &str) {
        let width = self.options.width;
        if let Some(context) = &message.context {
            if !context.is_empty() {
                self.buffer.push_back(format!(
                    "{prefix}msgctxt {}\n",
                    normalize(context, prefix, width),
                ));
            }
        }
        self.buffer.push_back(format!(
            "{prefix}msgid {}\n",
            normalize(message.id.singular(), prefix, width),
        ));
        match message.id.plural() {
            Some(plural) => {
                self.buffer.push_back(format!(
                    "{prefix}msgid_plural {}\n",
                    normalize(plural, prefix, width),
                ));
                for idx in 0..self.catalog.num_plurals {
                    let string = message.strings.get(idx).map(String::as_str).unwrap_or("");
                    self.buffer.push_back(format!(
                        "{prefix}msgstr[{idx}] {}\n",
                        normalize(string, prefix, width),
                    ));
                }
            }
            None => {
                self.buffer.push_back(format!(
                    "{prefix}msgstr {}\n",
                    normalize(message.string(), prefix, width),
                ));
            }
        }
    }
}

/// Enclose a filename containing spaces or tabs in First Strong
/// Isolate / Pop Directional Isolate markers, like gettext does.
fn enclose_filename_if_necessary(filename: &str) -> String {
    if !filename.contains(' ') && !filename.contains('\t') {
        return filename.to_string();
    }
    let mut enclosed = String::new();
    if !filename.starts_with('\u{2068}') {
        enclosed.push('\u{2068}');
    }
    enclosed.push_str(filename);
    if !filename.ends_with('\u{2069}') {
        enclosed.push('\u{2069}');
    }
    enclosed
}

fn sort_messages<'a>(messages: Vec<&'a Message>, sort_by: Option<SortBy>) -> Vec<&'a Message> {
    let mut messages = messages;
    match sort_by {
        Some(SortBy::Message) => {
            messages.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.context.cmp(&b.context)));
        }
        Some(SortBy::Location) => messages.sort_by(|a, b| a.locations.cmp(&b.locations)),
        None => {}
    }
    messages
}

/// Lazily produce the PO file serialization of `catalog`. The catalog
/// is borrowed for the lifetime of the returned iterator.
///
/// See [`write_po`] for writing the result to a file.
pub fn generate_po<'a>(catalog: &'a Catalog, options: &GenerateOptions) -> PoLines<'a> {
    let live = sort_messages(catalog.messages().collect(), options.sort_by);
    let obsolete = if options.ignore_obsolete {
        Vec::new()
    } else {
        sort_messages(catalog.obsolete_messages().collect(), options.sort_by)
    };
    PoLines {
        catalog,
        options: options.clone(),
        live: live.into_iter(),
        obsolete: obsolete.into_iter(),
        buffer: VecDeque::new(),
    }
}

/// Write the PO file serialization of `catalog` to `writer` as UTF-8.
///
/// ```
/// use gettext_po::catalog::{Catalog, Location, Message};
/// use gettext_po::{write_po, GenerateOptions};
///
/// let mut catalog = Catalog::new();
/// let mut message = Message::new("foo");
/// message.locations.push(Location::new("main.rs", Some(1)));
/// catalog.add(message);
///
/// let mut buf = Vec::new();
/// let options = GenerateOptions { omit_header: true, ..GenerateOptions::default() };
/// write_po(&mut buf, &catalog, &options).unwrap();
/// assert_eq!(
///     String::from_utf8(buf).unwrap(),
///     "#: main.rs:1\nmsgid \"foo\"\nmsgstr \"\"\n\n",
/// );
/// ```
pub fn write_po<W: Write>(
    mut writer: W,
    catalog: &Catalog,
    options: &GenerateOptions,
) -> io::Result<()> {
    for line in generate_po(catalog, options) {
        writer.write_all(line.as_bytes())?;
    }
    Ok(())
}
