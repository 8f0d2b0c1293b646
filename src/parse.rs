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

//! Parsing of PO files into a [`Catalog`].
//!
//! The parser is line based: keyword lines (`msgid`, `msgstr`, ...)
//! open a string accumulator, bare `"..."` lines continue whichever
//! accumulator is in focus, and comment lines attach metadata to the
//! message being assembled. Most malformed input only produces a
//! warning on stderr; see [`ParseOptions::abort_invalid`] for the
//! strict mode.

use crate::catalog::{Catalog, Location, Message, MessageId};
use crate::unescape;
use std::io::BufRead;
use thiserror::Error;

/// First Strong Isolate, used by gettext to quote filenames containing
/// spaces or tabs in `#:` comments.
const FSI: char = '\u{2068}';
/// Pop Directional Isolate, the closing counterpart of [`FSI`].
const PDI: char = '\u{2069}';

/// Error raised when an invalid PO file is encountered. Carries the
/// catalog as parsed up to the offending line.
#[derive(Debug, Error)]
#[error("{message} on line {lineno}")]
pub struct PoFileError {
    pub message: String,
    /// The offending line, or empty when the error is not tied to the
    /// content of a line (I/O and decoding errors).
    pub line: String,
    /// 0-based line number.
    pub lineno: usize,
    pub catalog: Catalog,
}

/// An invalid condition before the catalog is attached to it.
struct Invalid {
    message: String,
    line: String,
    lineno: usize,
}

impl Invalid {
    fn into_error(self, catalog: Catalog) -> PoFileError {
        PoFileError {
            message: self.message,
            line: self.line,
            lineno: self.lineno,
            catalog,
        }
    }
}

/// Options controlling [`read_po`] and [`PoFileParser`].
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    /// Drop obsolete (`#~`) messages instead of collecting them.
    pub ignore_obsolete: bool,
    /// Fail on the first invalid line instead of warning on stderr and
    /// continuing.
    pub abort_invalid: bool,
}

/// A string value as it appears in a PO file: one escaped, quoted
/// fragment per physical line.
#[derive(Default)]
struct NormalizedString(Vec<String>);

impl NormalizedString {
    fn from_line(line: &str) -> Self {
        NormalizedString(vec![line.trim().to_string()])
    }

    fn push_line(&mut self, line: &str) {
        self.0.push(line.trim().to_string());
    }

    fn denormalize(&self) -> String {
        self.0.iter().map(|fragment| unescape(fragment)).collect()
    }
}

/// Which accumulator a bare `"..."` continuation line extends.
enum Focus {
    Idle,
    MsgId,
    MsgStr,
    MsgCtxt,
}

/// Streaming parser that assembles [`Message`] values from PO file
/// lines and adds them to a [`Catalog`].
///
/// See [`read_po`] for the simple cases.
pub struct PoFileParser {
    catalog: Catalog,
    ignore_obsolete: bool,
    abort_invalid: bool,
    counter: usize,
    offset: usize,
    messages: Vec<NormalizedString>,
    translations: Vec<(usize, NormalizedString)>,
    locations: Vec<Location>,
    flags: Vec<String>,
    user_comments: Vec<String>,
    auto_comments: Vec<String>,
    context: Option<NormalizedString>,
    previous: Vec<NormalizedString>,
    obsolete: bool,
    focus: Focus,
}

impl PoFileParser {
    pub fn new(catalog: Catalog, options: &ParseOptions) -> Self {
        PoFileParser {
            catalog,
            ignore_obsolete: options.ignore_obsolete,
            abort_invalid: options.abort_invalid,
            counter: 0,
            offset: 0,
            messages: Vec::new(),
            translations: Vec::new(),
            locations: Vec::new(),
            flags: Vec::new(),
            user_comments: Vec::new(),
            auto_comments: Vec::new(),
            context: None,
            previous: Vec::new(),
            obsolete: false,
            focus: Focus::Idle,
        }
    }

    /// Read PO content from `reader` and return the resulting catalog.
    /// The bytes must be UTF-8; decoding failures and I/O errors are
    /// always fatal.
    pub fn parse<R: BufRead>(mut self, reader: R) -> Result<Catalog, PoFileError> {
        match self.parse_bytes(reader) {
            Ok(()) => Ok(self.catalog),
            Err(invalid) => Err(invalid.into_error(self.catalog)),
        }
    }

    /// Like [`PoFileParser::parse`] for already decoded lines (without
    /// line terminators).
    pub fn parse_lines<I, S>(mut self, lines: I) -> Result<Catalog, PoFileError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let run = |parser: &mut Self| -> Result<(), Invalid> {
            for (lineno, line) in lines.into_iter().enumerate() {
                parser.feed(lineno, line.as_ref())?;
            }
            parser.finish()
        };
        match run(&mut self) {
            Ok(()) => Ok(self.catalog),
            Err(invalid) => Err(invalid.into_error(self.catalog)),
        }
    }

    fn parse_bytes<R: BufRead>(&mut self, reader: R) -> Result<(), Invalid> {
        for (lineno, raw) in reader.split(b'\n').enumerate() {
            let raw = raw.map_err(|err| Invalid {
                message: err.to_string(),
                line: String::new(),
                lineno,
            })?;
            let line = String::from_utf8(raw).map_err(|err| Invalid {
                message: format!("invalid UTF-8: {err}"),
                line: String::new(),
                lineno,
            })?;
            self.feed(lineno, &line)?;
        }
        self.finish()
    }

    fn feed(&mut self, lineno: usize, line: &str) -> Result<(), Invalid> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        if let Some(rest) = line.strip_prefix('#') {
            if let Some(rest) = rest.strip_prefix('~') {
                self.process_message_line(lineno, rest.trim_start(), true)
            } else {
                self.process_comment(lineno, line)
            }
        } else {
            self.process_message_line(lineno, line, false)
        }
    }

    fn finish(&mut self) -> Result<(), Invalid> {
        self.finish_current_message()?;

        // No actual messages, but metadata accumulated in comments:
        // attach it to a synthesized empty header message.
        if self.counter == 0
            && (!self.flags.is_empty()
                || !self.user_comments.is_empty()
                || !self.auto_comments.is_empty())
        {
            self.messages.push(NormalizedString::default());
            self.translations.push((0, NormalizedString::default()));
            self.add_message()?;
        }
        Ok(())
    }

    fn process_message_line(
        &mut self,
        lineno: usize,
        line: &str,
        obsolete: bool,
    ) -> Result<(), Invalid> {
        if line.is_empty() {
            Ok(())
        } else if line.starts_with('"') {
            self.process_string_continuation_line(lineno, line)
        } else {
            self.process_keyword_line(lineno, line, obsolete)
        }
    }

    fn process_keyword_line(
        &mut self,
        lineno: usize,
        line: &str,
        obsolete: bool,
    ) -> Result<(), Invalid> {
        let (keyword, arg) = line.split_once(' ').unwrap_or((line, ""));

        if keyword == "msgid" || keyword == "msgctxt" {
            self.finish_current_message()?;
        }

        self.obsolete = obsolete;

        // The line carrying the msgid is recorded as the message's
        // source line.
        if keyword == "msgid" {
            self.offset = lineno;
        }

        match keyword {
            "msgid" | "msgid_plural" => {
                self.focus = Focus::MsgId;
                self.messages.push(NormalizedString::from_line(arg));
                Ok(())
            }
            "msgctxt" => {
                self.focus = Focus::MsgCtxt;
                self.context = Some(NormalizedString::from_line(arg));
                Ok(())
            }
            "msgstr" => {
                self.focus = Focus::MsgStr;
                self.translations.push((0, Self::msgstr_value(arg)));
                Ok(())
            }
            _ => {
                let idx = keyword
                    .strip_prefix("msgstr[")
                    .and_then(|rest| rest.strip_suffix(']'))
                    .and_then(|idx| idx.parse::<usize>().ok());
                match idx {
                    Some(idx) => {
                        self.focus = Focus::MsgStr;
                        self.translations.push((idx, Self::msgstr_value(arg)));
                        Ok(())
                    }
                    None => self.invalid(line, lineno, "Unknown or misformatted keyword"),
                }
            }
        }
    }

    fn msgstr_value(arg: &str) -> NormalizedString {
        if arg == "\"\"" {
            NormalizedString::default()
        } else {
            NormalizedString::from_line(arg)
        }
    }

    fn process_string_continuation_line(
        &mut self,
        lineno: usize,
        line: &str,
    ) -> Result<(), Invalid> {
        let accumulator = match self.focus {
            Focus::MsgId => self.messages.last_mut(),
            Focus::MsgStr => self.translations.last_mut().map(|(_, s)| s),
            Focus::MsgCtxt => self.context.as_mut(),
            Focus::Idle => None,
        };
        match accumulator {
            Some(accumulator) => {
                accumulator.push_line(line);
                Ok(())
            }
            None => self.invalid(
                line,
                lineno,
                "Got line starting with \" but not in msgid, msgstr or msgctxt",
            ),
        }
    }

    fn process_comment(&mut self, lineno: usize, line: &str) -> Result<(), Invalid> {
        self.finish_current_message()?;

        if let Some(payload) = line.strip_prefix("#:") {
            // Isolate-marker imbalance leaves the location list
            // ambiguous, so it is fatal even in lenient mode.
            let locations = extract_locations(payload).map_err(|message| Invalid {
                message,
                line: line.to_string(),
                lineno,
            })?;
            for token in locations {
                self.locations.push(parse_location(&token));
            }
            return Ok(());
        }

        if let Some(payload) = line.strip_prefix("#,") {
            self.flags
                .extend(payload.trim_start().split(',').map(|flag| flag.trim().to_string()));
            return Ok(());
        }

        if let Some(payload) = line.strip_prefix("#.") {
            let comment = payload.trim();
            if !comment.is_empty() {
                self.auto_comments.push(comment.to_string());
            }
            return Ok(());
        }

        if let Some(payload) = line.strip_prefix("#|") {
            self.process_previous_comment(payload.trim_start());
            return Ok(());
        }

        self.user_comments.push(line[1..].trim().to_string());
        Ok(())
    }

    /// `#|` comments record the original string a fuzzy translation was
    /// made for, written by merging tools. Only the msgid forms are
    /// kept; a `#| msgctxt` line is ignored.
    fn process_previous_comment(&mut self, content: &str) {
        if let Some(arg) = content.strip_prefix("msgid_plural ") {
            self.previous.push(NormalizedString::from_line(arg));
        } else if let Some(arg) = content.strip_prefix("msgid ") {
            self.previous.push(NormalizedString::from_line(arg));
        } else if content.starts_with('"') {
            if let Some(last) = self.previous.last_mut() {
                last.push_line(content);
            }
        }
    }

    fn finish_current_message(&mut self) -> Result<(), Invalid> {
        if self.messages.is_empty() {
            return Ok(());
        }
        if self.translations.is_empty() {
            self.invalid(
                "",
                self.offset,
                format!(
                    "missing msgstr for msgid '{}'",
                    self.messages[0].denormalize()
                ),
            )?;
            self.translations.push((0, NormalizedString::default()));
        }
        self.add_message()
    }

    fn add_message(&mut self) -> Result<(), Invalid> {
        let id;
        let strings;
        if self.messages.len() > 1 {
            id = MessageId::Plural {
                singular: self.messages[0].denormalize(),
                plural: self.messages[1].denormalize(),
            };
            let mut forms = vec![String::new(); self.catalog.num_plurals];
            self.translations.sort_by_key(|(idx, _)| *idx);
            for (idx, translation) in &self.translations {
                if *idx >= self.catalog.num_plurals {
                    self.invalid(
                        "",
                        self.offset,
                        "msg has more translations than num_plurals of catalog",
                    )?;
                    continue;
                }
                forms[*idx] = translation.denormalize();
            }
            strings = forms;
        } else {
            id = MessageId::Singular(self.messages[0].denormalize());
            strings = vec![self.translations[0].1.denormalize()];
        }

        let previous_id = match self.previous.len() {
            0 => None,
            1 => Some(MessageId::Singular(self.previous[0].denormalize())),
            _ => Some(MessageId::Plural {
                singular: self.previous[0].denormalize(),
                plural: self.previous[1].denormalize(),
            }),
        };

        let message = Message {
            id,
            strings,
            locations: std::mem::take(&mut self.locations),
            flags: self.flags.drain(..).collect(),
            auto_comments: std::mem::take(&mut self.auto_comments),
            user_comments: std::mem::take(&mut self.user_comments),
            context: self.context.as_ref().map(NormalizedString::denormalize),
            previous_id,
            lineno: self.offset + 1,
        };
        if self.obsolete {
            if !self.ignore_obsolete {
                self.catalog.add_obsolete(message);
            }
        } else {
            self.catalog.add(message);
        }
        self.counter += 1;
        self.reset_message_state();
        Ok(())
    }

    fn reset_message_state(&mut self) {
        self.messages.clear();
        self.translations.clear();
        self.locations.clear();
        self.flags.clear();
        self.user_comments.clear();
        self.auto_comments.clear();
        self.context = None;
        self.previous.clear();
        self.obsolete = false;
        self.focus = Focus::Idle;
    }

    fn invalid(
        &self,
        line: &str,
        lineno: usize,
        message: impl Into<String>,
    ) -> Result<(), Invalid> {
        let message = message.into();
        if self.abort_invalid {
            return Err(Invalid {
                message,
                line: line.to_string(),
                lineno,
            });
        }
        eprintln!("WARNING: {message}");
        eprintln!("WARNING: Problem on line {}: {:?}", lineno + 1, line);
        Ok(())
    }
}

/// Split the payload of a `#:` comment into location tokens, honoring
/// First Strong Isolate / Pop Directional Isolate quoting of filenames
/// with spaces or tabs in their names. Unbalanced markers are an
/// error.
fn extract_locations(payload: &str) -> Result<Vec<String>, String> {
    if !payload.contains(FSI) && !payload.contains(PDI) {
        return Ok(payload.split_whitespace().map(String::from).collect());
    }

    let mut locations = Vec::new();
    let mut location = String::new();
    let mut in_filename = false;
    for c in payload.chars() {
        match c {
            FSI => {
                if in_filename {
                    return Err(String::from(
                        "location comment contains more First Strong Isolate \
                         characters, than Pop Directional Isolate characters",
                    ));
                }
                in_filename = true;
            }
            PDI => {
                if !in_filename {
                    return Err(String::from(
                        "location comment contains more Pop Directional Isolate \
                         characters, than First Strong Isolate characters",
                    ));
                }
                in_filename = false;
            }
            ' ' if !in_filename => {
                if !location.is_empty() {
                    locations.push(std::mem::take(&mut location));
                }
            }
            _ => location.push(c),
        }
    }
    if !location.is_empty() {
        if in_filename {
            return Err(String::from(
                "location comment contains more First Strong Isolate \
                 characters, than Pop Directional Isolate characters",
            ));
        }
        locations.push(location);
    }

    Ok(locations)
}

/// Parse a `filename[:lineno]` token. When the part after the
/// rightmost colon is not a number, the whole token is a filename with
/// no line number (colons are legal in filenames).
fn parse_location(token: &str) -> Location {
    match token.rsplit_once(':') {
        Some((file, lineno)) => match lineno.parse::<usize>() {
            Ok(lineno) => Location::new(file, Some(lineno)),
            Err(_) => Location::new(token, None),
        },
        None => Location::new(token, None),
    }
}

/// Read messages from a PO file and return them as a [`Catalog`].
///
/// ```
/// use gettext_po::{read_po, ParseOptions};
///
/// let buf = br#"
/// #: main.rs:1
/// #, fuzzy
/// msgid "foo"
/// msgstr "bar"
/// "#;
/// let catalog = read_po(&buf[..], &ParseOptions::default()).unwrap();
/// assert_eq!(catalog.len(), 1);
/// ```
pub fn read_po<R: BufRead>(reader: R, options: &ParseOptions) -> Result<Catalog, PoFileError> {
    PoFileParser::new(Catalog::new(), options).parse(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::message_key;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Catalog {
        read_po(input.as_bytes(), &ParseOptions::default()).unwrap()
    }

    #[track_caller]
    fn assert_singular(message: &Message, id: &str, string: &str) {
        assert_eq!(message.id, MessageId::from(id));
        assert_eq!(message.strings, vec![string]);
    }

    #[test]
    fn two_messages_with_metadata() {
        let catalog = parse(
            "\n\
             #: main.py:1\n\
             #, fuzzy, python-format\n\
             msgid \"foo %(name)s\"\n\
             msgstr \"quux %(name)s\"\n\
             \n\
             # A user comment\n\
             #. An auto comment\n\
             #: main.py:3\n\
             msgid \"bar\"\n\
             msgid_plural \"baz\"\n\
             msgstr[0] \"bar\"\n\
             msgstr[1] \"baaz\"\n",
        );
        assert_eq!(catalog.len(), 2);

        let first = catalog
            .get(&message_key(&MessageId::from("foo %(name)s"), None))
            .unwrap();
        assert_singular(first, "foo %(name)s", "quux %(name)s");
        assert_eq!(first.locations, vec![Location::new("main.py", Some(1))]);
        assert_eq!(
            first.flags.iter().collect::<Vec<_>>(),
            ["fuzzy", "python-format"],
        );
        assert_eq!(first.lineno, 4);

        let second = catalog
            .get(&message_key(&MessageId::from("bar"), None))
            .unwrap();
        assert_eq!(
            second.id,
            MessageId::Plural {
                singular: "bar".to_string(),
                plural: "baz".to_string(),
            },
        );
        assert_eq!(second.strings, vec!["bar", "baaz"]);
        assert_eq!(second.locations, vec![Location::new("main.py", Some(3))]);
        assert_eq!(second.user_comments, vec!["A user comment"]);
        assert_eq!(second.auto_comments, vec!["An auto comment"]);
    }

    #[test]
    fn multiline_values_concatenate() {
        let catalog = parse(
            "msgid \"\"\n\
             \"Here's some text that\\n\"\n\
             \"includesareallylongwordthatmightbutshouldnt throw us over the limit\\n\"\n\
             msgstr \"\"\n\
             \"Here's some translated text that\\n\"\n\
             \"includesareallylongwordthatmightbutshouldnt throw us over the limit\\n\"\n",
        );
        let message = catalog.messages().next().unwrap();
        assert_eq!(
            message.id.singular(),
            "Here's some text that\nincludesareallylongwordthatmightbutshouldnt throw us over the limit\n",
        );
        assert_eq!(
            message.string(),
            "Here's some translated text that\nincludesareallylongwordthatmightbutshouldnt throw us over the limit\n",
        );
    }

    #[test]
    fn msgctxt_separates_messages() {
        let catalog = parse(
            "msgctxt \"menu\"\n\
             msgid \"Open\"\n\
             msgstr \"Öffnen\"\n\
             \n\
             msgid \"Open\"\n\
             msgstr \"Offen\"\n",
        );
        assert_eq!(catalog.len(), 2);
        let menu = catalog
            .get(&message_key(&MessageId::from("Open"), Some("menu")))
            .unwrap();
        assert_eq!(menu.string(), "Öffnen");
        assert_eq!(menu.context.as_deref(), Some("menu"));
        let plain = catalog
            .get(&message_key(&MessageId::from("Open"), None))
            .unwrap();
        assert_eq!(plain.string(), "Offen");
    }

    #[test]
    fn obsolete_messages_collected_separately() {
        let catalog = parse(
            "msgid \"foo\"\n\
             msgstr \"Voh\"\n\
             \n\
             # A comment\n\
             #~ msgid \"bar\"\n\
             #~ msgstr \"Bahr\"\n",
        );
        assert_eq!(catalog.len(), 1);
        let obsolete: Vec<_> = catalog.obsolete_messages().collect();
        assert_eq!(obsolete.len(), 1);
        assert_singular(obsolete[0], "bar", "Bahr");
        assert_eq!(obsolete[0].user_comments, vec!["A comment"]);
    }

    #[test]
    fn ignore_obsolete_drops_them() {
        let options = ParseOptions {
            ignore_obsolete: true,
            ..ParseOptions::default()
        };
        let catalog = read_po(
            &b"#~ msgid \"bar\"\n#~ msgstr \"Bahr\"\n"[..],
            &options,
        )
        .unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.obsolete_messages().count(), 0);
    }

    #[test]
    fn missing_msgstr_synthesizes_empty_translation() {
        let catalog = parse("msgid \"foo\"\n");
        assert_singular(catalog.messages().next().unwrap(), "foo", "");
    }

    #[test]
    fn missing_msgstr_aborts_in_strict_mode() {
        let options = ParseOptions {
            abort_invalid: true,
            ..ParseOptions::default()
        };
        let err = read_po(&b"msgid \"foo\"\n"[..], &options).unwrap_err();
        assert_eq!(err.message, "missing msgstr for msgid 'foo'");
    }

    #[test]
    fn stray_continuation_line_skipped_in_lenient_mode() {
        // The comment closes the first message, so the quoted line has
        // no open accumulator and is dropped.
        let catalog = parse(
            "msgid \"foo\"\n\
             msgstr \"bar\"\n\
             # A comment\n\
             \"dangling\"\n\
             msgid \"baz\"\n\
             msgstr \"quux\"\n",
        );
        assert_eq!(catalog.len(), 2);
        assert_singular(catalog.messages().next().unwrap(), "foo", "bar");
    }

    #[test]
    fn stray_continuation_line_aborts_in_strict_mode() {
        let options = ParseOptions {
            abort_invalid: true,
            ..ParseOptions::default()
        };
        let err = read_po(
            &b"msgid \"foo\"\nmsgstr \"bar\"\n# A comment\n\"dangling\"\n"[..],
            &options,
        )
        .unwrap_err();
        assert_eq!(
            err.message,
            "Got line starting with \" but not in msgid, msgstr or msgctxt",
        );
        assert_eq!(err.line, "\"dangling\"");
        assert_eq!(err.lineno, 3);
        assert_eq!(err.catalog.len(), 1);
    }

    #[test]
    fn unknown_keyword_skipped_in_lenient_mode() {
        let catalog = parse(
            "msgid \"foo\"\n\
             msgstr \"bar\"\n\
             msgnonsense \"baz\"\n",
        );
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn isolate_quoted_filename() {
        let catalog = parse(
            "#: \u{2068}broken file.py\u{2069}:1 main.py:2\n\
             msgid \"foo\"\n\
             msgstr \"bar\"\n",
        );
        let message = catalog.messages().next().unwrap();
        assert_eq!(
            message.locations,
            vec![
                Location::new("broken file.py", Some(1)),
                Location::new("main.py", Some(2)),
            ],
        );
    }

    #[test]
    fn isolate_imbalance_is_fatal_even_when_lenient() {
        let err = read_po(
            &"#: \u{2068}broken file.py:1\nmsgid \"foo\"\nmsgstr \"bar\"\n".as_bytes()[..],
            &ParseOptions::default(),
        )
        .unwrap_err();
        assert!(err.message.contains("First Strong Isolate"));
        assert_eq!(err.lineno, 0);
    }

    #[test]
    fn location_with_non_numeric_suffix_is_a_filename() {
        let catalog = parse(
            "#: main.py:double_shot\n\
             msgid \"foo\"\n\
             msgstr \"bar\"\n",
        );
        let message = catalog.messages().next().unwrap();
        assert_eq!(
            message.locations,
            vec![Location::new("main.py:double_shot", None)],
        );
    }

    #[test]
    fn plural_translations_beyond_num_plurals_are_skipped() {
        let catalog = parse(
            "msgid \"one\"\n\
             msgid_plural \"many\"\n\
             msgstr[0] \"eins\"\n\
             msgstr[1] \"viele\"\n\
             msgstr[2] \"zu viele\"\n",
        );
        let message = catalog.messages().next().unwrap();
        assert_eq!(message.strings, vec!["eins", "viele"]);
    }

    #[test]
    fn plural_translations_fill_missing_slots() {
        let catalog = parse(
            "msgid \"one\"\n\
             msgid_plural \"many\"\n\
             msgstr[1] \"viele\"\n",
        );
        let message = catalog.messages().next().unwrap();
        assert_eq!(message.strings, vec!["", "viele"]);
    }

    #[test]
    fn comments_only_become_the_header() {
        let catalog = parse("#, fuzzy\n");
        assert_eq!(catalog.len(), 1);
        let header = catalog.messages().next().unwrap();
        assert!(header.is_header());
        assert_eq!(header.flags.iter().collect::<Vec<_>>(), ["fuzzy"]);
    }

    #[test]
    fn header_comment_block_moves_to_catalog() {
        let catalog = parse(
            "# Translations template for PROJECT.\n\
             # Copyright (C) 2024 ORGANIZATION\n\
             msgid \"\"\n\
             msgstr \"Project-Id-Version: PROJECT VERSION\\n\"\n",
        );
        assert_eq!(
            catalog.header_comment,
            "# Translations template for PROJECT.\n# Copyright (C) 2024 ORGANIZATION",
        );
        let header = catalog.messages().next().unwrap();
        assert!(header.user_comments.is_empty());
        assert_eq!(header.string(), "Project-Id-Version: PROJECT VERSION\n");
    }

    #[test]
    fn previous_id_comments_are_recorded() {
        let catalog = parse(
            "#| msgid \"fo\"\n\
             msgid \"foo\"\n\
             msgstr \"Voh\"\n",
        );
        let message = catalog.messages().next().unwrap();
        assert_eq!(
            message.previous_id,
            Some(MessageId::Singular("fo".to_string())),
        );
    }

    #[test]
    fn crlf_line_endings() {
        let catalog = parse("msgid \"foo\"\r\nmsgstr \"bar\"\r\n");
        assert_singular(catalog.messages().next().unwrap(), "foo", "bar");
    }

    #[test]
    fn invalid_utf8_is_fatal() {
        let err = read_po(&b"msgid \"\xff\"\n"[..], &ParseOptions::default()).unwrap_err();
        assert!(err.message.contains("invalid UTF-8"));
    }

    #[test]
    fn parse_lines_matches_byte_input() {
        let lines = ["msgid \"foo\"", "msgstr \"bar\""];
        let catalog = PoFileParser::new(Catalog::new(), &ParseOptions::default())
            .parse_lines(lines)
            .unwrap();
        assert_singular(catalog.messages().next().unwrap(), "foo", "bar");
    }
}
