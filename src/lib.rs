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

//! Reading and writing of message catalogs in the `gettext` PO
//! (portable object) format.
//!
//! A PO file is a sequence of entries, each holding an original string
//! (`msgid`), its translation (`msgstr`), and metadata carried in `#`
//! comments: source locations, flags, translator and extractor
//! comments. This crate converts between that textual format and an
//! in-memory [`Catalog`] of [`Message`] values:
//!
//! ```
//! use gettext_po::{read_po, write_po, GenerateOptions, ParseOptions};
//!
//! let input = br#"
//! #: main.rs:12
//! msgid "Hello, world!"
//! msgstr "Hallo, Welt!"
//! "#;
//! let catalog = read_po(&input[..], &ParseOptions::default()).unwrap();
//! let mut output = Vec::new();
//! write_po(&mut output, &catalog, &GenerateOptions::default()).unwrap();
//! ```
//!
//! The low-level string codecs used by the parser and generator
//! ([`escape`], [`unescape`], [`normalize`], [`denormalize`]) are
//! exported as well since tools that post-process PO files need them.

use regex::{Captures, Regex};
use std::sync::OnceLock;

pub mod catalog;
pub mod generate;
pub mod parse;

pub use catalog::{message_key, Catalog, Location, Message, MessageId, MessageKey};
pub use generate::{generate_po, write_po, GenerateOptions, PoLines, SortBy};
pub use parse::{read_po, ParseOptions, PoFileError, PoFileParser};

/// Escape `string` so that it can be included in a double-quoted
/// string in a PO file.
///
/// ```
/// use gettext_po::escape;
///
/// assert_eq!(
///     escape("Say:\n  \"hello, world!\"\n"),
///     r#""Say:\n  \"hello, world!\"\n""#,
/// );
/// ```
pub fn escape(string: &str) -> String {
    let mut escaped = String::with_capacity(string.len() + 2);
    escaped.push('"');
    for c in string.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            '"' => escaped.push_str("\\\""),
            _ => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}

fn unescape_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\\([\\trn"])"#).unwrap())
}

/// Reverse [`escape`]: strip the surrounding double quotes and expand
/// the escape sequences `\\`, `\t`, `\r`, `\n` and `\"`. Any other
/// backslash-prefixed character is passed through as the character
/// following the backslash.
///
/// ```
/// use gettext_po::unescape;
///
/// assert_eq!(
///     unescape(r#""Say:\n  \"hello, world!\"\n""#),
///     "Say:\n  \"hello, world!\"\n",
/// );
/// ```
pub fn unescape(string: &str) -> String {
    let inner = string
        .get(1..string.len().saturating_sub(1))
        .unwrap_or_default();
    // Fast path: there is nothing to unescape.
    if !inner.contains('\\') {
        return inner.to_string();
    }
    unescape_re()
        .replace_all(inner, |caps: &Captures| match &caps[1] {
            "n" => "\n".to_string(),
            "t" => "\t".to_string(),
            "r" => "\r".to_string(),
            other => other.to_string(),
        })
        .into_owned()
}

/// Reverse the normalization done by [`normalize`].
///
/// A multi-line value starts with a bare `""` marker followed by one
/// quoted string per physical line; the lines are unescaped and
/// concatenated. A single-line value is simply unescaped. No width
/// information is needed: wherever `normalize` broke a line, the
/// fragments concatenate back to the original string.
pub fn denormalize(string: &str) -> String {
    if string.contains('\n') {
        let mut lines = string.lines();
        if string.starts_with("\"\"") {
            lines.next();
        }
        lines.map(unescape).collect()
    } else {
        unescape(string)
    }
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True if the text after a candidate hyphen break continues with a
/// word containing a letter beyond its first character.
fn continues_hyphenated_word(chars: &[char], start: usize) -> bool {
    if start >= chars.len() || !is_word(chars[start]) {
        return false;
    }
    chars[start + 1..]
        .iter()
        .take_while(|c| is_word(**c))
        .any(|c| c.is_ascii_alphabetic())
}

/// Match a word separator at position `i`, returning the end of the
/// separator. Separators are whitespace runs, hyphenated compounds
/// (the hyphen stays with the preceding word), and em-dash runs of two
/// or more dashes between words.
fn match_separator(chars: &[char], i: usize) -> Option<usize> {
    let n = chars.len();

    if chars[i].is_whitespace() {
        let mut j = i + 1;
        while j < n && chars[j].is_whitespace() {
            j += 1;
        }
        return Some(j);
    }

    // Hyphenated compound: optional punctuation, a word of two or more
    // characters ending in a letter, then a hyphen followed by more
    // word material. The separator consumes everything up to and
    // including the hyphen.
    let mut j = i;
    while j < n && !chars[j].is_whitespace() && !is_word(chars[j]) {
        j += 1;
    }
    let word_start = j;
    while j < n && is_word(chars[j]) {
        j += 1;
    }
    if j - word_start >= 2
        && chars[j - 1].is_ascii_alphabetic()
        && j < n
        && chars[j] == '-'
        && continues_hyphenated_word(chars, j + 1)
    {
        return Some(j + 1);
    }

    // Em-dash: two or more dashes preceded by a word character or
    // sentence punctuation and followed by a word character.
    if chars[i] == '-' && i + 1 < n && chars[i + 1] == '-' && i > 0 {
        let prev = chars[i - 1];
        if is_word(prev) || matches!(prev, '!' | '"' | '\'' | '&' | '.' | ',' | '?') {
            let mut j = i;
            while j < n && chars[j] == '-' {
                j += 1;
            }
            if j < n && is_word(chars[j]) {
                return Some(j);
            }
        }
    }

    None
}

/// Split `line` into alternating text and separator chunks. Both kinds
/// of chunk are kept, so concatenating the chunks gives back `line`;
/// empty text chunks appear between adjacent separators.
fn split_chunks(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut chunks = Vec::new();
    let mut last = 0;
    let mut i = 0;
    while i < chars.len() {
        match match_separator(&chars, i) {
            Some(end) => {
                chunks.push(chars[last..i].iter().collect());
                chunks.push(chars[i..end].iter().collect());
                i = end;
                last = end;
            }
            None => i += 1,
        }
    }
    chunks.push(chars[last..].iter().collect());
    chunks
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Convert `string` into the (possibly multi-line) quoted form used
/// for PO values.
///
/// With a positive `width`, lines whose escaped form would exceed the
/// width are wrapped: the line is split into chunks at word
/// separators and the chunks are greedily packed into physical lines,
/// accounting for two characters of quote overhead and the length of
/// `prefix` (which is prepended to every output line, e.g. `#~ ` for
/// obsolete messages). A chunk that alone exceeds the width goes on a
/// line of its own rather than being broken. A `width` of 0 disables
/// wrapping entirely.
///
/// ```
/// use gettext_po::normalize;
///
/// assert_eq!(
///     normalize("Say:\n  \"hello, world!\"\n", "", 0),
///     "\"\"\n\"Say:\\n\"\n\"  \\\"hello, world!\\\"\\n\"",
/// );
/// ```
pub fn normalize(string: &str, prefix: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    if width > 0 {
        let prefix_len = char_len(prefix);
        for line in string.split_inclusive('\n') {
            if char_len(&escape(line)) + prefix_len <= width {
                lines.push(line.to_string());
                continue;
            }
            let mut chunks = split_chunks(line);
            chunks.reverse();
            while !chunks.is_empty() {
                let mut buf = String::new();
                let mut packed = false;
                let mut size = 2;
                while let Some(chunk) = chunks.last() {
                    let cost = char_len(&escape(chunk)) - 2 + prefix_len;
                    if size + cost < width {
                        buf.push_str(&chunks.pop().unwrap_or_default());
                        packed = true;
                        size += cost;
                    } else {
                        if !packed {
                            // An overlong chunk gets a line of its own.
                            buf.push_str(&chunks.pop().unwrap_or_default());
                        }
                        break;
                    }
                }
                lines.push(buf);
            }
        }
    } else {
        lines.extend(string.split_inclusive('\n').map(String::from));
    }

    if lines.len() <= 1 {
        return escape(string);
    }

    // Wrapping can leave an empty final line; drop it and fold its
    // newline onto the previous line.
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
        if let Some(last) = lines.last_mut() {
            last.push('\n');
        }
    }

    let mut result = String::from("\"\"");
    for line in &lines {
        result.push('\n');
        result.push_str(prefix);
        result.push_str(&escape(line));
    }
    result
}
