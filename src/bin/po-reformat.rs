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

//! Reformat a PO or POT file.
//!
//! This program parses a PO file and writes it back out with the
//! requested line width, message order, and comment selection. Use it
//! to canonicalize files before diffing them, or to rewrap a file
//! after hand edits.

use anyhow::Context;
use clap::Parser;
use gettext_po::{read_po, write_po, GenerateOptions, ParseOptions, SortBy};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(about = "Reformat a gettext PO file", version)]
struct Args {
    /// The PO file to read.
    input: PathBuf,
    /// The file to write the reformatted output to.
    output: PathBuf,
    /// Maximum line width; 0 disables wrapping of message strings.
    #[arg(long, default_value_t = 76)]
    width: usize,
    /// Sort messages by their original string.
    #[arg(long)]
    sort_output: bool,
    /// Sort messages by their source locations.
    #[arg(long, conflicts_with = "sort_output")]
    sort_by_file: bool,
    /// Do not emit location comments.
    #[arg(long)]
    no_location: bool,
    /// Do not emit the header entry.
    #[arg(long)]
    omit_header: bool,
    /// Drop obsolete messages.
    #[arg(long)]
    ignore_obsolete: bool,
    /// Emit previous-msgid comments for fuzzy messages.
    #[arg(long)]
    include_previous: bool,
    /// Fail on the first invalid line instead of warning.
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    run(&Args::parse())
}

fn run(args: &Args) -> anyhow::Result<()> {
    let parse_options = ParseOptions {
        ignore_obsolete: args.ignore_obsolete,
        abort_invalid: args.strict,
    };
    let input = File::open(&args.input)
        .with_context(|| format!("Could not open {}", args.input.display()))?;
    let catalog = read_po(BufReader::new(input), &parse_options)
        .map_err(|err| anyhow::anyhow!("Could not parse {}: {err}", args.input.display()))?;

    let sort_by = if args.sort_output {
        Some(SortBy::Message)
    } else if args.sort_by_file {
        Some(SortBy::Location)
    } else {
        None
    };
    let generate_options = GenerateOptions {
        width: args.width,
        no_location: args.no_location,
        omit_header: args.omit_header,
        sort_by,
        ignore_obsolete: args.ignore_obsolete,
        include_previous: args.include_previous,
        ..GenerateOptions::default()
    };

    let output = File::create(&args.output)
        .with_context(|| format!("Could not create {}", args.output.display()))?;
    write_po(output, &catalog, &generate_options)
        .with_context(|| format!("Could not write catalog to {}", args.output.display()))?;

    Ok(())
}
