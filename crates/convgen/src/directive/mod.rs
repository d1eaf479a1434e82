//! Directive input: raw line blocks and the argument parsers shared by
//! every command handler.
//!
//! Directive text arrives already split into lines by the tokenizer that
//! scanned the source declarations. Each line is `<command> <arguments>`;
//! the `convgen:` prefix has already been stripped.

mod parse;

pub use parse::{parse_bool, parse_enum, parse_id_pattern, parse_string};

use crate::diagnostic::Location;

/// Prefix the tokenizer strips from directive comments. Used in messages.
pub const DIRECTIVE_PREFIX: &str = "convgen";

/// An ordered block of directive lines from one origin.
#[derive(Debug, Clone)]
pub struct RawLines {
    pub location: Location,
    pub lines: Vec<String>,
}

impl RawLines {
    pub fn new(location: Location, lines: Vec<String>) -> Self {
        Self { location, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A converter declaration as found by source discovery.
#[derive(Debug, Clone)]
pub struct RawConverter {
    /// Import path of the declaring package.
    pub package_path: String,
    /// Name of the declaring package.
    pub package_name: String,
    /// File the declaration lives in.
    pub file_name: String,
    /// Set for interface-style declarations, `None` for variable blocks.
    pub interface_name: Option<String>,
    /// Local directives attached to the declaration.
    pub converter: RawLines,
}

/// Splits a directive line into its command word and trimmed remainder.
pub fn parse_command(value: &str) -> (&str, &str) {
    let value = value.trim();
    match value.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (value, ""),
    }
}
