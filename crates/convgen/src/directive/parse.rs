//! Argument parsers for directive remainders.

use std::fmt::Display;

use regex::Regex;

use crate::converter::IdPattern;
use crate::diagnostic::ConfigError;

/// Parses a string argument.
///
/// A value starting with `"` must be a complete double quoted literal,
/// anything else is taken verbatim.
pub fn parse_string(value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    let Some(body) = value.strip_prefix('"') else {
        return Ok(value.to_string());
    };

    let invalid = |message: &str| ConfigError::InvalidString {
        value: value.to_string(),
        message: message.to_string(),
    };

    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((idx, c)) = chars.next() {
        match c {
            '"' => {
                if !body[idx + 1..].trim().is_empty() {
                    return Err(invalid("unexpected text after closing quote"));
                }
                return Ok(out);
            }
            '\\' => match chars.next() {
                Some((_, '"')) => out.push('"'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, other)) => {
                    return Err(invalid(&format!("invalid escape sequence \\{}", other)))
                }
                None => break,
            },
            _ => out.push(c),
        }
    }

    Err(invalid("missing closing quote"))
}

/// Parses `value` as one of a closed set of options, compared by their
/// display form (case sensitive).
pub fn parse_enum<T: Copy + Display>(name: &str, value: &str, options: &[T]) -> Result<T, ConfigError> {
    options
        .iter()
        .copied()
        .find(|option| option.to_string() == value)
        .ok_or_else(|| ConfigError::InvalidValue {
            name: name.to_string(),
            expected: options.iter().map(ToString::to_string).collect(),
            actual: value.to_string(),
        })
}

/// Parses a boolean flag. An empty value means yes.
pub fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "" | "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(ConfigError::InvalidBool {
            value: other.to_string(),
        }),
    }
}

/// Parses an identifier pattern of the form `[package:]name`.
///
/// Both halves are regular expressions matched against the whole
/// identifier. Without a package half the pattern is pinned to `package`.
pub fn parse_id_pattern(package: &str, value: &str) -> Result<IdPattern, ConfigError> {
    let value = value.trim();
    let (pkg, name) = match value.split_once(':') {
        Some((pkg, name)) => (anchored(value, pkg)?, name),
        None => (anchored(value, &regex::escape(package))?, value),
    };

    if name.is_empty() {
        return Err(ConfigError::InvalidPattern {
            value: value.to_string(),
            message: "missing name".to_string(),
        });
    }

    Ok(IdPattern {
        package: pkg,
        name: anchored(value, name)?,
    })
}

fn anchored(value: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| ConfigError::InvalidPattern {
        value: value.to_string(),
        message: e.to_string(),
    })
}
