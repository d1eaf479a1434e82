//! Output formats and the rules attached to each.

use std::fmt;

use serde::Serialize;

use crate::converter::Converter;
use crate::diagnostic::ConfigError;
use crate::directive::parse_enum;

/// The shape of the generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Format {
    /// A struct type implementing the converter interface.
    #[serde(rename = "struct")]
    Struct,
    /// Package level variables assigned with generated functions.
    #[serde(rename = "assign-variable")]
    Variable,
    /// Standalone functions.
    #[serde(rename = "function")]
    Function,
    /// Methods on an existing receiver type.
    #[serde(rename = "method")]
    Method,
}

impl Format {
    /// Accepted values of `output:format`, in the order they are reported.
    pub const ALL: &'static [Format] = &[Format::Function, Format::Struct, Format::Variable, Format::Method];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Struct => "struct",
            Format::Variable => "assign-variable",
            Format::Function => "function",
            Format::Method => "method",
        }
    }

    pub fn policy(self) -> FormatPolicy {
        match self {
            Format::Struct => FormatPolicy {
                arity: 1,
                struct_fields: true,
                needs_subject: true,
            },
            Format::Function => FormatPolicy {
                arity: 1,
                struct_fields: false,
                needs_subject: true,
            },
            Format::Variable => FormatPolicy {
                arity: 1,
                struct_fields: false,
                needs_subject: false,
            },
            Format::Method => FormatPolicy {
                arity: 2,
                struct_fields: false,
                needs_subject: true,
            },
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a format allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatPolicy {
    /// Number of `output:format` fields, including the format name.
    pub arity: usize,
    /// Whether `name` and `struct:comment` may be set.
    pub struct_fields: bool,
    /// Whether the declaration must have a subject type (interface style).
    pub needs_subject: bool,
}

impl FormatPolicy {
    pub fn compatible(&self, has_subject: bool) -> bool {
        self.needs_subject == has_subject
    }

    fn arity_word(&self) -> &'static str {
        if self.arity == 2 {
            "two values"
        } else {
            "one value"
        }
    }
}

/// Applies the remainder of an `output:format` directive.
///
/// Nothing is changed unless the whole directive is valid.
pub(crate) fn apply_format(c: &mut Converter, rest: &str) -> Result<(), ConfigError> {
    let fields: Vec<&str> = rest.split_whitespace().collect();
    let Some(first) = fields.first() else {
        return Ok(());
    };

    let format = parse_enum("format", first, Format::ALL)?;
    let policy = format.policy();

    if fields.len() != policy.arity {
        return Err(ConfigError::FieldCount {
            expected: policy.arity_word(),
            actual: fields.len(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
    }

    if !policy.compatible(c.subject_type().is_some()) {
        return Err(ConfigError::UnsupportedFormat {
            format,
            declaration: c.declaration(),
        });
    }

    c.config.output_format = format;
    c.config.output_receiver = match format {
        Format::Method => fields.get(1).map(|r| r.to_string()).unwrap_or_default(),
        _ => String::new(),
    };
    Ok(())
}
