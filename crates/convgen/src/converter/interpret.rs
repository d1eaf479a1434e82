//! Directive dispatch.

use crate::converter::common::apply_common;
use crate::converter::format::apply_format;
use crate::converter::Converter;
use crate::diagnostic::ConfigError;
use crate::directive::{parse_command, parse_id_pattern, parse_string};
use crate::loader::{Loader, MatchOptions};

/// Converter level directive commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// `converter` / `variables`: only marks the declaration.
    Marker,
    Name,
    OutputRaw,
    OutputFile,
    OutputFormat,
    OutputPackage,
    StructComment,
    EnumExclude,
    Extend,
    /// Anything else is handed to the common settings.
    Common(&'a str),
}

impl<'a> Command<'a> {
    pub fn from_word(word: &'a str) -> Self {
        match word {
            "converter" | "variables" => Self::Marker,
            "name" => Self::Name,
            "output:raw" => Self::OutputRaw,
            "output:file" => Self::OutputFile,
            "output:format" => Self::OutputFormat,
            "output:package" => Self::OutputPackage,
            "struct:comment" => Self::StructComment,
            "enum:exclude" => Self::EnumExclude,
            "extend" => Self::Extend,
            other => Self::Common(other),
        }
    }
}

/// Applies one directive line to `c`.
pub fn apply_line(loader: &dyn Loader, c: &mut Converter, value: &str) -> Result<(), ConfigError> {
    let (word, rest) = parse_command(value);
    match Command::from_word(word) {
        Command::Marker => {}
        Command::Name => {
            c.require_struct(word)?;
            c.config.name = parse_string(rest)?;
        }
        Command::OutputRaw => c.config.output_raw.push(rest.to_string()),
        Command::OutputFile => c.config.output_file = parse_string(rest)?,
        Command::OutputFormat => {
            if !c.config.extend.is_empty() {
                return Err(ConfigError::FormatFrozen);
            }
            apply_format(c, rest)?;
        }
        Command::OutputPackage => {
            let package = parse_string(rest)?;
            c.config.set_package(&package);
        }
        Command::StructComment => {
            c.require_struct(word)?;
            c.config.comments.push(rest.to_string());
        }
        Command::EnumExclude => {
            let pattern = parse_id_pattern(&c.package, rest)?;
            c.config.common.enum_settings.excludes.push(pattern);
        }
        Command::Extend => extend(loader, c, rest)?,
        Command::Common(cmd) => {
            if !apply_common(&mut c.config.common, cmd, rest)? {
                return Err(ConfigError::UnknownSetting { name: cmd.to_string() });
            }
        }
    }
    Ok(())
}

/// Resolves each name and appends the matches. Names resolved before a
/// failing one stay appended.
fn extend(loader: &dyn Loader, c: &mut Converter, rest: &str) -> Result<(), ConfigError> {
    for name in rest.split_whitespace() {
        let opts = MatchOptions {
            require_params: true,
            context_match: &c.config.common.arg_context_regex,
            converter: c.type_for_method(),
        };
        let defs = loader.resolve_matching(&c.package, name, &opts)?;
        tracing::debug!(name, matches = defs.len(), "resolved extend");
        c.config.extend.extend(defs);
    }
    Ok(())
}
