//! Converter configuration error types.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::converter::Format;
use crate::diagnostic::Location;
use crate::directive::DIRECTIVE_PREFIX;
use crate::loader::LoadError;

/// Coarse classification of a [`ConfigError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A directive is illegal given the current converter state.
    Configuration,
    /// A directive argument is malformed.
    Parse,
    /// The loader could not find a requested type or symbol.
    Resolution,
    /// The directive input itself (manifest file) could not be read.
    Input,
}

/// Errors that can occur while building a converter configuration.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("'{command}' is only allowed with output:format struct, current format is {format}")]
    #[diagnostic(
        code(convgen::config::requires_struct),
        help("Variable declarations and function/method formats have no generated struct to name or comment.")
    )]
    RequiresStruct { command: String, format: Format },

    #[error("Cannot change output:format after extend functions have been added.")]
    #[diagnostic(
        code(convgen::config::format_frozen),
        help("Move the extend below the output:format setting.")
    )]
    FormatFrozen,

    #[error("invalid format value: expected {expected} but got {actual}: [{}]", .fields.join(" "))]
    #[diagnostic(code(convgen::config::field_count))]
    FieldCount {
        expected: &'static str,
        actual: usize,
        fields: Vec<String>,
    },

    #[error("unsupported format {format} for {}:{declaration}", DIRECTIVE_PREFIX)]
    #[diagnostic(
        code(convgen::config::unsupported_format),
        help("assign-variable is only valid for variable declarations; struct, function and method need an interface.")
    )]
    UnsupportedFormat {
        format: Format,
        declaration: &'static str,
    },

    #[error("Duplicate converter '{name}' in package {package}")]
    #[diagnostic(
        code(convgen::config::duplicate_converter),
        help("Give one of the converters a different name or output:package.")
    )]
    DuplicateConverter { package: String, name: String },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("invalid value for \"{name}\": expected one of [{}] but got \"{actual}\"", .expected.join(" "))]
    #[diagnostic(code(convgen::parse::invalid_value))]
    InvalidValue {
        name: String,
        expected: Vec<String>,
        actual: String,
    },

    #[error("invalid string {value}: {message}")]
    #[diagnostic(code(convgen::parse::invalid_string))]
    InvalidString { value: String, message: String },

    #[error("invalid boolean value: \"{value}\"")]
    #[diagnostic(
        code(convgen::parse::invalid_bool),
        help("Use 'yes', 'no', or leave the value empty for yes.")
    )]
    InvalidBool { value: String },

    #[error("invalid pattern \"{value}\": {message}")]
    #[diagnostic(code(convgen::parse::invalid_pattern))]
    InvalidPattern { value: String, message: String },

    #[error("unknown setting: {name}")]
    #[diagnostic(code(convgen::parse::unknown_setting))]
    UnknownSetting { name: String },

    // =========================================================================
    // Resolution Errors
    // =========================================================================
    #[error("{0}")]
    #[diagnostic(code(convgen::resolve::failed))]
    Resolution(#[from] LoadError),

    // =========================================================================
    // Scope Context
    // =========================================================================
    #[error("error parsing '{}:{line}' at\n    {location}\n    {scope}\n\n{cause}", DIRECTIVE_PREFIX)]
    #[diagnostic(code(convgen::directive::line))]
    Line {
        line: String,
        location: Location,
        scope: String,
        cause: Box<ConfigError>,
    },

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Failed to read file '{}': {message}", .path.display())]
    #[diagnostic(code(convgen::io::read_error))]
    IoError { path: PathBuf, message: String },

    #[error("Invalid manifest '{}': {message}", .path.display())]
    #[diagnostic(code(convgen::io::invalid_manifest))]
    InvalidManifest { path: PathBuf, message: String },

    #[error("Failed to serialize generation plan: {message}")]
    #[diagnostic(code(convgen::io::serialize_failed))]
    SerializeFailed { message: String },

    #[error("Failed to write file '{}': {message}", .path.display())]
    #[diagnostic(code(convgen::io::write_error))]
    WriteFailed { path: PathBuf, message: String },
}

impl ConfigError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wraps an error with the directive line and scope it came from.
    pub fn in_line(self, line: &str, location: &Location, scope: &str) -> Self {
        Self::Line {
            line: line.to_string(),
            location: location.clone(),
            scope: scope.to_string(),
            cause: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping scope wrappers.
    pub fn root(&self) -> &ConfigError {
        match self {
            Self::Line { cause, .. } => cause.root(),
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RequiresStruct { .. }
            | Self::FormatFrozen
            | Self::FieldCount { .. }
            | Self::UnsupportedFormat { .. }
            | Self::DuplicateConverter { .. } => ErrorKind::Configuration,
            Self::InvalidValue { .. }
            | Self::InvalidString { .. }
            | Self::InvalidBool { .. }
            | Self::InvalidPattern { .. }
            | Self::UnknownSetting { .. } => ErrorKind::Parse,
            Self::Resolution(_) => ErrorKind::Resolution,
            Self::IoError { .. }
            | Self::InvalidManifest { .. }
            | Self::SerializeFailed { .. }
            | Self::WriteFailed { .. } => ErrorKind::Input,
            Self::Line { cause, .. } => cause.kind(),
        }
    }
}
