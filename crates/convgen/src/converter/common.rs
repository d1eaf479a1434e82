//! Settings shared by every generation target.
//!
//! These are the directives that are not specific to a converter
//! declaration and may equally appear on individual conversion methods.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::diagnostic::ConfigError;
use crate::directive::{parse_bool, parse_string};

/// Default context parameter pattern.
pub const DEFAULT_CONTEXT_REGEX: &str = "^ctx|^context";

/// Defaults every converter starts from. Never mutated.
pub static DEFAULT_COMMON: Lazy<Common> = Lazy::new(|| Common {
    enum_settings: EnumSettings {
        enabled: true,
        unknown: None,
        excludes: Vec::new(),
    },
    arg_context_regex: Regex::new(DEFAULT_CONTEXT_REGEX).expect("default context regex is valid"),
    flags: Flags::default(),
});

#[derive(Debug, Clone, Serialize)]
pub struct Common {
    #[serde(rename = "enum")]
    pub enum_settings: EnumSettings,
    #[serde(serialize_with = "serialize_regex")]
    pub arg_context_regex: Regex,
    pub flags: Flags,
}

impl Default for Common {
    fn default() -> Self {
        DEFAULT_COMMON.clone()
    }
}

/// Enum conversion handling.
#[derive(Debug, Clone, Serialize)]
pub struct EnumSettings {
    pub enabled: bool,
    pub unknown: Option<UnknownEnum>,
    pub excludes: Vec<IdPattern>,
}

impl EnumSettings {
    /// Whether enum handling applies to the type `package.name`.
    pub fn applies_to(&self, package: &str, name: &str) -> bool {
        self.enabled && !self.excludes.iter().any(|p| p.matches(package, name))
    }
}

/// What to do with a source enum member that has no target counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownEnum {
    Ignore,
    Panic,
    Error,
    /// Map to this target member.
    Value(String),
}

impl UnknownEnum {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = parse_string(value)?;
        match value.as_str() {
            "@ignore" => Ok(Self::Ignore),
            "@panic" => Ok(Self::Panic),
            "@error" => Ok(Self::Error),
            v if v.is_empty() || v.starts_with('@') => Err(ConfigError::InvalidValue {
                name: "enum:unknown".to_string(),
                expected: vec!["@ignore".into(), "@panic".into(), "@error".into(), "<member>".into()],
                actual: v.to_string(),
            }),
            v => Ok(Self::Value(v.to_string())),
        }
    }
}

/// A `[package:]name` identifier pattern.
#[derive(Debug, Clone)]
pub struct IdPattern {
    pub package: Regex,
    pub name: Regex,
}

impl IdPattern {
    pub fn matches(&self, package: &str, name: &str) -> bool {
        self.package.is_match(package) && self.name.is_match(name)
    }
}

impl Serialize for IdPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("IdPattern", 2)?;
        state.serialize_field("package", self.package.as_str())?;
        state.serialize_field("name", self.name.as_str())?;
        state.end()
    }
}

/// Boolean conversion switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flags {
    pub ignore_missing: bool,
    pub ignore_unexported: bool,
    pub match_ignore_case: bool,
    pub skip_copy_same_type: bool,
    pub use_zero_value_on_pointer_inconsistency: bool,
    pub use_underlying_type_methods: bool,
    pub wrap_errors: bool,
}

impl Flags {
    fn get_mut(&mut self, cmd: &str) -> Option<&mut bool> {
        match cmd {
            "ignoreMissing" => Some(&mut self.ignore_missing),
            "ignoreUnexported" => Some(&mut self.ignore_unexported),
            "matchIgnoreCase" => Some(&mut self.match_ignore_case),
            "skipCopySameType" => Some(&mut self.skip_copy_same_type),
            "useZeroValueOnPointerInconsistency" => Some(&mut self.use_zero_value_on_pointer_inconsistency),
            "useUnderlyingTypeMethods" => Some(&mut self.use_underlying_type_methods),
            "wrapErrors" => Some(&mut self.wrap_errors),
            _ => None,
        }
    }
}

/// Applies a common setting.
///
/// Returns `Ok(false)` when `cmd` is not a common setting.
pub fn apply_common(common: &mut Common, cmd: &str, rest: &str) -> Result<bool, ConfigError> {
    match cmd {
        "enum" => common.enum_settings.enabled = parse_bool(rest)?,
        "enum:unknown" => common.enum_settings.unknown = Some(UnknownEnum::parse(rest)?),
        "arg:context:regex" => {
            let pattern = parse_string(rest)?;
            common.arg_context_regex = Regex::new(&pattern).map_err(|e| ConfigError::InvalidPattern {
                value: pattern.clone(),
                message: e.to_string(),
            })?;
        }
        _ => match common.flags.get_mut(cmd) {
            Some(flag) => *flag = parse_bool(rest)?,
            None => return Ok(false),
        },
    }
    Ok(true)
}

fn serialize_regex<S: Serializer>(regex: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(regex.as_str())
}
