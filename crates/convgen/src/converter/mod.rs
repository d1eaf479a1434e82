//! Converter configuration: the record every later generation step reads.
//!
//! A [`Converter`] is created once per declaration with defaults chosen by
//! declaration kind, then mutated line by line, global scope first and the
//! declaration's own lines last. After that it is never changed again.

mod build;
mod common;
mod format;
mod interpret;

pub use build::{init_converter, parse_converter, parse_lines, GLOBAL_SCOPE};
pub use common::{
    apply_common, Common, EnumSettings, Flags, IdPattern, UnknownEnum, DEFAULT_COMMON, DEFAULT_CONTEXT_REGEX,
};
pub use format::{Format, FormatPolicy};
pub use interpret::{apply_line, Command};

use std::path::Path;

use serde::Serialize;

use crate::config::PlannerConfig;
use crate::diagnostic::{ConfigError, Location};
use crate::loader::{Definition, TypeHandle};

/// Settings controlled by directives.
#[derive(Debug, Clone, Serialize)]
pub struct ConverterConfig {
    pub common: Common,
    pub name: String,
    pub output_raw: Vec<String>,
    pub output_file: String,
    pub output_package_path: String,
    pub output_package_name: String,
    pub output_format: Format,
    /// Receiver type; only set for [`Format::Method`].
    pub output_receiver: String,
    /// Helper functions, in declaration order.
    pub extend: Vec<Definition>,
    pub comments: Vec<String>,
}

impl ConverterConfig {
    /// Defaults for interface declarations.
    pub fn interface_defaults(config: &PlannerConfig) -> Self {
        Self {
            common: config.common.clone(),
            name: String::new(),
            output_raw: Vec::new(),
            output_file: config.output_file.clone(),
            output_package_path: String::new(),
            output_package_name: config.output_package_name.clone(),
            output_format: Format::Struct,
            output_receiver: String::new(),
            extend: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Defaults for variable declarations. Output lands next to the
    /// declaring file, in the declaring package.
    pub fn variable_defaults(config: &PlannerConfig, file_name: &str, package_path: &str, package_name: &str) -> Self {
        Self {
            output_file: default_output_file(file_name),
            output_package_path: package_path.to_string(),
            output_package_name: package_name.to_string(),
            output_format: Format::Variable,
            ..Self::interface_defaults(config)
        }
    }

    /// Identity of the output package: `path`, or `path:name` when a name is set.
    pub fn package_id(&self) -> String {
        if self.output_package_name.is_empty() {
            self.output_package_path.clone()
        } else {
            format!("{}:{}", self.output_package_path, self.output_package_name)
        }
    }

    /// Sets path and name from a single `path[:name]` value.
    pub fn set_package(&mut self, value: &str) {
        self.output_package_name.clear();
        match value.split_once(':') {
            Some((path, name)) => {
                self.output_package_path = path.to_string();
                self.output_package_name = name.to_string();
            }
            None => self.output_package_path = value.to_string(),
        }
    }
}

/// A converter declaration and its configuration.
#[derive(Debug, Clone, Serialize)]
pub struct Converter {
    #[serde(flatten)]
    pub config: ConverterConfig,
    /// Import path of the declaring package.
    pub package: String,
    pub file_name: String,
    pub location: Location,
    #[serde(rename = "subject_type")]
    typ: Option<TypeHandle>,
}

impl Converter {
    pub(crate) fn new(config: ConverterConfig, package: &str, file_name: &str, location: Location, typ: Option<TypeHandle>) -> Self {
        Self {
            config,
            package: package.to_string(),
            file_name: file_name.to_string(),
            location,
            typ,
        }
    }

    /// The interface type, `None` for variable declarations.
    pub fn subject_type(&self) -> Option<&TypeHandle> {
        self.typ.as_ref()
    }

    /// Label used for the declaration's own scope in error messages.
    pub fn id_string(&self) -> String {
        match &self.typ {
            Some(typ) => typ.to_string(),
            None => "var definition".to_string(),
        }
    }

    pub fn package_id(&self) -> String {
        self.config.package_id()
    }

    /// Package the generated code lands in.
    ///
    /// With no `output:package` path the output directory is taken relative
    /// to the declaring package, so `./generated/generated.go` declared in
    /// `example.com/a` targets `example.com/a/generated:generated`.
    pub fn target_package_id(&self) -> String {
        if !self.config.output_package_path.is_empty() {
            return self.config.package_id();
        }
        let dir = Path::new(&self.config.output_file)
            .parent()
            .map(|p| p.to_string_lossy().trim_start_matches("./").trim_end_matches('/').to_string())
            .unwrap_or_default();
        let path = if dir.is_empty() || dir == "." {
            self.package.clone()
        } else {
            format!("{}/{}", self.package, dir)
        };
        if self.config.output_package_name.is_empty() {
            path
        } else {
            format!("{}:{}", path, self.config.output_package_name)
        }
    }

    /// The directive that introduces this kind of declaration.
    pub(crate) fn declaration(&self) -> &'static str {
        if self.typ.is_some() {
            "converter"
        } else {
            "variables"
        }
    }

    /// Type extend functions may take as leading parameter.
    pub(crate) fn type_for_method(&self) -> Option<&TypeHandle> {
        if self.config.output_format == Format::Function {
            return None;
        }
        self.typ.as_ref()
    }

    pub(crate) fn require_struct(&self, command: &str) -> Result<(), ConfigError> {
        let format = self.config.output_format;
        if format.policy().struct_fields {
            Ok(())
        } else {
            Err(ConfigError::RequiresStruct {
                command: command.to_string(),
                format,
            })
        }
    }
}

/// `dir/orders.go` becomes `orders.gen.go`.
fn default_output_file(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    match base.rfind('.') {
        Some(idx) => format!("{}.gen{}", &base[..idx], &base[idx..]),
        None => format!("{}.gen", base),
    }
}
