//! Type and symbol resolution.
//!
//! Resolving type names and helper functions from the surrounding program is
//! not done by this crate. Callers plug in a [`Loader`]; the builder only
//! asks it two questions. [`StaticLoader`] answers them from a manifest and
//! backs the CLI and the tests.

mod manifest;

pub use manifest::{DeclarationManifest, FunctionManifest, Manifest, PackageManifest, StaticLoader};

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Trait for symbol loaders.
pub trait Loader: Send + Sync {
    /// Resolves a named type declared in `package`.
    fn resolve_type(&self, package: &str, name: &str) -> Result<TypeHandle, LoadError>;

    /// Resolves every function matching `name` that satisfies `opts`.
    ///
    /// `name` is `[package:]pattern`; without a package the lookup happens in
    /// `package`. An empty result is reported as [`LoadError::NoMatch`].
    fn resolve_matching(
        &self,
        package: &str,
        name: &str,
        opts: &MatchOptions<'_>,
    ) -> Result<Vec<Definition>, LoadError>;
}

/// Constraints a helper function must satisfy to be used by a converter.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions<'a> {
    /// Reject functions without any source parameter.
    pub require_params: bool,
    /// Parameters whose name matches are context parameters.
    pub context_match: &'a Regex,
    /// Type a leading parameter may have to receive the converter itself.
    /// `None` when the converter is generated as standalone functions.
    pub converter: Option<&'a TypeHandle>,
}

/// Opaque reference to a resolved named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeHandle {
    pub package: String,
    pub name: String,
}

impl TypeHandle {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
}

/// A resolved helper function usable by downstream code synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    pub package: String,
    pub name: String,
    /// Whether the first parameter receives the converter.
    pub self_param: bool,
    pub source: Vec<Param>,
    pub context: Vec<Param>,
    pub result: String,
}

impl Definition {
    /// Fully qualified `package.Name`.
    pub fn id(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

/// Errors produced by a [`Loader`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("could not find package {package}")]
    PackageNotFound { package: String },

    #[error("could not find type {name} in package {package}")]
    TypeNotFound { package: String, name: String },

    #[error("could not find a function matching {package}:{pattern}")]
    NoMatch { package: String, pattern: String },

    #[error("error parsing type {id}: {message}")]
    Incompatible { id: String, message: String },

    #[error("invalid extend name \"{name}\": {message}")]
    InvalidName { name: String, message: String },
}
