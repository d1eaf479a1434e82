//! Manifest-backed loader.
//!
//! A manifest is a JSON description of the packages a generator run can see
//! (their types and functions) plus the converter declarations found in them.
//!
//! ```json
//! {
//!   "global": ["output:format function"],
//!   "packages": {
//!     "example.com/app": {
//!       "name": "app",
//!       "types": ["Converter"],
//!       "functions": [{ "name": "FormatTime", "params": [{ "name": "t", "type": "time.Time" }], "result": "string" }]
//!     }
//!   },
//!   "declarations": [
//!     { "package": "example.com/app", "file": "convert.go", "line": 7, "interface": "Converter", "lines": ["converter"] }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::diagnostic::{ConfigError, Location};
use crate::directive::{RawConverter, RawLines};
use crate::loader::{Definition, LoadError, Loader, MatchOptions, Param, TypeHandle};

/// The complete manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Directives applied to every declaration before its own.
    #[serde(default)]
    pub global: Vec<String>,

    /// Packages keyed by import path.
    #[serde(default)]
    pub packages: BTreeMap<String, PackageManifest>,

    #[serde(default)]
    pub declarations: Vec<DeclarationManifest>,
}

/// Types and functions of one package.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub functions: Vec<FunctionManifest>,
}

/// A function signature.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionManifest {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub result: Option<String>,
}

/// A converter declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct DeclarationManifest {
    /// Import path of the declaring package.
    pub package: String,
    pub file: String,
    #[serde(default)]
    pub line: Option<usize>,
    /// Interface name; absent for variable declarations.
    #[serde(default)]
    pub interface: Option<String>,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Manifest {
    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e.to_string()))?;
        Self::parse(&content, path)
    }

    /// Parses manifest JSON. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::InvalidManifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The manifest's global directives as a line block.
    pub fn global_lines(&self, path: &Path) -> RawLines {
        RawLines::new(Location::origin(path), self.global.clone())
    }

    /// Converts every declaration to the builder's input form.
    pub fn raw_converters(&self, path: &Path) -> Result<Vec<RawConverter>, ConfigError> {
        self.declarations
            .iter()
            .map(|decl| {
                let package = self.packages.get(&decl.package).ok_or_else(|| {
                    ConfigError::InvalidManifest {
                        path: path.to_path_buf(),
                        message: format!(
                            "declaration in {} references unknown package {}",
                            decl.file, decl.package
                        ),
                    }
                })?;
                Ok(RawConverter {
                    package_path: decl.package.clone(),
                    package_name: package.name.clone(),
                    file_name: decl.file.clone(),
                    interface_name: decl.interface.clone(),
                    converter: RawLines::new(Location::new(&decl.file, decl.line), decl.lines.clone()),
                })
            })
            .collect()
    }
}

/// An in-memory [`Loader`] answering from manifest packages.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    packages: BTreeMap<String, PackageManifest>,
}

impl StaticLoader {
    pub fn new(packages: BTreeMap<String, PackageManifest>) -> Self {
        Self { packages }
    }

    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self::new(manifest.packages.clone())
    }

    fn package(&self, package: &str) -> Result<&PackageManifest, LoadError> {
        self.packages.get(package).ok_or_else(|| LoadError::PackageNotFound {
            package: package.to_string(),
        })
    }
}

impl Loader for StaticLoader {
    fn resolve_type(&self, package: &str, name: &str) -> Result<TypeHandle, LoadError> {
        let pkg = self.package(package)?;
        if pkg.types.iter().any(|t| t == name) {
            Ok(TypeHandle::new(package, name))
        } else {
            Err(LoadError::TypeNotFound {
                package: package.to_string(),
                name: name.to_string(),
            })
        }
    }

    fn resolve_matching(
        &self,
        package: &str,
        name: &str,
        opts: &MatchOptions<'_>,
    ) -> Result<Vec<Definition>, LoadError> {
        let (package, pattern) = name.split_once(':').unwrap_or((package, name));
        let pkg = self.package(package)?;

        let exact = regex::escape(pattern) == pattern;
        let matcher = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| LoadError::InvalidName {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let mut defs = Vec::new();
        for function in pkg.functions.iter().filter(|f| matcher.is_match(&f.name)) {
            match definition(package, function, opts) {
                Ok(def) => defs.push(def),
                Err(message) if exact => {
                    return Err(LoadError::Incompatible {
                        id: format!("{}.{}", package, function.name),
                        message,
                    })
                }
                Err(message) => {
                    tracing::debug!(package, function = %function.name, %message, "skipping pattern match");
                }
            }
        }

        if defs.is_empty() {
            return Err(LoadError::NoMatch {
                package: package.to_string(),
                pattern: pattern.to_string(),
            });
        }
        Ok(defs)
    }
}

/// Checks a signature against the match options.
fn definition(package: &str, function: &FunctionManifest, opts: &MatchOptions<'_>) -> Result<Definition, String> {
    let result = function
        .result
        .clone()
        .ok_or_else(|| "must have a return value".to_string())?;

    let mut params = function.params.as_slice();
    let mut self_param = false;
    if let (Some(converter), Some((first, rest))) = (opts.converter, params.split_first()) {
        if first.typ == converter.to_string() {
            self_param = true;
            params = rest;
        }
    }

    let (context, source): (Vec<Param>, Vec<Param>) = params
        .iter()
        .cloned()
        .partition(|p| opts.context_match.is_match(&p.name));

    if opts.require_params && source.is_empty() {
        return Err("must have at least one source parameter".to_string());
    }

    Ok(Definition {
        package: package.to_string(),
        name: function.name.clone(),
        self_param,
        source,
        context,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
        "global": ["enum no"],
        "packages": {
            "example.com/app": {
                "name": "app",
                "types": ["Converter"],
                "functions": [
                    { "name": "FormatTime", "params": [{ "name": "t", "type": "time.Time" }, { "name": "ctx", "type": "string" }], "result": "string" },
                    { "name": "FormatDate", "params": [{ "name": "d", "type": "time.Time" }], "result": "string" },
                    { "name": "FormatNothing", "params": [{ "name": "context", "type": "string" }], "result": "string" },
                    { "name": "WithConverter", "params": [{ "name": "c", "type": "example.com/app.Converter" }, { "name": "v", "type": "int" }], "result": "string" },
                    { "name": "NoResult", "params": [{ "name": "v", "type": "int" }] }
                ]
            }
        },
        "declarations": [
            { "package": "example.com/app", "file": "convert.go", "line": 3, "interface": "Converter", "lines": ["converter"] },
            { "package": "example.com/app", "file": "vars.go", "lines": ["variables"] }
        ]
    }"#;

    fn setup_test_dir(content: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn context_regex() -> Regex {
        Regex::new("^ctx|^context").unwrap()
    }

    #[test]
    fn test_load_manifest_and_declarations() {
        let (_dir, path) = setup_test_dir(MANIFEST);
        let manifest = Manifest::load(&path).unwrap();

        assert_eq!(manifest.global, vec!["enum no"]);
        let raw = manifest.raw_converters(&path).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].interface_name.as_deref(), Some("Converter"));
        assert_eq!(raw[0].package_name, "app");
        assert_eq!(raw[0].converter.location.to_string(), "convert.go:3");
        assert!(raw[1].interface_name.is_none());
    }

    #[test]
    fn test_load_invalid_manifest() {
        let (_dir, path) = setup_test_dir("{ not json");
        assert!(matches!(Manifest::load(&path), Err(ConfigError::InvalidManifest { .. })));
    }

    #[test]
    fn test_declaration_with_unknown_package() {
        let manifest = Manifest::parse(
            r#"{ "declarations": [{ "package": "missing", "file": "a.go" }] }"#,
            Path::new("m.json"),
        )
        .unwrap();
        assert!(matches!(
            manifest.raw_converters(Path::new("m.json")),
            Err(ConfigError::InvalidManifest { .. })
        ));
    }

    #[test]
    fn test_resolve_type() {
        let manifest = Manifest::parse(MANIFEST, Path::new("m.json")).unwrap();
        let loader = StaticLoader::from_manifest(&manifest);

        let typ = loader.resolve_type("example.com/app", "Converter").unwrap();
        assert_eq!(typ.to_string(), "example.com/app.Converter");
        assert!(matches!(
            loader.resolve_type("example.com/app", "Missing"),
            Err(LoadError::TypeNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_matching_splits_context_params() {
        let manifest = Manifest::parse(MANIFEST, Path::new("m.json")).unwrap();
        let loader = StaticLoader::from_manifest(&manifest);
        let regex = context_regex();
        let opts = MatchOptions {
            require_params: true,
            context_match: &regex,
            converter: None,
        };

        let defs = loader.resolve_matching("example.com/app", "FormatTime", &opts).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].source.len(), 1);
        assert_eq!(defs[0].context[0].name, "ctx");
        assert_eq!(defs[0].id(), "example.com/app.FormatTime");
    }

    #[test]
    fn test_resolve_pattern_skips_incompatible() {
        let manifest = Manifest::parse(MANIFEST, Path::new("m.json")).unwrap();
        let loader = StaticLoader::from_manifest(&manifest);
        let regex = context_regex();
        let opts = MatchOptions {
            require_params: true,
            context_match: &regex,
            converter: None,
        };

        let defs = loader
            .resolve_matching("other", "example.com/app:Format.*", &opts)
            .unwrap();
        let names: Vec<_> = defs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["FormatTime", "FormatDate"]);
    }

    #[test]
    fn test_resolve_exact_incompatible_fails() {
        let manifest = Manifest::parse(MANIFEST, Path::new("m.json")).unwrap();
        let loader = StaticLoader::from_manifest(&manifest);
        let regex = context_regex();
        let opts = MatchOptions {
            require_params: true,
            context_match: &regex,
            converter: None,
        };

        assert!(matches!(
            loader.resolve_matching("example.com/app", "FormatNothing", &opts),
            Err(LoadError::Incompatible { .. })
        ));
        assert!(matches!(
            loader.resolve_matching("example.com/app", "NoResult", &opts),
            Err(LoadError::Incompatible { .. })
        ));
        assert!(matches!(
            loader.resolve_matching("example.com/app", "Missing", &opts),
            Err(LoadError::NoMatch { .. })
        ));
    }

    #[test]
    fn test_resolve_converter_self_param() {
        let manifest = Manifest::parse(MANIFEST, Path::new("m.json")).unwrap();
        let loader = StaticLoader::from_manifest(&manifest);
        let regex = context_regex();
        let converter = TypeHandle::new("example.com/app", "Converter");

        let with_converter = MatchOptions {
            require_params: true,
            context_match: &regex,
            converter: Some(&converter),
        };
        let defs = loader
            .resolve_matching("example.com/app", "WithConverter", &with_converter)
            .unwrap();
        assert!(defs[0].self_param);
        assert_eq!(defs[0].source.len(), 1);

        let without = MatchOptions {
            converter: None,
            ..with_converter
        };
        let defs = loader
            .resolve_matching("example.com/app", "WithConverter", &without)
            .unwrap();
        assert!(!defs[0].self_param);
        assert_eq!(defs[0].source.len(), 2);
    }
}
