//! Converters grouped by output package.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::converter::{Converter, Format};
use crate::diagnostic::ConfigError;

/// Every converter of a run, keyed by package identity.
#[derive(Debug, Serialize)]
pub struct GenerationPlan {
    pub packages: BTreeMap<String, Vec<Converter>>,
}

impl GenerationPlan {
    /// Groups converters by [`Converter::target_package_id`], keeping
    /// declaration order inside each package.
    ///
    /// Two struct converters with the same name in one package are rejected.
    pub fn from_converters(converters: Vec<Converter>) -> Result<Self, ConfigError> {
        let mut packages: BTreeMap<String, Vec<Converter>> = BTreeMap::new();
        let mut names: HashSet<(String, String)> = HashSet::new();

        for converter in converters {
            let package = converter.target_package_id();
            if converter.config.output_format == Format::Struct
                && !names.insert((package.clone(), converter.config.name.clone()))
            {
                return Err(ConfigError::DuplicateConverter {
                    package,
                    name: converter.config.name.clone(),
                });
            }
            packages.entry(package).or_default().push(converter);
        }

        Ok(Self { packages })
    }

    pub fn get(&self, package_id: &str) -> Option<&[Converter]> {
        self.packages.get(package_id).map(Vec::as_slice)
    }

    pub fn converter_count(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }
}
