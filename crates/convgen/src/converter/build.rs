//! Building a converter from its declaration and directive scopes.

use crate::config::PlannerConfig;
use crate::converter::{apply_line, Converter, ConverterConfig};
use crate::diagnostic::ConfigError;
use crate::directive::{RawConverter, RawLines};
use crate::loader::Loader;

/// Scope label for lines shared by every declaration.
pub const GLOBAL_SCOPE: &str = "global";

/// Builds a converter: defaults, then global lines, then the declaration's
/// own lines.
pub fn parse_converter(
    loader: &dyn Loader,
    config: &PlannerConfig,
    raw: &RawConverter,
    global: &RawLines,
) -> Result<Converter, ConfigError> {
    let mut c = init_converter(loader, config, raw)?;

    parse_lines(loader, &mut c, GLOBAL_SCOPE, global)?;
    let scope = c.id_string();
    parse_lines(loader, &mut c, &scope, &raw.converter)?;

    Ok(c)
}

/// Creates a converter with the defaults for its declaration kind.
pub fn init_converter(loader: &dyn Loader, config: &PlannerConfig, raw: &RawConverter) -> Result<Converter, ConfigError> {
    let location = raw.converter.location.clone();

    let Some(interface) = &raw.interface_name else {
        let conf = ConverterConfig::variable_defaults(config, &raw.file_name, &raw.package_path, &raw.package_name);
        return Ok(Converter::new(conf, &raw.package_path, &raw.file_name, location, None));
    };

    let typ = loader.resolve_type(&raw.package_path, interface)?;
    let mut conf = ConverterConfig::interface_defaults(config);
    conf.name = format!("{}Impl", interface);
    Ok(Converter::new(conf, &raw.package_path, &raw.file_name, location, Some(typ)))
}

/// Applies every line of one scope, stopping at the first error.
pub fn parse_lines(loader: &dyn Loader, c: &mut Converter, scope: &str, raw: &RawLines) -> Result<(), ConfigError> {
    for value in &raw.lines {
        tracing::debug!(scope, line = %value, "applying directive");
        apply_line(loader, c, value).map_err(|e| e.in_line(value, &raw.location, scope))?;
    }
    Ok(())
}
