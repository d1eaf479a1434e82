//! # convgen
//!
//! Configuration front end of a conversion code generator. Converter
//! declarations carry line oriented directives; this crate folds them into a
//! validated plan that code synthesis consumes.
//!
//! ## Architecture
//!
//! ```text
//! Declaration (interface or variables)
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Defaults   │  Chosen by declaration kind
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Directives  │  Global lines, then local lines
//! │ (interpret)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Loader    │  Resolves interface types and extend functions
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │     Plan     │  Converters grouped by output package
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use convgen::{Planner, PlannerConfig, StaticLoader};
//!
//! let planner = Planner::new(PlannerConfig::default(), Box::new(loader));
//! let plan = planner.plan(&global, &declarations)?;
//! ```

pub mod config;
pub mod converter;
pub mod diagnostic;
pub mod directive;
pub mod loader;
pub mod plan;

pub use config::PlannerConfig;
pub use converter::{Converter, ConverterConfig, Format};
pub use diagnostic::{ConfigError, ErrorKind, Location};
pub use directive::{RawConverter, RawLines};
pub use loader::{Loader, Manifest, StaticLoader};
pub use plan::GenerationPlan;

/// Builds converters for a set of declarations.
pub struct Planner {
    config: PlannerConfig,
    loader: Box<dyn Loader>,
}

impl Planner {
    /// Creates a new planner with the given configuration and loader.
    pub fn new(config: PlannerConfig, loader: Box<dyn Loader>) -> Self {
        Self { config, loader }
    }

    /// Builds a single converter.
    ///
    /// Builds share nothing mutable, so separate declarations may be built
    /// from different threads.
    pub fn build(&self, raw: &RawConverter, global: &RawLines) -> Result<Converter, ConfigError> {
        converter::parse_converter(self.loader.as_ref(), &self.config, raw, global)
    }

    /// Builds every declaration and groups the results.
    ///
    /// The first failing declaration aborts the run.
    pub fn plan(&self, global: &RawLines, declarations: &[RawConverter]) -> Result<GenerationPlan, ConfigError> {
        let converters = declarations
            .iter()
            .map(|raw| self.build(raw, global))
            .collect::<Result<Vec<_>, _>>()?;

        let plan = GenerationPlan::from_converters(converters)?;
        tracing::info!(
            converters = plan.converter_count(),
            packages = plan.packages.len(),
            "generation plan built"
        );
        Ok(plan)
    }
}
