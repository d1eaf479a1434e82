//! Planner configuration.

use crate::converter::Common;

/// Defaults applied to every converter before any directive runs.
///
/// Borrowed immutably by every build.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Output file for interface declarations.
    pub output_file: String,

    /// Output package name for interface declarations.
    pub output_package_name: String,

    /// Common settings every converter starts from.
    pub common: Common,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            output_file: "./generated/generated.go".to_string(),
            output_package_name: "generated".to_string(),
            common: Common::default(),
        }
    }
}
