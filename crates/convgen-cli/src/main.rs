//! convgen CLI.
//!
//! Reads a manifest of packages and converter declarations, builds every
//! converter and prints the resulting generation plan.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use convgen::{ConfigError, GenerationPlan, Location, Manifest, Planner, PlannerConfig, RawConverter, RawLines, StaticLoader};

mod logging;
mod ui;

#[derive(Parser)]
#[command(name = "convgen")]
#[command(about = "convgen - validate converter directives and build the generation plan")]
struct Cli {
    /// Log every applied directive
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the generation plan and print it as JSON
    Plan {
        /// Manifest describing packages and declarations
        manifest: PathBuf,

        /// Extra global directive, applied after the manifest's own
        #[arg(short = 'g', long = "global")]
        global: Vec<String>,

        /// Write the plan to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate directives without printing the plan
    Check {
        /// Manifest describing packages and declarations
        manifest: PathBuf,

        /// Extra global directive, applied after the manifest's own
        #[arg(short = 'g', long = "global")]
        global: Vec<String>,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match cli.command {
        Commands::Plan {
            manifest,
            global,
            output,
        } => {
            let plan = build_plan(&manifest, &global)?;
            let json = serde_json::to_string_pretty(&plan).map_err(|e| ConfigError::SerializeFailed { message: e.to_string() })?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json).map_err(|e| ConfigError::WriteFailed {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                    ui::print_compact_header(env!("CARGO_PKG_VERSION"));
                    ui::print_plan(&plan);
                    ui::success(&format!("Plan written to {}", path.display()));
                }
                None => println!("{}", json),
            }
        }

        Commands::Check { manifest, global } => {
            let plan = build_plan(&manifest, &global)?;
            ui::print_compact_header(env!("CARGO_PKG_VERSION"));
            ui::print_plan(&plan);
            ui::success(&format!(
                "{} converters in {} packages are valid",
                plan.converter_count(),
                plan.packages.len()
            ));
        }
    }

    Ok(())
}

fn build_plan(manifest_path: &Path, extra_global: &[String]) -> Result<GenerationPlan, ConfigError> {
    let manifest = Manifest::load(manifest_path)?;
    let (global, declarations) = load_inputs(&manifest, manifest_path, extra_global)?;

    let planner = Planner::new(PlannerConfig::default(), Box::new(StaticLoader::from_manifest(&manifest)));
    planner.plan(&global, &declarations)
}

/// Collects the global scope (manifest lines, then command line lines) and
/// the declarations.
fn load_inputs(
    manifest: &Manifest,
    manifest_path: &Path,
    extra_global: &[String],
) -> Result<(RawLines, Vec<RawConverter>), ConfigError> {
    let mut global = manifest.global_lines(manifest_path);
    if !extra_global.is_empty() {
        global.location = if global.is_empty() {
            Location::origin("<command line>")
        } else {
            Location::origin(format!("{} and <command line>", manifest_path.display()))
        };
        global.lines.extend(extra_global.iter().cloned());
    }

    let declarations = manifest.raw_converters(manifest_path)?;
    Ok((global, declarations))
}
