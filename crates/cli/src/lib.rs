mod check;
mod generate;

use clap::{Args, Parser, Subcommand, ValueEnum};
use prebuilt_apis_core::error::ConfigError;
use prebuilt_apis_core::{BuildDescription, PrebuiltApisConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "prebuilt-apis",
    version,
    about = "Generate build declarations for prebuilt SDK stub jars and API files",
    long_about = "Scans a prebuilt API directory laid out as <version>/<scope>/<module>.jar and \
                  <version>/<scope>/api/<module>.txt and generates one import per stub jar, one \
                  file group per API file, and a <module>.api.<scope>.latest alias per module and scope."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Mirror logs to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate declarations and print them
    Generate {
        #[command(flatten)]
        target: Target,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Generate declarations and fail if any problem is reported
    Check {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Args, Debug)]
pub struct Target {
    /// prebuilt_apis directory, relative to --root. Defaults to the root itself.
    #[arg(value_name = "DIR")]
    pub dir: Option<String>,

    /// Root that module directories and generated paths are relative to
    #[arg(long, value_name = "ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Name diagnostics are attributed to
    #[arg(long, default_value = "prebuilt_apis")]
    pub name: String,

    /// JSON build description listing several prebuilt_apis modules
    #[arg(long, value_name = "FILE", conflicts_with = "dir")]
    pub config: Option<PathBuf>,
}

impl Target {
    pub fn description(&self) -> Result<BuildDescription, ConfigError> {
        match &self.config {
            Some(path) => BuildDescription::load(path),
            None => Ok(BuildDescription::single(PrebuiltApisConfig::new(
                self.name.clone(),
                self.dir.clone().unwrap_or_default(),
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = prebuilt_apis_core::logging::init_logging("cli", cli.verbose);

    match cli.command {
        Commands::Generate { target, format } => generate::run(target, format),
        Commands::Check { target } => check::run(target),
    }
}
