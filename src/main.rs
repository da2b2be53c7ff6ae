//! `schemahero-plan` CLI entrypoint.
//!
//! Loads a `Database` and `Table` manifest, renders the plan task and its
//! table document, and prints them.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use schemahero_plan::cli::{Cli, Commands, DescriptorArgs, OutputFormatter};
use schemahero_plan::config::{ConfigParser, DescriptorValidator, PlannerConfig, find_settings_file};
use schemahero_plan::error::Result;
use schemahero_plan::planner::{TaskSpecBuilder, render_config_artifact};
use schemahero_plan::resources::{Database, Table};

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatches the selected command.
fn run(cli: Cli) -> Result<ExitCode> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Render {
            descriptors,
            skip_validation,
        } => cmd_render(cli.config.as_deref(), &descriptors, skip_validation, &formatter),
        Commands::Validate {
            descriptors,
            warnings,
        } => cmd_validate(&descriptors, warnings, &formatter),
    }
}

/// Render the plan task and table document.
fn cmd_render(
    config_path: Option<&Path>,
    descriptors: &DescriptorArgs,
    skip_validation: bool,
    formatter: &OutputFormatter,
) -> Result<ExitCode> {
    let settings = load_settings(config_path)?;
    let (database, table) = load_descriptors(descriptors)?;

    if skip_validation {
        warn!("Skipping descriptor validation");
    } else {
        let result = DescriptorValidator::new().validate(&database, &table)?;
        for warning in &result.warnings {
            warn!("{warning}");
        }
    }

    info!(
        "Rendering plan task for table {} on database {}",
        table.metadata.name,
        database.name()
    );

    let builder = TaskSpecBuilder::new(settings);
    let task = builder.build(&database, &table)?;
    let artifact = render_config_artifact(&database, &table)?;

    println!("{}", formatter.format_render(&task, &artifact));

    Ok(ExitCode::SUCCESS)
}

/// Validate a descriptor pair.
fn cmd_validate(
    descriptors: &DescriptorArgs,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<ExitCode> {
    let (database, table) = load_descriptors(descriptors)?;
    let result = DescriptorValidator::new().collect(&database, &table);

    println!("{}", formatter.format_validation(&result, show_warnings));

    Ok(if result.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Loads planner settings from the given path, or the nearest settings file.
fn load_settings(config_path: Option<&Path>) -> Result<PlannerConfig> {
    let discovered: Option<PathBuf> = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_settings_file(std::env::current_dir()?),
    };

    let env_dir = discovered
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    ConfigParser::new().with_base_path(env_dir).load_dotenv()?;

    let settings = ConfigParser::new().load_settings_with_env(discovered.as_deref())?;
    debug!("Using plan image: {}", settings.image);
    Ok(settings)
}

/// Loads the database and table manifests.
fn load_descriptors(descriptors: &DescriptorArgs) -> Result<(Database, Table)> {
    let parser = ConfigParser::new();
    let database = parser.load_database(&descriptors.database)?;
    let table = parser.load_table(&descriptors.table)?;
    Ok((database, table))
}
