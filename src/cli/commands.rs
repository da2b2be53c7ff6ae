//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Render plan tasks for declarative table resources.
#[derive(Parser, Debug)]
#[command(name = "schemahero-plan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the planner settings file.
    #[arg(short, long, global = true, env = "SCHEMAHERO_PLAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the plan task and its table document.
    Render {
        /// Descriptor files.
        #[command(flatten)]
        descriptors: DescriptorArgs,

        /// Render even if descriptor validation fails.
        #[arg(long)]
        skip_validation: bool,
    },

    /// Validate a database and table pair.
    Validate {
        /// Descriptor files.
        #[command(flatten)]
        descriptors: DescriptorArgs,

        /// Show all warnings, not just errors.
        #[arg(short, long)]
        warnings: bool,
    },
}

/// Paths to the descriptor manifests.
#[derive(Args, Debug)]
pub struct DescriptorArgs {
    /// Path to the `Database` manifest.
    #[arg(long)]
    pub database: PathBuf,

    /// Path to the `Table` manifest.
    #[arg(long)]
    pub table: PathBuf,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "schemahero-plan",
            "render",
            "--database",
            "db.yaml",
            "--table",
            "table.yaml",
            "--output",
            "json",
        ])
        .unwrap();

        assert!(matches!(cli.output, OutputFormat::Json));
        match cli.command {
            Commands::Render {
                descriptors,
                skip_validation,
            } => {
                assert_eq!(descriptors.database, PathBuf::from("db.yaml"));
                assert_eq!(descriptors.table, PathBuf::from("table.yaml"));
                assert!(!skip_validation);
            }
            Commands::Validate { .. } => panic!("expected render"),
        }
    }

    #[test]
    fn test_missing_table_argument() {
        let result = Cli::try_parse_from(["schemahero-plan", "validate", "--database", "db.yaml"]);
        assert!(result.is_err());
    }
}
