//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! rendered plan tasks to the user in various formats.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::config::ValidationResult;
use crate::planner::{ConfigArtifact, PlanTask};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Argument row for table display.
#[derive(Tabled)]
struct ArgRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Argument")]
    value: String,
}

/// Annotation row for table display.
#[derive(Tabled)]
struct AnnotationRow {
    #[tabled(rename = "Annotation")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// JSON shape of a render.
#[derive(Serialize)]
struct RenderJson<'a> {
    task: &'a PlanTask,
    artifact: &'a ConfigArtifact,
}

/// JSON shape of a validation.
#[derive(Serialize)]
struct ValidationJson<'a> {
    valid: bool,
    errors: Vec<String>,
    warnings: &'a [String],
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a rendered task and its artifact for display.
    #[must_use]
    pub fn format_render(&self, task: &PlanTask, artifact: &ConfigArtifact) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&RenderJson { task, artifact }).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_render_text(task, artifact),
        }
    }

    /// Formats a render as text.
    fn format_render_text(task: &PlanTask, artifact: &ConfigArtifact) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "\n{} {}", "Plan task".bold(), task.name.cyan());
        let _ = writeln!(output, "   Image: {} ({})", task.image, task.image_pull_policy);
        let _ = writeln!(
            output,
            "   Spec:  {} mounted at {}",
            task.config_artifact, task.mount_path
        );
        if let Some(account) = &task.service_account {
            let _ = writeln!(output, "   Service account: {account}");
        }
        output.push('\n');

        let rows: Vec<ArgRow> = task
            .args
            .iter()
            .enumerate()
            .map(|(i, arg)| ArgRow {
                index: i + 1,
                value: arg.clone(),
            })
            .collect();
        output.push_str(&Table::new(rows).to_string());
        output.push('\n');

        match &task.annotations {
            Some(annotations) => {
                let _ = writeln!(output, "\n{} Credentials injected by Vault", "🔐".yellow());
                let rows: Vec<AnnotationRow> = annotations
                    .iter()
                    .map(|(key, value)| AnnotationRow {
                        key: key.clone(),
                        value: value.trim().to_string(),
                    })
                    .collect();
                output.push_str(&Table::new(rows).to_string());
                output.push('\n');
            }
            None => {
                let _ = writeln!(output, "\n{} Inline connection URI, no annotations", "•".dimmed());
            }
        }

        if let Some(document) = artifact.document() {
            let _ = writeln!(output, "\n{} {}", "Table document".bold(), artifact.name.cyan());
            for line in document.lines() {
                let _ = writeln!(output, "   {line}");
            }
        }

        output
    }

    /// Formats a validation result for display.
    #[must_use]
    pub fn format_validation(&self, result: &ValidationResult, show_warnings: bool) -> String {
        match self.format {
            OutputFormat::Json => {
                let json = ValidationJson {
                    valid: result.is_valid(),
                    errors: result.errors.iter().map(ToString::to_string).collect(),
                    warnings: if show_warnings { result.warnings.as_slice() } else { &[] },
                };
                serde_json::to_string_pretty(&json).unwrap_or_default()
            }
            OutputFormat::Text => Self::format_validation_text(result, show_warnings),
        }
    }

    /// Formats a validation result as text.
    fn format_validation_text(result: &ValidationResult, show_warnings: bool) -> String {
        let mut output = String::new();

        if result.is_valid() {
            let _ = writeln!(output, "{} Descriptors are valid", "✓".green());
        } else {
            let _ = writeln!(
                output,
                "{} {} validation error(s):",
                "✗".red(),
                result.error_count()
            );
            for error in &result.errors {
                let _ = writeln!(output, "   - {error}");
            }
        }

        if show_warnings && result.warning_count() > 0 {
            let _ = writeln!(output, "\n{} Warnings:", "⚠".yellow());
            for warning in &result.warnings {
                let _ = writeln!(output, "   - {warning}");
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlannerConfig, ValidationError};
    use crate::planner::{TaskSpecBuilder, render_config_artifact};
    use crate::resources::{
        Database, DatabaseConnection, ObjectMeta, SqlTableSchema, Table, TableSchema, TableSpec,
        UriConnection, ValueOrValueFrom,
    };

    fn render() -> (PlanTask, ConfigArtifact) {
        let mut database = Database {
            metadata: ObjectMeta::named("db"),
            ..Database::default()
        };
        database.spec.connection = DatabaseConnection {
            postgres: Some(UriConnection {
                uri: ValueOrValueFrom {
                    value: Some(String::from("postgres://u:p@postgres:5432/db")),
                    value_from: None,
                },
            }),
            ..DatabaseConnection::default()
        };
        let table = Table {
            metadata: ObjectMeta::named("users"),
            spec: TableSpec {
                database: String::from("db"),
                name: String::from("users"),
                schema: TableSchema {
                    postgres: Some(SqlTableSchema::default()),
                    ..TableSchema::default()
                },
            },
            ..Table::default()
        };

        let task = TaskSpecBuilder::new(PlannerConfig::default())
            .build(&database, &table)
            .unwrap();
        let artifact = render_config_artifact(&database, &table).unwrap();
        (task, artifact)
    }

    #[test]
    fn test_render_json() {
        let (task, artifact) = render();
        let output = OutputFormatter::new(OutputFormat::Json).format_render(&task, &artifact);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["task"]["args"][0], "plan");
        assert!(value["task"]["annotations"].is_null());
        assert_eq!(
            value["artifact"]["data"]["table.yaml"],
            "database: db\nname: users\nschema:\n  postgres: {}\n"
        );
    }

    #[test]
    fn test_render_text_lists_arguments() {
        let (task, artifact) = render();
        let output = OutputFormatter::new(OutputFormat::Text).format_render(&task, &artifact);
        assert!(output.contains("--spec-file"));
        assert!(output.contains("/specs/table.yaml"));
        assert!(output.contains("name: users"));
    }

    #[test]
    fn test_validation_json_hides_warnings() {
        let result = ValidationResult {
            errors: vec![ValidationError {
                field: String::from("table.spec.name"),
                message: String::from("Table name cannot be empty"),
            }],
            warnings: vec![String::from("w")],
        };
        let output = OutputFormatter::new(OutputFormat::Json).format_validation(&result, false);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["errors"][0], "table.spec.name: Table name cannot be empty");
        assert_eq!(value["warnings"].as_array().map(Vec::len), Some(0));
    }
}
