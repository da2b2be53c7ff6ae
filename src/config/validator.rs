//! Validation of `Database` and `Table` descriptors.
//!
//! Collects every problem in one pass so the caller can report them all on
//! the owning resource's status instead of one per reconciliation.

use crate::error::{ConfigError, Result, SchemaHeroError};
use crate::resources::{CassandraTableSchema, Database, SchemaBody, SqlTableSchema, Table};
use std::collections::HashSet;
use tracing::debug;

/// Validator for descriptor pairs.
#[derive(Debug, Default)]
pub struct DescriptorValidator;

/// Validation result containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl DescriptorValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a database and table pair.
    ///
    /// Connection strategy checks are left to the planner, which rejects
    /// ambiguous connections with its own error kind.
    ///
    /// # Errors
    ///
    /// Returns the first validation error if any were found.
    pub fn validate(&self, database: &Database, table: &Table) -> Result<ValidationResult> {
        let result = self.collect(database, table);

        if result.errors.is_empty() {
            debug!("Descriptor validation passed");
            Ok(result)
        } else {
            let first_error = &result.errors[0];
            Err(SchemaHeroError::Config(ConfigError::ValidationError {
                message: first_error.message.clone(),
                field: Some(first_error.field.clone()),
            }))
        }
    }

    /// Validates a database and table pair, returning every finding.
    #[must_use]
    pub fn collect(&self, database: &Database, table: &Table) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_names(database, table, &mut result);
        Self::validate_schema(database, table, &mut result);

        result
    }

    /// Validates resource names and the table's database reference.
    fn validate_names(database: &Database, table: &Table, result: &mut ValidationResult) {
        check_name(&database.metadata.name, "database.metadata.name", result);
        check_name(&table.metadata.name, "table.metadata.name", result);

        if table.spec.name.is_empty() {
            result.errors.push(ValidationError {
                field: String::from("table.spec.name"),
                message: String::from("Table name cannot be empty"),
            });
        }

        if table.spec.database != database.metadata.name {
            result.errors.push(ValidationError {
                field: String::from("table.spec.database"),
                message: format!(
                    "Table references database '{}' but was paired with '{}'",
                    table.spec.database, database.metadata.name
                ),
            });
        }
    }

    /// Validates the table schema body.
    fn validate_schema(database: &Database, table: &Table, result: &mut ValidationResult) {
        let engines = table.spec.schema.populated_engines();

        match engines.as_slice() {
            [] => {
                result.errors.push(ValidationError {
                    field: String::from("table.spec.schema"),
                    message: String::from("Table schema does not define any engine"),
                });
                return;
            }
            [engine] => {
                let connected = database.spec.connection.populated();
                let served = engine
                    .connection_engine()
                    .is_some_and(|e| connected.iter().any(|(c, _)| *c == e));
                if !connected.is_empty() && !served {
                    let names: Vec<&str> = connected.iter().map(|(e, _)| e.driver()).collect();
                    result.warnings.push(format!(
                        "table.spec.schema: schema targets '{engine}' but database connects to '{}'",
                        names.join(", ")
                    ));
                }
            }
            many => {
                let names: Vec<&str> = many.iter().map(|e| e.name()).collect();
                result.errors.push(ValidationError {
                    field: String::from("table.spec.schema"),
                    message: format!(
                        "Table schema defines multiple engines: {}",
                        names.join(", ")
                    ),
                });
                return;
            }
        }

        if let Some(engine) = engines.first() {
            let prefix = format!("table.spec.schema.{engine}");
            match table.spec.schema.body(*engine) {
                Some(SchemaBody::Sql(sql)) => Self::validate_sql_schema(sql, &prefix, result),
                Some(SchemaBody::Cassandra(cql)) => {
                    Self::validate_cassandra_schema(cql, &prefix, result);
                }
                None => {}
            }
        }
    }

    /// Validates columns and keys of a SQL schema body.
    fn validate_sql_schema(schema: &SqlTableSchema, prefix: &str, result: &mut ValidationResult) {
        let seen_columns = check_columns(
            schema
                .columns
                .iter()
                .map(|c| (c.name.as_str(), c.column_type.as_str())),
            prefix,
            result,
        );

        for (i, key) in schema.primary_key.iter().enumerate() {
            if !seen_columns.contains(key.as_str()) {
                result.errors.push(ValidationError {
                    field: format!("{prefix}.primaryKey[{i}]"),
                    message: format!("Primary key column '{key}' is not defined"),
                });
            }
        }

        for (i, index) in schema.indexes.iter().enumerate() {
            if index.columns.is_empty() {
                result.errors.push(ValidationError {
                    field: format!("{prefix}.indexes[{i}].columns"),
                    message: String::from("Index must cover at least one column"),
                });
            }
        }

        if schema.is_deleted && !schema.columns.is_empty() {
            result.warnings.push(format!(
                "{prefix}.isDeleted: table is marked deleted, column definitions are ignored"
            ));
        }
    }

    /// Validates columns and keys of a Cassandra schema body.
    fn validate_cassandra_schema(
        schema: &CassandraTableSchema,
        prefix: &str,
        result: &mut ValidationResult,
    ) {
        let seen_columns = check_columns(
            schema
                .columns
                .iter()
                .map(|c| (c.name.as_str(), c.column_type.as_str())),
            prefix,
            result,
        );

        for (i, group) in schema.primary_key.iter().enumerate() {
            for (j, key) in group.iter().enumerate() {
                if !seen_columns.contains(key.as_str()) {
                    result.errors.push(ValidationError {
                        field: format!("{prefix}.primaryKey[{i}][{j}]"),
                        message: format!("Primary key column '{key}' is not defined"),
                    });
                }
            }
        }

        if let Some(order) = &schema.clustering_order
            && !seen_columns.contains(order.column.as_str())
        {
            result.errors.push(ValidationError {
                field: format!("{prefix}.clusteringOrder.column"),
                message: format!("Clustering column '{}' is not defined", order.column),
            });
        }

        if schema.is_deleted && !schema.columns.is_empty() {
            result.warnings.push(format!(
                "{prefix}.isDeleted: table is marked deleted, column definitions are ignored"
            ));
        }
    }
}

/// Checks column names and types, returning the set of defined names.
fn check_columns<'a>(
    columns: impl Iterator<Item = (&'a str, &'a str)>,
    prefix: &str,
    result: &mut ValidationResult,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();

    for (i, (name, column_type)) in columns.enumerate() {
        if name.is_empty() {
            result.errors.push(ValidationError {
                field: format!("{prefix}.columns[{i}].name"),
                message: String::from("Column name cannot be empty"),
            });
        } else if !seen.insert(name) {
            result.errors.push(ValidationError {
                field: format!("{prefix}.columns[{i}].name"),
                message: format!("Duplicate column name: {name}"),
            });
        }

        if column_type.is_empty() {
            result.errors.push(ValidationError {
                field: format!("{prefix}.columns[{i}].type"),
                message: format!("Column '{name}' has no type"),
            });
        }
    }

    seen
}

/// Checks a resource name against the DNS-1123 label convention.
fn check_name(name: &str, field: &str, result: &mut ValidationResult) {
    if name.is_empty() {
        result.errors.push(ValidationError {
            field: field.to_string(),
            message: String::from("Name cannot be empty"),
        });
    } else if !is_valid_name(name) {
        result.errors.push(ValidationError {
            field: field.to_string(),
            message: format!(
                "Name '{name}' is invalid. Must be lowercase alphanumeric with hyphens."
            ),
        });
    }
}

/// Names must be lowercase alphanumeric with hyphens, starting and ending
/// with an alphanumeric character, at most 63 characters.
fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 63 {
        return false;
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return false;
    }

    !name.starts_with('-') && !name.ends_with('-')
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
