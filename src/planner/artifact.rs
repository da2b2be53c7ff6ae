//! Rendering of the table document mounted into the plan task.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ArtifactHasher;
use crate::error::TaskError;
use crate::resources::{Database, Table, TableSchema};

/// Key of the table document inside the configuration artifact.
pub const ARTIFACT_KEY: &str = "table.yaml";

/// Directory the configuration artifact is mounted at.
pub const SPEC_MOUNT_DIR: &str = "/specs";

/// Path of the table document inside the task.
pub const SPEC_FILE_PATH: &str = "/specs/table.yaml";

/// Label carrying the short hash of the rendered document.
pub const SPEC_HASH_LABEL: &str = "schemahero.io/spec-hash";

/// The document handed to the plan task. Field order is part of the format.
#[derive(Serialize)]
struct TableDocument<'a> {
    database: &'a str,
    name: &'a str,
    schema: &'a TableSchema,
}

/// Configuration artifact holding the rendered table document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigArtifact {
    /// Name of the artifact.
    pub name: String,
    /// Labels identifying the artifact.
    pub labels: BTreeMap<String, String>,
    /// File name to contents.
    pub data: BTreeMap<String, String>,
}

/// Renders the table document.
///
/// The output always lists `database`, `name` and `schema` in that order;
/// unset engine slots are omitted.
///
/// # Errors
///
/// Returns [`TaskError::Serialization`] if the YAML encoder fails.
pub fn render_table_document(table: &Table) -> Result<String, TaskError> {
    let document = TableDocument {
        database: &table.spec.database,
        name: &table.spec.name,
        schema: &table.spec.schema,
    };

    serde_yaml::to_string(&document).map_err(|e| TaskError::serialization(e.to_string()))
}

/// Renders the configuration artifact for a table.
///
/// # Errors
///
/// Returns [`TaskError::Serialization`] if the YAML encoder fails.
pub fn render_config_artifact(database: &Database, table: &Table) -> Result<ConfigArtifact, TaskError> {
    let document = render_table_document(table)?;

    let hasher = ArtifactHasher::new();
    let hash = hasher.hash_document(&document);

    let labels = BTreeMap::from([
        (String::from("schemahero-database"), database.name().to_string()),
        (String::from("schemahero-name"), table.metadata.name.clone()),
        (String::from("schemahero-role"), String::from("plan")),
        (String::from(SPEC_HASH_LABEL), hasher.short_hash(&hash)),
    ]);

    Ok(ConfigArtifact {
        name: artifact_name(table),
        labels,
        data: BTreeMap::from([(String::from(ARTIFACT_KEY), document)]),
    })
}

/// Name of the configuration artifact for a table.
#[must_use]
pub fn artifact_name(table: &Table) -> String {
    format!("{}-plan-spec", table.metadata.name)
}

impl ConfigArtifact {
    /// Returns the rendered table document.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.data.get(ARTIFACT_KEY).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{ObjectMeta, SqlTableColumn, SqlTableSchema, TableSpec};

    fn table(database: &str, name: &str, schema: TableSchema) -> Table {
        Table {
            metadata: ObjectMeta::named(name),
            spec: TableSpec {
                database: database.to_string(),
                name: name.to_string(),
                schema,
            },
            ..Table::default()
        }
    }

    fn postgres(schema: SqlTableSchema) -> TableSchema {
        TableSchema {
            postgres: Some(schema),
            ..TableSchema::default()
        }
    }

    fn users_schema() -> SqlTableSchema {
        SqlTableSchema {
            primary_key: vec![String::from("id")],
            columns: vec![
                SqlTableColumn::new("id", "text").with_not_null(false),
                SqlTableColumn::new("name", "text").with_not_null(false),
            ],
            ..SqlTableSchema::default()
        }
    }

    #[test]
    fn test_basic_document() {
        let artifact = render_config_artifact(
            &Database::default(),
            &table("db", "name", postgres(SqlTableSchema::default())),
        )
        .unwrap();

        assert_eq!(
            artifact.data["table.yaml"],
            "database: db\nname: name\nschema:\n  postgres: {}\n"
        );
    }

    #[test]
    fn test_document_is_deterministic() {
        let t = table("my-database", "users", postgres(users_schema()));
        let first = render_table_document(&t).unwrap();
        let second = render_table_document(&t.clone()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_field_order() {
        let t = table("my-database", "users", postgres(users_schema()));
        let doc = render_table_document(&t).unwrap();

        let database = doc.find("database:").unwrap();
        let name = doc.find("\nname:").unwrap();
        let schema = doc.find("\nschema:").unwrap();
        assert!(database < name && name < schema);
        assert!(doc.starts_with("database: my-database\nname: users\nschema:\n  postgres:\n"));
    }

    #[test]
    fn test_schema_body_round_trip() {
        let t = table("my-database", "users", postgres(users_schema()));
        let doc = render_table_document(&t).unwrap();

        let parsed: serde_yaml::Value = serde_yaml::from_str(&doc).unwrap();
        let schema: TableSchema = serde_yaml::from_value(parsed["schema"].clone()).unwrap();
        assert_eq!(schema, t.spec.schema);

        let pg = schema.postgres.unwrap();
        assert_eq!(pg.primary_key, vec!["id"]);
        assert_eq!(pg.columns[1].name, "name");
        assert_eq!(pg.columns[1].column_type, "text");
        assert_eq!(pg.columns[1].constraints.as_ref().unwrap().not_null, Some(false));
    }

    #[test]
    fn test_unset_slots_omitted() {
        let t = table("db", "name", postgres(SqlTableSchema::default()));
        let doc = render_table_document(&t).unwrap();
        assert!(!doc.contains("mysql"));
        assert!(!doc.contains("null"));
    }

    #[test]
    fn test_artifact_metadata() {
        let mut db = Database::default();
        db.metadata.name = String::from("my-database");
        let artifact = render_config_artifact(&db, &table("my-database", "users", postgres(users_schema()))).unwrap();

        assert_eq!(artifact.name, "users-plan-spec");
        assert_eq!(artifact.labels["schemahero-database"], "my-database");
        assert_eq!(artifact.labels[SPEC_HASH_LABEL].len(), 8);
        assert!(artifact.document().is_some());
        assert_eq!(format!("{SPEC_MOUNT_DIR}/{ARTIFACT_KEY}"), SPEC_FILE_PATH);
    }
}
