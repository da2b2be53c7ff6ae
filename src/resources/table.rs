//! `Table` resource descriptor and the engine-specific schema bodies.

use serde::{Deserialize, Serialize};

use super::{Engine, ObjectMeta, is_false};

/// A desired table and the database it belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// API version of the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Kind of the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Table specification.
    #[serde(default)]
    pub spec: TableSpec,
}

/// Table specification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSpec {
    /// Name of the owning `Database` resource.
    #[serde(default)]
    pub database: String,
    /// Table name in the target database.
    #[serde(default)]
    pub name: String,
    /// Engine-specific schema body.
    #[serde(default)]
    pub schema: TableSchema,
}

/// Engine slots for a table schema. Only one is expected to be populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSchema {
    /// `PostgreSQL` schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres: Option<SqlTableSchema>,
    /// `MySQL` schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mysql: Option<SqlTableSchema>,
    /// `CockroachDB` schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cockroachdb: Option<SqlTableSchema>,
    /// Cassandra schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cassandra: Option<CassandraTableSchema>,
    /// `TimescaleDB` schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timescaledb: Option<SqlTableSchema>,
    /// `SQLite` schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqlite: Option<SqlTableSchema>,
    /// rqlite schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rqlite: Option<SqlTableSchema>,
}

/// Schema body shared by the SQL engines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SqlTableSchema {
    /// Primary key columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_key: Vec<String>,
    /// Foreign keys.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<SqlTableForeignKey>,
    /// Indexes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<SqlTableIndex>,
    /// Columns, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<SqlTableColumn>,
    /// Whether the table should be dropped.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_deleted: bool,
}

/// A single SQL column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SqlTableColumn {
    /// Column name.
    pub name: String,
    /// Column type, as written in the target dialect.
    #[serde(rename = "type")]
    pub column_type: String,
    /// Column constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<SqlTableColumnConstraints>,
    /// Column attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<SqlTableColumnAttributes>,
    /// Default value expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Column constraints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SqlTableColumnConstraints {
    /// `NOT NULL` when true, nullable when false, engine default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_null: Option<bool>,
}

/// Column attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SqlTableColumnAttributes {
    /// Auto-increment the column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<bool>,
}

/// A foreign key constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SqlTableForeignKey {
    /// Local columns.
    pub columns: Vec<String>,
    /// Referenced table and columns.
    pub references: ForeignKeyReference,
    /// `ON DELETE` action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    /// Constraint name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Target of a foreign key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForeignKeyReference {
    /// Referenced table.
    pub table: String,
    /// Referenced columns.
    pub columns: Vec<String>,
}

/// A table index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SqlTableIndex {
    /// Indexed columns.
    pub columns: Vec<String>,
    /// Index name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unique index.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_unique: bool,
    /// Index method.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub index_type: Option<String>,
}

/// Cassandra schema body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CassandraTableSchema {
    /// Partition key groups followed by clustering columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_key: Vec<Vec<String>>,
    /// Clustering order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clustering_order: Option<CassandraClusteringOrder>,
    /// Columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<CassandraColumn>,
    /// Whether the table should be dropped.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_deleted: bool,
}

/// Cassandra clustering order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CassandraClusteringOrder {
    /// Clustering column.
    pub column: String,
    /// Descending order.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_descending: bool,
}

/// A Cassandra column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CassandraColumn {
    /// Column name.
    pub name: String,
    /// CQL type.
    #[serde(rename = "type")]
    pub column_type: String,
    /// Static column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
}

/// Engine slot of a table schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaEngine {
    /// `PostgreSQL`.
    Postgres,
    /// `MySQL`.
    Mysql,
    /// `CockroachDB`.
    Cockroachdb,
    /// Cassandra.
    Cassandra,
    /// `TimescaleDB`.
    Timescaledb,
    /// `SQLite`.
    Sqlite,
    /// rqlite.
    Rqlite,
}

impl SchemaEngine {
    /// All schema slots, in slot order.
    pub const ALL: [Self; 7] = [
        Self::Postgres,
        Self::Mysql,
        Self::Cockroachdb,
        Self::Cassandra,
        Self::Timescaledb,
        Self::Sqlite,
        Self::Rqlite,
    ];

    /// Slot key as it appears in the manifest.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Cockroachdb => "cockroachdb",
            Self::Cassandra => "cassandra",
            Self::Timescaledb => "timescaledb",
            Self::Sqlite => "sqlite",
            Self::Rqlite => "rqlite",
        }
    }

    /// Connection engine serving this slot, if the planner can connect to it.
    #[must_use]
    pub const fn connection_engine(self) -> Option<Engine> {
        match self {
            Self::Postgres => Some(Engine::Postgres),
            Self::Mysql => Some(Engine::Mysql),
            Self::Cockroachdb => Some(Engine::Cockroachdb),
            Self::Timescaledb => Some(Engine::Timescaledb),
            Self::Cassandra | Self::Sqlite | Self::Rqlite => None,
        }
    }
}

impl std::fmt::Display for SchemaEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed schema body of a populated slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaBody<'a> {
    /// Body of a SQL engine slot.
    Sql(&'a SqlTableSchema),
    /// Body of the Cassandra slot.
    Cassandra(&'a CassandraTableSchema),
}

impl TableSchema {
    /// Populated engine slots, in slot order.
    #[must_use]
    pub fn populated_engines(&self) -> Vec<SchemaEngine> {
        SchemaEngine::ALL
            .into_iter()
            .filter(|engine| self.body(*engine).is_some())
            .collect()
    }

    /// Returns the schema body of a slot, if populated.
    #[must_use]
    pub const fn body(&self, engine: SchemaEngine) -> Option<SchemaBody<'_>> {
        let sql = match engine {
            SchemaEngine::Cassandra => {
                return match &self.cassandra {
                    Some(body) => Some(SchemaBody::Cassandra(body)),
                    None => None,
                };
            }
            SchemaEngine::Postgres => &self.postgres,
            SchemaEngine::Mysql => &self.mysql,
            SchemaEngine::Cockroachdb => &self.cockroachdb,
            SchemaEngine::Timescaledb => &self.timescaledb,
            SchemaEngine::Sqlite => &self.sqlite,
            SchemaEngine::Rqlite => &self.rqlite,
        };

        match sql {
            Some(body) => Some(SchemaBody::Sql(body)),
            None => None,
        }
    }
}

impl SqlTableColumn {
    /// Creates a column with a name and type.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            ..Self::default()
        }
    }

    /// Sets the not-null constraint.
    #[must_use]
    pub fn with_not_null(mut self, not_null: bool) -> Self {
        self.constraints = Some(SqlTableColumnConstraints {
            not_null: Some(not_null),
        });
        self
    }
}
