//! Declarative resource descriptors.
//!
//! These types map to the `Database` and `Table` manifests as they are stored
//! by the cluster. They keep the wire shape (optional engine slots, optional
//! `value`/`valueFrom` pairs); the planner resolves them into tagged variants
//! before building anything.

mod database;
mod table;

pub use database::{
    Database, DatabaseConnection, DatabaseSpec, Engine, UriConnection, ValueFrom,
    ValueOrValueFrom, VaultSecret,
};
pub use table::{
    CassandraClusteringOrder, CassandraColumn, CassandraTableSchema, ForeignKeyReference,
    SchemaBody, SchemaEngine, SqlTableColumn, SqlTableColumnAttributes, SqlTableColumnConstraints,
    SqlTableForeignKey, SqlTableIndex, SqlTableSchema, Table, TableSchema, TableSpec,
};

use serde::{Deserialize, Serialize};

/// Object metadata shared by all resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Resource name.
    #[serde(default)]
    pub name: String,
    /// Namespace the resource lives in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ObjectMeta {
    /// Creates metadata with only a name set.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) const fn is_false(value: &bool) -> bool {
    !*value
}
