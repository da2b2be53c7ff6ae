//! `Database` resource descriptor.

use serde::{Deserialize, Serialize};

use super::ObjectMeta;

/// A target database and how to connect to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    /// API version of the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Kind of the manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Database specification.
    #[serde(default)]
    pub spec: DatabaseSpec,
}

/// Database specification.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseSpec {
    /// Connection slots, one per supported engine.
    #[serde(default)]
    pub connection: DatabaseConnection,
}

/// Engine connection slots. A well-formed descriptor populates exactly one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConnection {
    /// `PostgreSQL` connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres: Option<UriConnection>,
    /// `MySQL` connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mysql: Option<UriConnection>,
    /// `CockroachDB` connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cockroachdb: Option<UriConnection>,
    /// `TimescaleDB` connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timescaledb: Option<UriConnection>,
}

/// Connection described by a single URI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UriConnection {
    /// Connection URI, inline or from a secret source.
    #[serde(default)]
    pub uri: ValueOrValueFrom,
}

/// Either a literal value or a reference to where the value is issued.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValueOrValueFrom {
    /// Literal value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Reference to a dynamically issued value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<ValueFrom>,
}

/// Source of a dynamically issued value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueFrom {
    /// Vault-issued credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault: Option<VaultSecret>,
}

/// Vault secret reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultSecret {
    /// Path of the secret in Vault, e.g. `database/creds/schemahero`.
    pub secret: String,
    /// Vault role the task authenticates as.
    pub role: String,
}

/// Supported database engines.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// `PostgreSQL`.
    Postgres,
    /// `MySQL`.
    Mysql,
    /// `CockroachDB`.
    Cockroachdb,
    /// `TimescaleDB`.
    Timescaledb,
}

impl Engine {
    /// All supported engines, in slot order.
    pub const ALL: [Self; 4] = [
        Self::Postgres,
        Self::Mysql,
        Self::Cockroachdb,
        Self::Timescaledb,
    ];

    /// Driver name passed to the plan task.
    #[must_use]
    pub const fn driver(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Cockroachdb => "cockroachdb",
            Self::Timescaledb => "timescaledb",
        }
    }

    /// URI scheme used when composing a connection string.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Postgres | Self::Cockroachdb | Self::Timescaledb => "postgres",
            Self::Mysql => "mysql",
        }
    }

    /// Service host the engine is reachable at by convention.
    #[must_use]
    pub const fn default_host(self) -> &'static str {
        self.driver()
    }

    /// Port the engine listens on by default.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Postgres | Self::Timescaledb => 5432,
            Self::Mysql => 3306,
            Self::Cockroachdb => 26257,
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.driver())
    }
}

impl std::str::FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|engine| engine.driver() == s)
            .ok_or_else(|| format!("Unknown database engine: {s}"))
    }
}

impl DatabaseConnection {
    /// Returns every populated engine slot, in slot order.
    #[must_use]
    pub fn populated(&self) -> Vec<(Engine, &UriConnection)> {
        Engine::ALL
            .into_iter()
            .filter_map(|engine| self.slot(engine).map(|conn| (engine, conn)))
            .collect()
    }

    /// Returns the slot for a specific engine.
    #[must_use]
    pub const fn slot(&self, engine: Engine) -> Option<&UriConnection> {
        match engine {
            Engine::Postgres => self.postgres.as_ref(),
            Engine::Mysql => self.mysql.as_ref(),
            Engine::Cockroachdb => self.cockroachdb.as_ref(),
            Engine::Timescaledb => self.timescaledb.as_ref(),
        }
    }
}

impl Database {
    /// Returns the database name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_round_trip_from_str() {
        for engine in Engine::ALL {
            assert_eq!(engine.driver().parse::<Engine>(), Ok(engine));
        }
        assert!("oracle".parse::<Engine>().is_err());
    }

    #[test]
    fn test_parse_vault_database() {
        let yaml = r"
apiVersion: databases.schemahero.io/v1alpha4
kind: Database
metadata:
  name: my-database
spec:
  connection:
    postgres:
      uri:
        valueFrom:
          vault:
            secret: database/creds/schemahero
            role: schemahero-plan
";
        let db: Database = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(db.name(), "my-database");

        let populated = db.spec.connection.populated();
        assert_eq!(populated.len(), 1);
        assert_eq!(populated[0].0, Engine::Postgres);

        let vault = populated[0].1.uri.value_from.as_ref().unwrap().vault.as_ref().unwrap();
        assert_eq!(vault.secret, "database/creds/schemahero");
        assert_eq!(vault.role, "schemahero-plan");
    }

    #[test]
    fn test_populated_reports_all_slots() {
        let conn = DatabaseConnection {
            postgres: Some(UriConnection::default()),
            mysql: Some(UriConnection::default()),
            ..DatabaseConnection::default()
        };
        let engines: Vec<Engine> = conn.populated().into_iter().map(|(e, _)| e).collect();
        assert_eq!(engines, vec![Engine::Postgres, Engine::Mysql]);
    }
}
