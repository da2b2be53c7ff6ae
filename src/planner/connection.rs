//! Resolution of a database connection into a single engine and credential.
//!
//! The manifest form allows any combination of engine slots and
//! `value`/`valueFrom`; [`Connection`] admits exactly one of each.

use crate::error::TaskError;
use crate::resources::{Database, Engine, UriConnection};

/// Where the plan task gets its connection URI from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Literal URI passed on the command line.
    Inline(String),
    /// URI composed at runtime by the Vault agent from an issued secret.
    Vault(VaultRef),
}

/// Vault secret path and role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultRef {
    /// Secret path, e.g. `database/creds/schemahero`.
    pub secret: String,
    /// Role the task authenticates as.
    pub role: String,
}

/// A resolved database connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Target engine.
    pub engine: Engine,
    /// Credential source.
    pub credential: Credential,
}

impl Connection {
    /// Creates a connection with an inline URI.
    #[must_use]
    pub fn inline(engine: Engine, uri: impl Into<String>) -> Self {
        Self {
            engine,
            credential: Credential::Inline(uri.into()),
        }
    }

    /// Creates a connection whose URI is issued by Vault.
    #[must_use]
    pub fn vault(engine: Engine, secret: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            engine,
            credential: Credential::Vault(VaultRef {
                secret: secret.into(),
                role: role.into(),
            }),
        }
    }

    /// Resolves the connection of a `Database` descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidConnectionConfig`] when zero or several
    /// engines are configured, or when the URI sets neither or both of
    /// `value` and `valueFrom`.
    pub fn resolve(database: &Database) -> Result<Self, TaskError> {
        let name = database.name();
        let populated = database.spec.connection.populated();

        let (engine, slot) = match populated.as_slice() {
            [] => {
                return Err(TaskError::invalid_connection(
                    name,
                    "no database engine connection is configured",
                ));
            }
            [(engine, slot)] => (*engine, *slot),
            many => {
                let engines: Vec<&str> = many.iter().map(|(e, _)| e.driver()).collect();
                return Err(TaskError::invalid_connection(
                    name,
                    format!("multiple engine connections are configured: {}", engines.join(", ")),
                ));
            }
        };

        let credential = resolve_credential(name, slot)?;
        Ok(Self { engine, credential })
    }

    /// Returns true when the URI is injected by Vault.
    #[must_use]
    pub const fn uses_vault(&self) -> bool {
        matches!(self.credential, Credential::Vault(_))
    }
}

impl TryFrom<&Database> for Connection {
    type Error = TaskError;

    fn try_from(database: &Database) -> Result<Self, Self::Error> {
        Self::resolve(database)
    }
}

fn resolve_credential(database: &str, slot: &UriConnection) -> Result<Credential, TaskError> {
    let value = slot.uri.value.as_deref().filter(|v| !v.is_empty());

    match (value, slot.uri.value_from.as_ref()) {
        (Some(_), Some(_)) => Err(TaskError::invalid_connection(
            database,
            "uri sets both value and valueFrom",
        )),
        (None, None) => Err(TaskError::invalid_connection(
            database,
            "uri sets neither value nor valueFrom",
        )),
        (Some(uri), None) => Ok(Credential::Inline(uri.to_string())),
        (None, Some(value_from)) => {
            let vault = value_from.vault.as_ref().ok_or_else(|| {
                TaskError::invalid_connection(database, "uri valueFrom does not reference a vault secret")
            })?;

            if vault.secret.is_empty() || vault.role.is_empty() {
                return Err(TaskError::invalid_connection(
                    database,
                    "vault reference requires both secret and role",
                ));
            }

            Ok(Credential::Vault(VaultRef {
                secret: vault.secret.clone(),
                role: vault.role.clone(),
            }))
        }
    }
}
