//! Operator settings for rendering plan tasks.
//!
//! These are the knobs the operator process owns, as opposed to the
//! `Database`/`Table` descriptors that arrive with every reconciliation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::resources::Engine;

/// Settings applied to every plan task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Container image that runs the `plan` command.
    #[serde(default = "default_image")]
    pub image: String,
    /// Pull policy for the plan image.
    #[serde(default)]
    pub image_pull_policy: ImagePullPolicy,
    /// Service account the task runs as when credentials come from Vault.
    #[serde(default)]
    pub service_account: Option<String>,
    /// Per-engine overrides of the service endpoint used in Vault templates.
    #[serde(default)]
    pub endpoints: BTreeMap<Engine, Endpoint>,
}

/// Image pull policy for the plan container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ImagePullPolicy {
    /// Always pull.
    Always,
    /// Pull only when missing.
    #[default]
    IfNotPresent,
    /// Never pull.
    Never,
}

/// A host and port the plan task reaches a database at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    /// Service host name.
    pub host: String,
    /// Service port.
    pub port: u16,
}

fn default_image() -> String {
    String::from(DEFAULT_IMAGE)
}

/// Image used when none is configured.
pub const DEFAULT_IMAGE: &str = "schemahero/schemahero:0.12.0";

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            image: default_image(),
            image_pull_policy: ImagePullPolicy::default(),
            service_account: None,
            endpoints: BTreeMap::new(),
        }
    }
}

impl PlannerConfig {
    /// Returns the endpoint for an engine, falling back to the engine's
    /// conventional service host and default port.
    #[must_use]
    pub fn endpoint(&self, engine: Engine) -> Endpoint {
        self.endpoints
            .get(&engine)
            .cloned()
            .unwrap_or_else(|| Endpoint::default_for(engine))
    }
}

impl Endpoint {
    /// Conventional endpoint for an engine.
    #[must_use]
    pub fn default_for(engine: Engine) -> Self {
        Self {
            host: engine.default_host().to_string(),
            port: engine.default_port(),
        }
    }
}

impl std::fmt::Display for ImagePullPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Always => "Always",
            Self::IfNotPresent => "IfNotPresent",
            Self::Never => "Never",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ImagePullPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Always" => Ok(Self::Always),
            "IfNotPresent" => Ok(Self::IfNotPresent),
            "Never" => Ok(Self::Never),
            other => Err(format!(
                "Invalid image pull policy: {other}. Expected: Always, IfNotPresent, or Never"
            )),
        }
    }
}
