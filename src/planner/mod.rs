//! Planning module.
//!
//! This module turns a `Database`/`Table` pair into the two inputs of a plan
//! task: the rendered table document and the task invocation.

mod artifact;
mod connection;
mod task;
pub mod vault;

pub use artifact::{
    ARTIFACT_KEY, ConfigArtifact, SPEC_FILE_PATH, SPEC_HASH_LABEL, SPEC_MOUNT_DIR,
    artifact_name, render_config_artifact, render_table_document,
};
pub use connection::{Connection, Credential, VaultRef};
pub use task::{PlanInvocation, PlanTask, TASK_HASH_LABEL, TaskSpecBuilder};
