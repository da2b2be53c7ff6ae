// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning

// ============================================================================
// Crate Documentation
// ============================================================================

//! # SchemaHero Plan
//!
//! Renders the inputs of an out-of-process `plan` task for declarative
//! database tables.
//!
//! ## Overview
//!
//! A `Table` resource describes a desired schema and names the `Database` it
//! belongs to. For each pair this crate produces:
//!
//! - a **configuration artifact**: the table document (`database`, `name`,
//!   `schema`) keyed by `table.yaml` and mounted at `/specs`
//! - a **plan task**: image, ordered arguments and, when the connection URI is
//!   issued by Vault, the annotations that drive the Vault agent sidecar
//!
//! Both outputs are pure functions of their inputs, so reconciling an
//! unchanged pair yields byte-identical outputs.
//!
//! ## Modules
//!
//! - [`resources`]: `Database` and `Table` descriptors
//! - [`planner`]: connection resolution, table document and task rendering
//! - [`config`]: operator settings, manifest loading, validation, hashing
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```yaml
//! apiVersion: databases.schemahero.io/v1alpha4
//! kind: Database
//! metadata:
//!   name: my-database
//! spec:
//!   connection:
//!     postgres:
//!       uri:
//!         valueFrom:
//!           vault:
//!             secret: database/creds/schemahero
//!             role: schemahero-plan
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod planner;
pub mod resources;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ArtifactHasher, ConfigParser, DescriptorValidator, PlannerConfig};
pub use error::{Result, SchemaHeroError, TaskError};
pub use planner::{
    ConfigArtifact, Connection, Credential, PlanTask, TaskSpecBuilder, render_config_artifact,
    render_table_document,
};
pub use resources::{Database, Engine, Table};
