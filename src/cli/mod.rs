//! CLI module for the plan task renderer.
//!
//! This module provides the command-line interface for rendering and
//! validating plan tasks from descriptor manifests.

mod commands;
mod output;

pub use commands::{Cli, Commands, DescriptorArgs, OutputFormat};
pub use output::OutputFormatter;
