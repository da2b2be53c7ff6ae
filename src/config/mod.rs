//! Configuration module.
//!
//! This module handles everything around the core planner:
//! - Operator settings (image, pull policy, endpoint overrides)
//! - Loading settings and resource manifests from YAML
//! - Validation of descriptor pairs
//! - Hashing rendered outputs for change detection

mod settings;
mod parser;
mod validator;
mod hash;

pub use settings::{DEFAULT_IMAGE, Endpoint, ImagePullPolicy, PlannerConfig};
pub use parser::{ConfigParser, find_settings_file};
pub use validator::{DescriptorValidator, ValidationError, ValidationResult};
pub use hash::ArtifactHasher;
