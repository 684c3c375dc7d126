//! Core of rollout
//!
//! Holds the deploy configuration model, the KDL parser that fills it,
//! environment overrides, the loader that ties discovery, parsing and
//! validation together, and the build-file template renderer.

pub mod env;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod revision;
pub mod template;

pub use error::{CoreError, Result};
pub use loader::{LoadedConfig, load_config, load_config_from_path};
pub use model::*;
pub use parser::parse_kdl_string;
pub use revision::{InvalidRevision, Revision};
pub use template::{Rendered, TemplateRenderer};
