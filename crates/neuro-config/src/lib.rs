//! Configuration for the neuromorphic memory system.
//!
//! Resolves three values — the owning project's name, the brain database
//! path, and the neuromorphic root directory — from explicit overrides,
//! `NEURO_*` environment variables, an optional TOML config file, and
//! built-in defaults, in that order. The resolved [`Config`] is plain
//! immutable data: resolve it once at startup and pass it by reference.
//!
//! The memory/task helper modules expected under the root and the schema
//! of the brain database belong to external collaborators; this crate
//! only locates them and (via [`doctor`]) reports whether they are there.

pub mod constants;
pub mod doctor;
pub mod error;
pub mod paths;
pub mod project;
pub mod settings;

pub use constants::{ENV_BRAIN_DB, ENV_CONFIG, ENV_PROJECT, ENV_ROOT};
pub use doctor::{Check, CheckStatus, Report, run_checks};
pub use error::{ConfigError, Result};
pub use paths::{default_brain_db, default_config_file, default_root, expand_tilde};
pub use project::{detect_project, sanitize};
pub use settings::{Config, ConfigFile, Overrides};
