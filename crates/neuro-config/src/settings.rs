//! Resolution of the three configuration values.
//!
//! Precedence per field, first hit wins:
//! 1. explicit override (CLI flag / function parameter)
//! 2. `NEURO_*` environment variable
//! 3. config file value
//! 4. built-in default (project: auto-detection)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{ENV_BRAIN_DB, ENV_CONFIG, ENV_PROJECT, ENV_ROOT};
use crate::error::{ConfigError, Result};
use crate::paths::{default_brain_db, default_config_file, default_root, expand_tilde};
use crate::project::{detect_project, sanitize};

/// On-disk config file model. All fields optional: the file only pins the
/// values it names, everything else falls through to lower tiers.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub paths: PathsSection,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PathsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brain_db: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl ConfigFile {
    /// Parse TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a file. A missing file is not an error: defaults apply.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no config file at {}", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }
}

/// Explicit per-field overrides, the highest tier of the resolution chain.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub project: Option<String>,
    pub brain_db: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

impl Overrides {
    /// Read the `NEURO_*` environment variables into an override set.
    /// Empty values count as unset.
    pub fn from_env() -> Self {
        Self {
            project: env_nonempty(ENV_PROJECT),
            brain_db: env_nonempty(ENV_BRAIN_DB).map(|v| expand_tilde(&v)),
            root: env_nonempty(ENV_ROOT).map(|v| expand_tilde(&v)),
            config_file: env_nonempty(ENV_CONFIG).map(|v| expand_tilde(&v)),
        }
    }

    /// Layer `self` over `lower`: any field set here wins.
    pub fn layered_over(self, lower: Self) -> Self {
        Self {
            project: self.project.or(lower.project),
            brain_db: self.brain_db.or(lower.brain_db),
            root: self.root.or(lower.root),
            config_file: self.config_file.or(lower.config_file),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Fully resolved configuration.
///
/// Resolved once at startup and treated as immutable thereafter; there is
/// no global state, callers pass `&Config` down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub project: String,
    pub brain_db: PathBuf,
    pub root: PathBuf,
}

impl Config {
    /// Resolve against the environment and the on-disk config file.
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let merged = overrides.clone().layered_over(Overrides::from_env());
        let file_path = merged
            .config_file
            .clone()
            .unwrap_or_else(default_config_file);
        let file = ConfigFile::load(&file_path)?;
        Ok(Self::from_tiers(merged, file))
    }

    /// Pure precedence merge: overrides, then file values, then defaults.
    /// Given the same inputs this always produces the same output.
    fn from_tiers(over: Overrides, file: ConfigFile) -> Self {
        let root = over
            .root
            .or_else(|| file.paths.root.as_deref().map(expand_tilde))
            .unwrap_or_else(default_root);

        let brain_db = over
            .brain_db
            .or_else(|| file.paths.brain_db.as_deref().map(expand_tilde))
            .unwrap_or_else(|| default_brain_db(&root));

        let project = over
            .project
            .or(file.project)
            .map(|p| sanitize(&p))
            .filter(|p| !p.is_empty())
            .unwrap_or_else(detect_project);

        Self {
            project,
            brain_db,
            root,
        }
    }

    /// Check the invariants every consumer relies on: a non-empty
    /// separator-free project name and non-empty absolute paths.
    pub fn validate(&self) -> Result<()> {
        if self.project.is_empty() {
            return Err(ConfigError::Invalid("project name is empty".into()));
        }
        if self.project.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "project name '{}' contains a path separator",
                self.project
            )));
        }
        for (label, path) in [("brain_db", &self.brain_db), ("root", &self.root)] {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!("{label} path is empty")));
            }
            if !path.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "{label} path '{}' is not absolute",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Capture the resolved values as a config file model.
    pub fn to_file(&self) -> ConfigFile {
        ConfigFile {
            project: Some(self.project.clone()),
            paths: PathsSection {
                brain_db: Some(self.brain_db.display().to_string()),
                root: Some(self.root.display().to_string()),
            },
        }
    }

    /// Render the resolved values as config-file TOML.
    pub fn render_file(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&self.to_file())?)
    }
}
