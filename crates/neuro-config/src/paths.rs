use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{BRAIN_DB_RELATIVE, CONFIG_FILENAME, DEFAULT_ROOT_DIR};

/// Home directory, falling back to USERPROFILE then `.`.
pub fn home_dir() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Default neuromorphic root: `~/.claude/neuromorphic`.
pub fn default_root() -> PathBuf {
    home_dir().join(DEFAULT_ROOT_DIR)
}

/// Default brain database location under a root.
pub fn default_brain_db(root: &Path) -> PathBuf {
    root.join(BRAIN_DB_RELATIVE)
}

/// Default config file location: `~/.claude/neuromorphic/config.toml`.
///
/// Anchored at the fixed default base rather than the resolved root, so the
/// file that may redefine the root has a stable address.
pub fn default_config_file() -> PathBuf {
    default_root().join(CONFIG_FILENAME)
}

/// Expand a leading `~` or `~/` against the home directory.
/// Anything else passes through untouched.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(path),
    }
}
