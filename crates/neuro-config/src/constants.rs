/// Environment variable naming the project, overriding auto-detection.
pub const ENV_PROJECT: &str = "NEURO_PROJECT";

/// Environment variable pointing at the brain database file.
pub const ENV_BRAIN_DB: &str = "NEURO_BRAIN_DB";

/// Environment variable pointing at the neuromorphic root directory.
pub const ENV_ROOT: &str = "NEURO_PATH";

/// Environment variable pointing at an alternate config file.
pub const ENV_CONFIG: &str = "NEURO_CONFIG";

/// Default neuromorphic tree location, relative to the home directory.
pub const DEFAULT_ROOT_DIR: &str = ".claude/neuromorphic";

/// Brain database location, relative to the root.
pub const BRAIN_DB_RELATIVE: &str = "brain/brain.db";

/// Config filename within the default base directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Conventional subdirectory of the root holding the helper modules.
pub const SERVERS_DIR: &str = "servers";

/// Last-resort project identifier when detection finds nothing usable.
pub const FALLBACK_PROJECT: &str = "unnamed";
