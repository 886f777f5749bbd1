//! Project identity auto-detection.
//!
//! When neither an override, an environment variable, nor the config file
//! names the project, the identity is derived from the surroundings:
//! git remote origin, git root basename, a build manifest, and finally the
//! directory basename.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fs};

use crate::constants::FALLBACK_PROJECT;

/// Replace anything that is not alphanumeric, `-`, or `_` with `_`.
///
/// The project name doubles as an identifier in filenames and logs, so it
/// must never contain a path separator.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Auto-detect a project identity from the current directory.
///
/// Priority: git remote origin → git root basename → manifest name →
/// directory basename → `"unnamed"`. Every candidate is sanitized.
pub fn detect_project() -> String {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    detect_project_from(&cwd)
}

fn detect_project_from(dir: &Path) -> String {
    if let Some(root) = git_toplevel(dir) {
        if let Some(identity) = git_origin_identity(&root) {
            return sanitize(&identity);
        }
        if let Some(basename) = root.file_name() {
            let name = sanitize(&basename.to_string_lossy());
            if !name.is_empty() {
                return name;
            }
        }
    }

    if let Some(name) = manifest_name(dir) {
        let name = sanitize(&name);
        if !name.is_empty() {
            return name;
        }
    }

    dir.file_name()
        .map(|n| sanitize(&n.to_string_lossy()))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| FALLBACK_PROJECT.to_string())
}

// ---------------------------------------------------------------------------
// Pure parsing (unit-testable without I/O)
// ---------------------------------------------------------------------------

/// Turn a git remote URL into an `org_repo` identity.
///
/// Accepts SCP-style SSH (`git@host:org/repo.git`), HTTPS, and
/// `ssh://`-schemed URLs. GitLab subgroups contribute their last two path
/// segments; a trailing `.git` is stripped.
fn remote_identity(url: &str) -> Option<String> {
    let url = url.trim();

    // scheme://host/path keeps everything after the host;
    // git@host:path keeps everything after the colon.
    let path = if let Some(idx) = url.find("://") {
        url[idx + 3..].split_once('/')?.1
    } else {
        url.split_once(':')?.1
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
    let repo = segments.next()?;
    match segments.next() {
        Some(org) => Some(format!("{org}_{repo}")),
        None => Some(repo.to_string()),
    }
}

/// Value between quotes at the start of `s` (after whitespace).
/// Handles both `"value"` and `'value'`.
fn quoted_value(s: &str) -> Option<&str> {
    let s = s.trim();
    let quote = s.chars().next().filter(|c| matches!(c, '"' | '\''))?;
    let inner = &s[1..];
    inner.find(quote).map(|end| &inner[..end])
}

/// Find `name = "value"` inside `[table]` in TOML content.
fn toml_table_name(content: &str, table: &str) -> Option<String> {
    let mut in_table = false;
    for line in content.lines().map(str::trim) {
        if let Some(header) = line.strip_prefix('[') {
            in_table = header.strip_suffix(']') == Some(table);
            continue;
        }
        if !in_table {
            continue;
        }
        if let Some(rest) = line.strip_prefix("name")
            && let Some(value) = rest.trim_start().strip_prefix('=')
            && let Some(name) = quoted_value(value)
            && !name.is_empty()
        {
            return Some(name.to_string());
        }
    }
    None
}

/// Find the top-level `"name": "value"` line in package.json content.
fn package_json_name(content: &str) -> Option<String> {
    for line in content.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("\"name\"")
            && let Some(value) = rest.trim_start().strip_prefix(':')
            && let Some(name) = quoted_value(value.trim_end_matches(','))
            && !name.is_empty()
        {
            return Some(name.to_string());
        }
    }
    None
}

// ---------------------------------------------------------------------------
// I/O probes
// ---------------------------------------------------------------------------

/// Ask git for the repository root containing `dir`.
fn git_toplevel(dir: &Path) -> Option<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if root.is_empty() {
        None
    } else {
        Some(PathBuf::from(root))
    }
}

/// Ask git for the origin remote and parse it into an identity.
fn git_origin_identity(dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .current_dir(dir)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    remote_identity(&String::from_utf8_lossy(&output.stdout))
}

/// Probe the known manifest files in `dir` for a project name.
fn manifest_name(dir: &Path) -> Option<String> {
    let probes: [(&str, fn(&str) -> Option<String>); 3] = [
        ("Cargo.toml", |c| toml_table_name(c, "package")),
        ("package.json", package_json_name),
        ("pyproject.toml", |c| toml_table_name(c, "project")),
    ];

    probes.iter().find_map(|(file, extract)| {
        fs::read_to_string(dir.join(file))
            .ok()
            .and_then(|content| extract(&content))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -- sanitize --

    #[test]
    fn test_sanitize_replaces_separators() {
        assert_eq!(sanitize("my/project"), "my_project");
        assert_eq!(sanitize("back\\slash"), "back_slash");
        assert_eq!(sanitize("spaced out"), "spaced_out");
    }

    #[test]
    fn test_sanitize_keeps_valid_chars() {
        assert_eq!(sanitize("half_year_card"), "half_year_card");
        assert_eq!(sanitize("valid-name_123"), "valid-name_123");
    }

    proptest! {
        #[test]
        fn sanitize_never_emits_separators(name in ".*") {
            let s = sanitize(&name);
            prop_assert!(!s.contains('/'));
            prop_assert!(!s.contains('\\'));
            prop_assert_eq!(s.chars().count(), name.chars().count());
        }
    }

    // -- remote_identity --

    #[test]
    fn test_remote_scp_ssh() {
        assert_eq!(
            remote_identity("git@github.com:acme/widgets.git"),
            Some("acme_widgets".to_string())
        );
    }

    #[test]
    fn test_remote_https() {
        assert_eq!(
            remote_identity("https://github.com/acme/widgets.git"),
            Some("acme_widgets".to_string())
        );
    }

    #[test]
    fn test_remote_ssh_scheme() {
        assert_eq!(
            remote_identity("ssh://git@github.com/acme/widgets.git"),
            Some("acme_widgets".to_string())
        );
    }

    #[test]
    fn test_remote_without_git_suffix() {
        assert_eq!(
            remote_identity("https://github.com/org/repo"),
            Some("org_repo".to_string())
        );
    }

    #[test]
    fn test_remote_gitlab_subgroups_use_last_two() {
        assert_eq!(
            remote_identity("git@gitlab.com:group/subgroup/repo.git"),
            Some("subgroup_repo".to_string())
        );
    }

    #[test]
    fn test_remote_garbage() {
        assert_eq!(remote_identity("not-a-url"), None);
        assert_eq!(remote_identity(""), None);
        assert_eq!(remote_identity("git@github.com:"), None);
    }

    // -- quoted_value --

    #[test]
    fn test_quoted_double() {
        assert_eq!(quoted_value(r#" "hello" "#), Some("hello"));
    }

    #[test]
    fn test_quoted_single() {
        assert_eq!(quoted_value("'world'"), Some("world"));
    }

    #[test]
    fn test_quoted_empty_and_bare() {
        assert_eq!(quoted_value(r#""""#), Some(""));
        assert_eq!(quoted_value("bare"), None);
    }

    // -- toml_table_name / package_json_name --

    #[test]
    fn test_toml_cargo_package() {
        let content = "[package]\nname = \"widgets\"\nversion = \"0.1.0\"\n";
        assert_eq!(
            toml_table_name(content, "package"),
            Some("widgets".to_string())
        );
    }

    #[test]
    fn test_toml_workspace_without_package() {
        let content = "[workspace]\nmembers = [\"crates/*\"]\n";
        assert_eq!(toml_table_name(content, "package"), None);
    }

    #[test]
    fn test_toml_ignores_other_tables() {
        let content = "[tool.poetry]\nname = \"wrong\"\n\n[project]\nname = \"correct\"\n";
        assert_eq!(
            toml_table_name(content, "project"),
            Some("correct".to_string())
        );
    }

    #[test]
    fn test_toml_single_quotes() {
        let content = "[package]\nname = 'my-crate'\n";
        assert_eq!(
            toml_table_name(content, "package"),
            Some("my-crate".to_string())
        );
    }

    #[test]
    fn test_package_json() {
        let content = "{\n  \"name\": \"webapp\",\n  \"version\": \"1.0.0\"\n}\n";
        assert_eq!(package_json_name(content), Some("webapp".to_string()));
    }

    // -- detection --

    #[test]
    fn test_manifest_probe_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{\"name\": \"js-name\"}").unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"rust-name\"\n",
        )
        .unwrap();
        // Cargo.toml is probed first
        assert_eq!(manifest_name(dir.path()), Some("rust-name".to_string()));
    }

    #[test]
    fn test_detect_from_plain_dir_uses_basename() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = dir.path().join("my cool project");
        fs::create_dir(&project_dir).unwrap();
        // No git, no manifest: falls back to the sanitized basename
        assert_eq!(detect_project_from(&project_dir), "my_cool_project");
    }

    #[test]
    fn test_detect_from_manifest_dir() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = dir.path().join("anything");
        fs::create_dir(&project_dir).unwrap();
        fs::write(
            project_dir.join("pyproject.toml"),
            "[project]\nname = \"half_year_card\"\n",
        )
        .unwrap();
        assert_eq!(detect_project_from(&project_dir), "half_year_card");
    }

    #[test]
    fn test_detect_always_readable() {
        let id = detect_project();
        assert!(!id.is_empty());
        assert!(
            id.chars().any(|c| c.is_alphanumeric()),
            "detected id should be readable, got: {id}"
        );
    }
}
