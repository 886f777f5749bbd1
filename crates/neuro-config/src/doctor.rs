//! Environment checks for a resolved configuration.
//!
//! Verifies that the locations a [`Config`] points at are usable, without
//! touching the collaborator modules themselves: their contracts live
//! outside this crate. Checks accumulate into a [`Report`] instead of
//! failing early, so the caller can show the full picture at once.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::constants::SERVERS_DIR;
use crate::settings::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    /// Usable but incomplete: collaborators may still create the missing piece.
    Warn,
    Fail,
}

#[derive(Debug)]
pub struct Check {
    pub name: &'static str,
    pub status: CheckStatus,
    pub detail: String,
}

#[derive(Debug, Default)]
pub struct Report {
    pub checks: Vec<Check>,
}

impl Report {
    pub fn failed(&self) -> bool {
        self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }

    fn push(&mut self, name: &'static str, status: CheckStatus, detail: impl Into<String>) {
        self.checks.push(Check {
            name,
            status,
            detail: detail.into(),
        });
    }
}

/// Probe the filesystem locations named by `config`.
pub fn run_checks(config: &Config) -> Report {
    tracing::debug!(
        "checking root {} and brain_db {}",
        config.root.display(),
        config.brain_db.display()
    );

    let mut report = Report::default();
    check_root(&config.root, &mut report);
    check_brain_db(&config.brain_db, &mut report);
    report
}

fn check_root(root: &Path, report: &mut Report) {
    if !root.exists() {
        report.push(
            "root",
            CheckStatus::Fail,
            format!("{} does not exist", root.display()),
        );
        return;
    }
    if !root.is_dir() {
        report.push(
            "root",
            CheckStatus::Fail,
            format!("{} is not a directory", root.display()),
        );
        return;
    }
    report.push("root", CheckStatus::Ok, root.display().to_string());

    // The memory/tasks helper modules conventionally live under servers/.
    let servers = root.join(SERVERS_DIR);
    if servers.is_dir() {
        report.push("servers", CheckStatus::Ok, servers.display().to_string());
    } else {
        report.push(
            "servers",
            CheckStatus::Warn,
            format!("{} not found (helper modules unavailable)", servers.display()),
        );
    }
}

fn check_brain_db(path: &Path, report: &mut Report) {
    if !path.exists() {
        report.push(
            "brain_db",
            CheckStatus::Warn,
            format!("{} does not exist yet", path.display()),
        );
        return;
    }
    match probe_sqlite(path) {
        Ok(version) => report.push(
            "brain_db",
            CheckStatus::Ok,
            format!("{} (schema_version {version})", path.display()),
        ),
        Err(e) => report.push(
            "brain_db",
            CheckStatus::Fail,
            format!("{} is not a readable SQLite database: {e}", path.display()),
        ),
    }
}

/// Open read-only and ask for the schema version. Answers iff the file is
/// a well-formed SQLite database this process may read.
fn probe_sqlite(path: &Path) -> rusqlite::Result<i64> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    conn.query_row("PRAGMA schema_version", [], |row| row.get(0))
}
