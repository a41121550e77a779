//! Project version entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::file::ProjectFile;

/// One immutable snapshot in a project's append-only version history.
///
/// `files_snapshot` is a full value copy of the file set at append time,
/// never a diff and never shared with the live file set or with any other
/// snapshot. Once appended, a version is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectVersion {
    /// Sequential version number, starting at 1.
    pub version_number: u32,
    /// Free-text description of the change.
    pub message: String,
    /// Complete file set at this point in history.
    pub files_snapshot: Vec<ProjectFile>,
    /// When this version was created.
    pub created_at: DateTime<Utc>,
}

impl ProjectVersion {
    /// Build a version with a deep-copied snapshot of `files`.
    pub fn new(
        version_number: u32,
        message: impl Into<String>,
        files: &[ProjectFile],
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            version_number,
            message: message.into(),
            files_snapshot: files.to_vec(),
            created_at,
        }
    }

    /// Independent copy for a fork: fresh timestamps, same number and message.
    ///
    /// The snapshot's files are restamped along with the version itself, so
    /// a fork's last snapshot stays equal by value to its live file set.
    pub fn fork_copy(&self, now: DateTime<Utc>) -> Self {
        Self {
            version_number: self.version_number,
            message: self.message.clone(),
            files_snapshot: self
                .files_snapshot
                .iter()
                .map(|f| f.restamped(None, now))
                .collect(),
            created_at: now,
        }
    }
}
