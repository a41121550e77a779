//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use codehub_core::types::{ProjectId, UserId};

use super::file::ProjectFile;
use super::prompt::PromptRecord;
use super::version::ProjectVersion;
use super::visibility::Visibility;

/// A versioned code project owned by a single user.
///
/// Invariants maintained by the version engine:
/// - `versions` is append-only, never truncated or reordered;
/// - `versions[i].version_number == i + 1`;
/// - after any successful mutation, `files` equals the last version's
///   `files_snapshot` by value (never by reference).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// The owning user.
    pub owner_id: UserId,
    /// Display name.
    pub name: String,
    /// Short description (optional).
    pub description: Option<String>,
    /// Technology stack tags.
    pub tech_stack: Vec<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Current file set, ordered by path.
    pub files: Vec<ProjectFile>,
    /// Append-only version history.
    pub versions: Vec<ProjectVersion>,
    /// AI generation provenance. Forks start with an empty list.
    pub prompts: Vec<PromptRecord>,
    /// Read visibility for non-owners.
    pub visibility: Visibility,
    /// The project this one was forked from, if any.
    pub parent_project_id: Option<ProjectId>,
    /// Owner of the fork source at fork time, if any.
    pub forked_from_user_id: Option<UserId>,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Look up a file in the current file set by path.
    pub fn file_at(&self, path: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// The most recently appended version, if any.
    pub fn current_version(&self) -> Option<&ProjectVersion> {
        self.versions.last()
    }

    /// The number the next appended version will receive.
    pub fn next_version_number(&self) -> u32 {
        self.versions.len() as u32 + 1
    }

    /// Whether `user` owns this project.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Display name.
    pub name: String,
    /// Short description (optional).
    pub description: Option<String>,
    /// Technology stack tags.
    #[serde(default)]
    pub tech_stack: Vec<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Read visibility. Defaults to private.
    #[serde(default)]
    pub visibility: Visibility,
}
