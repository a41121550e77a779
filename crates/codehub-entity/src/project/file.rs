//! Project file entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single source file inside a project's file set.
///
/// Files are exclusively owned by the project that contains them; the
/// only way content crosses project boundaries is an explicit fork copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Path within the project (unique key).
    pub path: String,
    /// File name without directories.
    pub filename: String,
    /// Language tag (e.g. "javascript").
    pub language: String,
    /// Full file content.
    pub content: String,
    /// Size in bytes. Always equals `content.len()` at write time.
    pub size_bytes: u64,
    /// When this path first appeared in the project.
    pub created_at: DateTime<Utc>,
    /// When the content was last replaced.
    pub updated_at: DateTime<Utc>,
}

impl ProjectFile {
    /// Build a file from path and content, deriving filename and size.
    pub fn new(
        path: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let content = content.into();
        let now = Utc::now();
        let filename = path
            .rsplit('/')
            .next()
            .unwrap_or(path.as_str())
            .to_string();
        Self {
            filename,
            language: language.into(),
            size_bytes: content.len() as u64,
            content,
            path,
            created_at: now,
            updated_at: now,
        }
    }

    /// Value copy re-stamped for a write at `now`.
    ///
    /// `created_at` is taken from `previous` when the path already existed
    /// in the project, so a file's origin survives content replacement.
    pub fn restamped(&self, previous: Option<&ProjectFile>, now: DateTime<Utc>) -> Self {
        Self {
            path: self.path.clone(),
            filename: self.filename.clone(),
            language: self.language.clone(),
            content: self.content.clone(),
            size_bytes: self.content.len() as u64,
            created_at: previous.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
