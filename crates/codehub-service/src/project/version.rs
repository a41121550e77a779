//! The version engine — append-only, value-copy snapshots.

use chrono::{DateTime, Utc};
use tracing::info;

use codehub_core::AppError;
use codehub_core::types::ProjectId;
use codehub_entity::project::{Project, ProjectFile, ProjectVersion};
use codehub_store::ProjectStore;

use crate::access::{AccessIntent, require_access};
use crate::context::RequestContext;

/// Version message used when the caller supplies none.
const DEFAULT_VERSION_MESSAGE: &str = "Updated project files";

/// Replaces a project's current file set and appends the matching
/// snapshot, in place.
///
/// This is the one routine allowed to grow a version history. It keeps
/// the engine's invariants:
/// - incoming files are re-stamped value copies with `size_bytes`
///   recomputed, `created_at` carried over for paths that already
///   existed;
/// - the file set stays ordered by path, paths unique;
/// - the snapshot is an independent copy numbered `versions.len() + 1`;
/// - `files` and the new snapshot are equal by value, aliased nowhere.
///
/// Deliberately not idempotent: two identical calls are two distinct
/// user-visible edits and produce two versions.
pub(crate) fn apply_version(
    project: &mut Project,
    new_files: &[ProjectFile],
    message: Option<&str>,
    now: DateTime<Utc>,
) -> Result<u32, AppError> {
    let mut stamped: Vec<ProjectFile> = Vec::with_capacity(new_files.len());
    for file in new_files {
        if stamped.iter().any(|f: &ProjectFile| f.path == file.path) {
            return Err(AppError::validation(format!(
                "Duplicate file path in update: '{}'",
                file.path
            )));
        }
        stamped.push(file.restamped(project.file_at(&file.path), now));
    }
    stamped.sort_by(|a, b| a.path.cmp(&b.path));

    let version_number = project.next_version_number();
    let version = ProjectVersion::new(
        version_number,
        message.unwrap_or(DEFAULT_VERSION_MESSAGE),
        &stamped,
        now,
    );

    project.files = stamped;
    project.versions.push(version);
    project.updated_at = now;
    Ok(version_number)
}

/// Manages project version history.
#[derive(Debug, Clone)]
pub struct VersionService {
    /// Project store.
    store: ProjectStore,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(store: ProjectStore) -> Self {
        Self { store }
    }

    /// Replaces the current file set and appends a version snapshot.
    ///
    /// Owner-only. The whole read-modify-write runs under the project's
    /// write lock, so concurrent appends to the same project serialize
    /// and version numbers never collide.
    pub async fn append_version(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        new_files: Vec<ProjectFile>,
        message: Option<&str>,
    ) -> Result<Project, AppError> {
        let user_id = ctx.user_id;
        let now = Utc::now();

        let (project, version_number) = self
            .store
            .update(project_id, |project| {
                require_access(project, user_id, AccessIntent::Write)?;
                let version_number = apply_version(project, &new_files, message, now)?;
                Ok((project.clone(), version_number))
            })
            .await?;

        info!(
            user_id = %user_id,
            project_id = %project_id,
            version = version_number,
            files = project.files.len(),
            "Version appended"
        );
        Ok(project)
    }

    /// Lists a project's version history, enforcing read access.
    pub async fn list_versions(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> Result<Vec<ProjectVersion>, AppError> {
        let project = self
            .store
            .find(project_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {project_id} not found")))?;

        require_access(&project, ctx.user_id, AccessIntent::Read)?;
        Ok(project.versions)
    }
}
