//! Project forking — deep history copy under new ownership.

use chrono::Utc;
use tracing::info;

use codehub_core::AppError;
use codehub_core::types::ProjectId;
use codehub_entity::project::{Project, ProjectFile, Visibility};
use codehub_store::ProjectStore;

use crate::access::{AccessIntent, require_access};
use crate::context::RequestContext;

/// Creates forks of readable projects.
#[derive(Debug, Clone)]
pub struct ForkService {
    /// Project store.
    store: ProjectStore,
}

impl ForkService {
    /// Creates a new fork service.
    pub fn new(store: ProjectStore) -> Self {
        Self { store }
    }

    /// Forks a project for the caller.
    ///
    /// The fork is a structurally independent deep copy of the source's
    /// current file set and entire version history: copied files and
    /// versions get fresh timestamps while version numbers and messages
    /// are preserved. Ownership moves to the caller, visibility resets to
    /// private regardless of the source, and prompt provenance is not
    /// inherited.
    pub async fn fork_project(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> Result<Project, AppError> {
        let source = self
            .store
            .find(project_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {project_id} not found")))?;

        require_access(&source, ctx.user_id, AccessIntent::Read)?;

        let now = Utc::now();
        let files: Vec<ProjectFile> = source
            .files
            .iter()
            .map(|f| f.restamped(None, now))
            .collect();
        let versions = source
            .versions
            .iter()
            .map(|v| v.fork_copy(now))
            .collect();

        let forked = Project {
            id: ProjectId::new(),
            owner_id: ctx.user_id,
            name: format!("{} (fork)", source.name),
            description: source.description.clone(),
            tech_stack: source.tech_stack.clone(),
            tags: source.tags.clone(),
            files,
            versions,
            prompts: Vec::new(),
            visibility: Visibility::Private,
            parent_project_id: Some(source.id),
            forked_from_user_id: Some(source.owner_id),
            created_at: now,
            updated_at: now,
        };

        let forked = self.store.insert(forked).await?;
        info!(
            user_id = %ctx.user_id,
            source_id = %source.id,
            fork_id = %forked.id,
            versions = forked.versions.len(),
            "Project forked"
        );
        Ok(forked)
    }
}
