//! Project lifecycle service — create, read, delete.

use chrono::Utc;
use tracing::info;

use codehub_core::AppError;
use codehub_core::types::ProjectId;
use codehub_entity::project::{CreateProject, Project, ProjectFile, ProjectVersion};
use codehub_store::ProjectStore;

use crate::access::{AccessIntent, require_access};
use crate::context::RequestContext;

/// Manages project documents.
#[derive(Debug, Clone)]
pub struct ProjectService {
    /// Project store.
    store: ProjectStore,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(store: ProjectStore) -> Self {
        Self { store }
    }

    /// Creates a project owned by the caller.
    ///
    /// Every project starts with an empty file set and version 1, an
    /// empty snapshot, so the history is never without a baseline.
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        req: CreateProject,
    ) -> Result<Project, AppError> {
        let now = Utc::now();
        let project = Project {
            id: ProjectId::new(),
            owner_id: ctx.user_id,
            name: req.name,
            description: req.description,
            tech_stack: req.tech_stack,
            tags: req.tags,
            files: Vec::new(),
            versions: vec![ProjectVersion::new(1, "Initial project version", &[], now)],
            prompts: Vec::new(),
            visibility: req.visibility,
            parent_project_id: None,
            forked_from_user_id: None,
            created_at: now,
            updated_at: now,
        };

        let project = self.store.insert(project).await?;
        info!(
            user_id = %ctx.user_id,
            project_id = %project.id,
            visibility = %project.visibility,
            "Project created"
        );
        Ok(project)
    }

    /// Fetches a project, enforcing read access.
    pub async fn get_project(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> Result<Project, AppError> {
        let project = self
            .store
            .find(project_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {project_id} not found")))?;

        require_access(&project, ctx.user_id, AccessIntent::Read)?;
        Ok(project)
    }

    /// Fetches a project's current file set, enforcing read access.
    pub async fn get_project_files(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> Result<Vec<ProjectFile>, AppError> {
        Ok(self.get_project(ctx, project_id).await?.files)
    }

    /// Deletes a project and its owned version history.
    pub async fn delete_project(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> Result<(), AppError> {
        let project = self
            .store
            .find(project_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {project_id} not found")))?;

        require_access(&project, ctx.user_id, AccessIntent::Write)?;
        self.store.remove(project_id).await?;

        info!(user_id = %ctx.user_id, project_id = %project_id, "Project deleted");
        Ok(())
    }
}
