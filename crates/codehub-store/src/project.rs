//! Keyed project store.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::RwLock;
use tracing::debug;

use codehub_core::AppError;
use codehub_core::types::ProjectId;
use codehub_entity::project::Project;

/// In-memory project store keyed by [`ProjectId`].
///
/// Every project is wrapped in its own `RwLock`, so [`ProjectStore::update`]
/// serializes mutations per project. Mutations of different projects never
/// contend.
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    /// Map of project ID to the lock-guarded document.
    entries: Arc<DashMap<ProjectId, Arc<RwLock<Project>>>>,
}

impl ProjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new project. Fails with a conflict if the ID is taken.
    pub async fn insert(&self, project: Project) -> Result<Project, AppError> {
        let id = project.id;
        match self.entries.entry(id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Project {id} already exists"
            ))),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(RwLock::new(project.clone())));
                debug!(project_id = %id, "Project inserted");
                Ok(project)
            }
        }
    }

    /// Find a project by ID, returning a detached copy.
    pub async fn find(&self, id: ProjectId) -> Result<Option<Project>, AppError> {
        let entry = self.entries.get(&id).map(|e| Arc::clone(e.value()));
        match entry {
            Some(lock) => Ok(Some(lock.read().await.clone())),
            None => Ok(None),
        }
    }

    /// Run a mutation against a project under its write lock.
    ///
    /// The closure sees the live document; whatever state it leaves behind
    /// is the saved state. Returns `NotFound` if the project does not exist
    /// or was deleted before the lock was acquired.
    pub async fn update<T, F>(&self, id: ProjectId, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Project) -> Result<T, AppError>,
    {
        let lock = self
            .entries
            .get(&id)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))?;

        let mut project = lock.write().await;
        // The entry may have been removed between the map lookup and the
        // lock acquisition; a write to an orphaned document must not
        // appear to succeed.
        if !self.entries.contains_key(&id) {
            return Err(AppError::not_found(format!("Project {id} not found")));
        }
        f(&mut project)
    }

    /// Delete a project (and, with it, its owned version history).
    /// Returns `true` if something was deleted.
    ///
    /// Removal takes the entry's write lock before dropping it from the map,
    /// so it serializes with [`ProjectStore::update`]: an in-flight mutation
    /// completes first, and any later one fails the post-lock existence check.
    pub async fn remove(&self, id: ProjectId) -> Result<bool, AppError> {
        let Some(lock) = self.entries.get(&id).map(|e| Arc::clone(e.value())) else {
            return Ok(false);
        };
        let _guard = lock.write().await;
        let removed = self.entries.remove(&id).is_some();
        if removed {
            debug!(project_id = %id, "Project removed");
        }
        Ok(removed)
    }

    /// Number of stored projects.
    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(self.entries.len() as u64)
    }
}
