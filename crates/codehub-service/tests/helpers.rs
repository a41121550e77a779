//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use codehub_core::AppError;
use codehub_core::traits::GenerationBackend;
use codehub_core::types::ProjectId;
use codehub_entity::project::{CreateProject, Project, Visibility};
use codehub_entity::usage::{PlanType, UsageAccount};
use codehub_service::RequestContext;
use codehub_service::generation::GenerationService;
use codehub_service::project::{ForkService, ProjectService, VersionService};
use codehub_service::quota::QuotaService;
use codehub_store::{ProjectStore, UsageStore};

/// Test application context wiring all services over shared stores.
pub struct TestApp {
    /// Project store for direct inspection.
    pub project_store: ProjectStore,
    /// Usage store for direct inspection.
    pub usage_store: UsageStore,
    /// Project lifecycle service.
    pub projects: ProjectService,
    /// Version engine.
    pub versions: VersionService,
    /// Fork service.
    pub forks: ForkService,
    /// Quota ledger.
    pub quota: QuotaService,
}

impl TestApp {
    /// Create a new test application.
    pub fn new() -> Self {
        let project_store = ProjectStore::new();
        let usage_store = UsageStore::new();
        Self {
            projects: ProjectService::new(project_store.clone()),
            versions: VersionService::new(project_store.clone()),
            forks: ForkService::new(project_store.clone()),
            quota: QuotaService::new(usage_store.clone()),
            project_store,
            usage_store,
        }
    }

    /// Build a generation orchestrator over the shared stores.
    pub fn generation(&self, backend: Arc<dyn GenerationBackend>) -> GenerationService {
        GenerationService::new(self.project_store.clone(), self.quota.clone(), backend)
    }

    /// Create a user context with a usage account in the given state.
    pub async fn user_with_usage(&self, token_quota: u64, tokens_used: u64) -> RequestContext {
        let ctx = RequestContext::new(codehub_core::types::UserId::new());
        let mut account = UsageAccount::new(ctx.user_id, PlanType::Free);
        account.token_quota = token_quota;
        account.tokens_used = tokens_used;
        self.usage_store
            .insert(account)
            .await
            .expect("insert usage account");
        ctx
    }

    /// Create an empty project owned by `ctx`.
    pub async fn create_project(&self, ctx: &RequestContext, visibility: Visibility) -> Project {
        self.projects
            .create_project(
                ctx,
                CreateProject {
                    name: "test project".to_string(),
                    description: None,
                    tech_stack: vec![],
                    tags: vec![],
                    visibility,
                },
            )
            .await
            .expect("create project")
    }
}

/// A scripted generation backend for tests.
///
/// Returns a fixed reply, counts invocations, and can optionally delete
/// a project mid-call to force the saga's persist step to fail.
pub struct ScriptedBackend {
    /// Reply returned from `generate`; `Err` simulates a backend outage.
    reply: Result<String, String>,
    /// Number of `generate` calls observed.
    calls: AtomicUsize,
    /// When set, the project is deleted before the call returns.
    delete_before_return: Option<(ProjectStore, ProjectId)>,
}

impl ScriptedBackend {
    /// Backend that always succeeds with `output`.
    pub fn replying(output: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(output.to_string()),
            calls: AtomicUsize::new(0),
            delete_before_return: None,
        })
    }

    /// Backend that always fails (as on outage or timeout).
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            delete_before_return: None,
        })
    }

    /// Backend that succeeds but deletes `project_id` before returning,
    /// so the subsequent persist hits a missing project.
    pub fn deleting_project(output: &str, store: ProjectStore, project_id: ProjectId) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(output.to_string()),
            calls: AtomicUsize::new(0),
            delete_before_return: Some((store, project_id)),
        })
    }

    /// Number of `generate` calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for ScriptedBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedBackend")
            .field("reply", &self.reply)
            .finish()
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn backend_type(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((store, project_id)) = &self.delete_before_return {
            store.remove(*project_id).await.expect("remove project");
        }
        match &self.reply {
            Ok(output) => Ok(output.clone()),
            Err(message) => Err(AppError::generation_backend(message.clone())),
        }
    }
}
