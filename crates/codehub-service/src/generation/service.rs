//! Generation orchestrator — sequences the saga across the access
//! policy, the quota ledger, the backend, and the version engine.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use codehub_core::AppError;
use codehub_core::error::ErrorKind;
use codehub_core::traits::GenerationBackend;
use codehub_core::types::ProjectId;
use codehub_entity::project::{ProjectFile, PromptRecord};
use codehub_store::ProjectStore;

use crate::access::{AccessIntent, require_access};
use crate::context::RequestContext;
use crate::project::version::apply_version;
use crate::quota::{QuotaService, estimate_tokens};

use super::saga::{SagaError, SagaStage};

/// Path of the generated artifact within the project.
const GENERATED_FILE_PATH: &str = "src/AiGenerated.js";
/// Language tag of the generated artifact.
const GENERATED_FILE_LANGUAGE: &str = "javascript";

/// A request to generate code into a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The target project. The caller must own it.
    pub project_id: ProjectId,
    /// The prompt sent to the backend.
    pub prompt: String,
}

/// Result of a completed generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutcome {
    /// The mutated project.
    pub project_id: ProjectId,
    /// Always `true` for a returned outcome; failures are errors.
    pub success: bool,
    /// Human-readable summary, including tokens charged.
    pub message: String,
}

/// Orchestrates one generation request end to end.
///
/// The orchestrator alone knows the required order of operations; the
/// ledger and the project store have no awareness of each other. One
/// instance handles any number of concurrent requests — all state is
/// per-call.
#[derive(Debug, Clone)]
pub struct GenerationService {
    /// Project store (authorization reads and the persisting write).
    store: ProjectStore,
    /// Quota ledger.
    quota: QuotaService,
    /// The external generation backend.
    backend: Arc<dyn GenerationBackend>,
}

impl GenerationService {
    /// Creates a new generation orchestrator.
    pub fn new(store: ProjectStore, quota: QuotaService, backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            store,
            quota,
            backend,
        }
    }

    /// Runs the generation saga for one request.
    ///
    /// Stages, each terminal on failure with no automatic retry:
    /// 1. Authorizing — write-intent access check; side-effect free.
    /// 2. QuotaChecking — advisory balance read; side-effect free. The
    ///    authoritative check is the atomic debit in Billing, so a stale
    ///    read here can never overdraw.
    /// 3. Generating — one bounded backend call; side-effect free.
    /// 4. Billing — atomic `reserve_and_commit` of the estimated cost.
    /// 5. Persisting — upsert the generated artifact into the file set,
    ///    append the version snapshot, record prompt provenance. On
    ///    failure the billed tokens are refunded; a refund that itself
    ///    fails is surfaced as a billing race for operator reconciliation.
    pub async fn generate(
        &self,
        ctx: &RequestContext,
        req: GenerateRequest,
    ) -> Result<GenerateOutcome, SagaError> {
        let user_id = ctx.user_id;
        let project_id = req.project_id;

        // ── AUTHORIZING ───────────────────────────────────────────────
        let project = self
            .store
            .find(project_id)
            .await
            .and_then(|p| {
                p.ok_or_else(|| AppError::not_found(format!("Project {project_id} not found")))
            })
            .map_err(|e| SagaError::at(SagaStage::Authorizing, e))?;
        require_access(&project, user_id, AccessIntent::Write)
            .map_err(|e| SagaError::at(SagaStage::Authorizing, e))?;

        // ── QUOTA_CHECKING ────────────────────────────────────────────
        let cost = estimate_tokens(&req.prompt);
        let usage = self
            .quota
            .get_usage(user_id)
            .await
            .map_err(|e| SagaError::at(SagaStage::QuotaChecking, e))?;
        if usage.remaining_tokens < cost {
            return Err(SagaError::at(
                SagaStage::QuotaChecking,
                AppError::quota_exceeded(format!(
                    "Quota exceeded for user {user_id}: {cost} tokens requested, {} remaining",
                    usage.remaining_tokens
                )),
            ));
        }

        // ── GENERATING ────────────────────────────────────────────────
        let output = self
            .backend
            .generate(&req.prompt)
            .await
            .map_err(|e| SagaError::at(SagaStage::Generating, e))?;

        // ── BILLING ───────────────────────────────────────────────────
        self.quota
            .reserve_and_commit(user_id, cost)
            .await
            .map_err(|e| SagaError::at(SagaStage::Billing, e))?;

        // ── PERSISTING ────────────────────────────────────────────────
        let version_number = match self.persist(ctx, &req, cost, output).await {
            Ok(n) => n,
            Err(persist_err) => {
                warn!(
                    user_id = %user_id,
                    project_id = %project_id,
                    error = %persist_err,
                    "Persist failed after billing; refunding tokens"
                );
                return Err(self.compensate(ctx, cost, persist_err).await);
            }
        };

        info!(
            user_id = %user_id,
            project_id = %project_id,
            version = version_number,
            tokens = cost,
            "Generation completed"
        );
        Ok(GenerateOutcome {
            project_id,
            success: true,
            message: format!("AI generation completed. Tokens used: {cost}"),
        })
    }

    /// The persisting step: one serialized write against the project.
    ///
    /// The generated artifact replaces any existing file at its path and
    /// joins the rest of the current set; the version snapshot and the
    /// prompt record are committed under the same project lock, so a
    /// concurrent append can never interleave between them.
    async fn persist(
        &self,
        ctx: &RequestContext,
        req: &GenerateRequest,
        cost: u64,
        output: String,
    ) -> Result<u32, AppError> {
        let generated = ProjectFile::new(GENERATED_FILE_PATH, GENERATED_FILE_LANGUAGE, output);
        let message = format!("AI generation: {}", req.prompt);
        let model = self.backend.model().to_string();
        let now = Utc::now();

        self.store
            .update(req.project_id, move |project| {
                let mut new_files: Vec<ProjectFile> = project
                    .files
                    .iter()
                    .filter(|f| f.path != generated.path)
                    .cloned()
                    .collect();
                new_files.push(generated);

                let version_number = apply_version(project, &new_files, Some(&message), now)?;
                project.prompts.push(PromptRecord {
                    prompt_text: req.prompt.clone(),
                    tokens_used: cost,
                    model,
                    generated_at: now,
                });
                Ok(version_number)
            })
            .await
            .map_err(|e| {
                let message = format!("Failed to persist generated version: {}", e.message);
                AppError::with_source(ErrorKind::Persist, message, e)
            })
            .inspect(|version| {
                info!(
                    user_id = %ctx.user_id,
                    project_id = %req.project_id,
                    version = version,
                    "Generated version persisted"
                );
            })
    }

    /// Refunds a billed debit after a failed persist.
    ///
    /// When the refund succeeds the caller sees a clean persist failure;
    /// when it fails too, billing and project state have diverged and the
    /// error says so.
    async fn compensate(
        &self,
        ctx: &RequestContext,
        cost: u64,
        persist_err: AppError,
    ) -> SagaError {
        match self.quota.refund(ctx.user_id, cost).await {
            Ok(_) => SagaError::at(SagaStage::Persisting, persist_err),
            Err(refund_err) => {
                error!(
                    user_id = %ctx.user_id,
                    tokens = cost,
                    error = %refund_err,
                    "Refund failed after persist failure; ledger needs reconciliation"
                );
                SagaError::at(
                    SagaStage::Persisting,
                    AppError::billing_race(format!(
                        "Persist failed ({persist_err}) and refund of {cost} tokens also \
                         failed ({refund_err}); usage ledger needs reconciliation"
                    )),
                )
            }
        }
    }
}
