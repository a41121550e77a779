//! Saga stages and stage-tagged failures.
//!
//! A generation request spans two independently owned resources (the
//! quota ledger and the project store) plus an external backend, with no
//! shared transaction. Every failure therefore carries the stage it
//! occurred in, so callers and operators can tell side-effect-free
//! rejections apart from partial failures that may need reconciliation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use codehub_core::AppError;

/// The stages a generation request moves through, in execution order.
///
/// Billing runs before persisting: the atomic debit is the authoritative
/// quota gate, and a failed persist is compensated by a refund. The race
/// window this leaves costs the system tokens (generation ran, refund
/// succeeded), never the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SagaStage {
    /// Write-intent access check. No side effects.
    Authorizing,
    /// Advisory balance read and cost estimation. No side effects.
    QuotaChecking,
    /// The single bounded backend call. No state committed.
    Generating,
    /// Atomic token debit against the ledger.
    Billing,
    /// Version append plus prompt record. Refunds the debit on failure.
    Persisting,
}

impl SagaStage {
    /// Whether a failure in this stage can leave partial state behind.
    ///
    /// Only a persisting failure whose refund also failed is truly
    /// partial; everything up to and including billing either commits
    /// nothing or is fully compensated.
    pub fn is_side_effect_free(&self) -> bool {
        matches!(
            self,
            Self::Authorizing | Self::QuotaChecking | Self::Generating
        )
    }
}

impl fmt::Display for SagaStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authorizing => "AUTHORIZING",
            Self::QuotaChecking => "QUOTA_CHECKING",
            Self::Generating => "GENERATING",
            Self::Billing => "BILLING",
            Self::Persisting => "PERSISTING",
        };
        write!(f, "{name}")
    }
}

/// A generation failure tagged with the stage it occurred in.
#[derive(Debug, Error)]
#[error("generation failed at {stage}: {source}")]
pub struct SagaError {
    /// The stage that failed.
    pub stage: SagaStage,
    /// The underlying typed error.
    #[source]
    pub source: AppError,
}

impl SagaError {
    /// Tags an error with the stage it occurred in.
    pub fn at(stage: SagaStage, source: AppError) -> Self {
        Self { stage, source }
    }
}

impl From<SagaError> for AppError {
    fn from(err: SagaError) -> Self {
        let kind = err.source.kind;
        AppError::with_source(kind, format!("generation failed at {}", err.stage), err)
    }
}
