//! Quota ledger service — balance reads, atomic debits, plan changes.

use chrono::Utc;
use tracing::{info, warn};

use codehub_core::AppError;
use codehub_core::types::UserId;
use codehub_entity::usage::account::next_reset;
use codehub_entity::usage::{PlanType, UsageAccount, UsageSnapshot};
use codehub_store::UsageStore;

/// Manages per-identity usage accounts.
///
/// The debit path is the critical one: `reserve_and_commit` performs the
/// balance check and the increment under the account's write lock, so the
/// check-then-act race between concurrent requests for the same identity
/// cannot overdraw the quota. Callers must not rely on their own earlier
/// balance read.
#[derive(Debug, Clone)]
pub struct QuotaService {
    /// Usage account store.
    store: UsageStore,
}

impl QuotaService {
    /// Creates a new quota service.
    pub fn new(store: UsageStore) -> Self {
        Self { store }
    }

    /// Creates a usage account for a newly onboarded identity.
    ///
    /// Every account starts on the free plan with nothing consumed.
    /// Fails with a conflict if the identity already has an account.
    pub async fn create_account(&self, user_id: UserId) -> Result<UsageAccount, AppError> {
        let account = self
            .store
            .insert(UsageAccount::new(user_id, PlanType::Free))
            .await?;

        info!(user_id = %user_id, plan = %account.plan, "Usage account created");
        Ok(account)
    }

    /// Reads the current balance for an identity.
    pub async fn get_usage(&self, user_id: UserId) -> Result<UsageSnapshot, AppError> {
        let account = self
            .store
            .find(user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Usage account for user {user_id} not found"))
            })?;
        Ok(account.snapshot())
    }

    /// Atomically checks the balance and commits a debit of `amount`.
    ///
    /// Fails with `QuotaExceeded` when the remaining balance cannot cover
    /// the amount; on success returns the post-debit balance view.
    pub async fn reserve_and_commit(
        &self,
        user_id: UserId,
        amount: u64,
    ) -> Result<UsageSnapshot, AppError> {
        let snapshot = self
            .store
            .update(user_id, |account| {
                let remaining = account.remaining_tokens();
                if remaining < amount {
                    return Err(AppError::quota_exceeded(format!(
                        "Quota exceeded for user {user_id}: {amount} tokens requested, {remaining} remaining"
                    )));
                }
                account.tokens_used += amount;
                account.updated_at = Utc::now();
                Ok(account.snapshot())
            })
            .await?;

        info!(
            user_id = %user_id,
            tokens = amount,
            remaining = snapshot.remaining_tokens,
            "Tokens debited"
        );
        Ok(snapshot)
    }

    /// Returns previously committed tokens to the balance.
    ///
    /// Compensation path only: used when a later saga step fails after a
    /// debit has committed. Saturates at zero rather than underflowing.
    pub async fn refund(&self, user_id: UserId, amount: u64) -> Result<UsageSnapshot, AppError> {
        let snapshot = self
            .store
            .update(user_id, |account| {
                account.tokens_used = account.tokens_used.saturating_sub(amount);
                account.updated_at = Utc::now();
                Ok(account.snapshot())
            })
            .await?;

        warn!(
            user_id = %user_id,
            tokens = amount,
            "Tokens refunded after failed persist"
        );
        Ok(snapshot)
    }

    /// Switches an identity to a new plan.
    ///
    /// Consumption resets to zero, the quota is re-derived from the plan
    /// table, and the reset boundary advances.
    pub async fn set_plan(
        &self,
        user_id: UserId,
        plan: PlanType,
        subscription_id: Option<String>,
    ) -> Result<UsageAccount, AppError> {
        let account = self
            .store
            .update(user_id, |account| {
                let now = Utc::now();
                account.plan = plan;
                account.token_quota = plan.token_quota();
                account.tokens_used = 0;
                account.subscription_id = subscription_id.clone();
                account.quota_reset_at = next_reset(now);
                account.updated_at = now;
                Ok(account.clone())
            })
            .await?;

        info!(user_id = %user_id, plan = %plan, "Plan changed");
        Ok(account)
    }
}
