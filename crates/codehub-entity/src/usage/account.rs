//! Usage account entity.

use chrono::{DateTime, Days, Utc};
use serde::{Deserialize, Serialize};

use codehub_core::types::UserId;

use super::plan::PlanType;

/// Per-user token accounting state.
///
/// `tokens_used` only ever grows between resets and is kept at or below
/// `token_quota` by the quota ledger; a negative remaining balance cannot
/// be represented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageAccount {
    /// The identity this account belongs to (one account per identity).
    pub user_id: UserId,
    /// Current subscription plan.
    pub plan: PlanType,
    /// Token ceiling implied by the plan.
    pub token_quota: u64,
    /// Tokens consumed in the current period.
    pub tokens_used: u64,
    /// Subscription reference for paid plans.
    pub subscription_id: Option<String>,
    /// When the quota next resets.
    pub quota_reset_at: DateTime<Utc>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UsageAccount {
    /// Create a fresh account on the given plan with nothing consumed.
    pub fn new(user_id: UserId, plan: PlanType) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            plan,
            token_quota: plan.token_quota(),
            tokens_used: 0,
            subscription_id: None,
            quota_reset_at: next_reset(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Tokens still available in the current period.
    pub fn remaining_tokens(&self) -> u64 {
        self.token_quota.saturating_sub(self.tokens_used)
    }

    /// A read-only view of the current balance.
    pub fn snapshot(&self) -> UsageSnapshot {
        UsageSnapshot {
            user_id: self.user_id,
            plan: self.plan,
            token_quota: self.token_quota,
            tokens_used: self.tokens_used,
            remaining_tokens: self.remaining_tokens(),
            quota_reset_at: self.quota_reset_at,
        }
    }
}

/// Balance view returned by the quota ledger's read operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// The identity this balance belongs to.
    pub user_id: UserId,
    /// Current subscription plan.
    pub plan: PlanType,
    /// Token ceiling implied by the plan.
    pub token_quota: u64,
    /// Tokens consumed in the current period.
    pub tokens_used: u64,
    /// Tokens still available.
    pub remaining_tokens: u64,
    /// When the quota next resets.
    pub quota_reset_at: DateTime<Utc>,
}

/// The next quota reset boundary, 30 days out.
pub fn next_reset(from: DateTime<Utc>) -> DateTime<Utc> {
    from.checked_add_days(Days::new(30)).unwrap_or(from)
}
