//! Keyed usage account store.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::RwLock;
use tracing::debug;

use codehub_core::AppError;
use codehub_core::types::UserId;
use codehub_entity::usage::UsageAccount;

/// In-memory usage account store keyed by [`UserId`].
///
/// The per-entry lock is what makes the quota ledger's check-and-increment
/// atomic: [`UsageStore::update`] holds the account's write lock for the
/// whole closure, so two concurrent debits for the same identity cannot
/// both read a stale balance.
#[derive(Debug, Clone, Default)]
pub struct UsageStore {
    /// Map of user ID to the lock-guarded account.
    entries: Arc<DashMap<UserId, Arc<RwLock<UsageAccount>>>>,
}

impl UsageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new account. Fails with a conflict if one already exists.
    pub async fn insert(&self, account: UsageAccount) -> Result<UsageAccount, AppError> {
        let user_id = account.user_id;
        match self.entries.entry(user_id) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Usage account for user {user_id} already exists"
            ))),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(RwLock::new(account.clone())));
                debug!(user_id = %user_id, "Usage account inserted");
                Ok(account)
            }
        }
    }

    /// Find an account by user ID, returning a detached copy.
    pub async fn find(&self, user_id: UserId) -> Result<Option<UsageAccount>, AppError> {
        let entry = self.entries.get(&user_id).map(|e| Arc::clone(e.value()));
        match entry {
            Some(lock) => Ok(Some(lock.read().await.clone())),
            None => Ok(None),
        }
    }

    /// Run a mutation against an account under its write lock.
    ///
    /// Returns `NotFound` if no account exists for the identity.
    pub async fn update<T, F>(&self, user_id: UserId, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut UsageAccount) -> Result<T, AppError>,
    {
        let lock = self
            .entries
            .get(&user_id)
            .map(|e| Arc::clone(e.value()))
            .ok_or_else(|| {
                AppError::not_found(format!("Usage account for user {user_id} not found"))
            })?;

        let mut account = lock.write().await;
        if !self.entries.contains_key(&user_id) {
            return Err(AppError::not_found(format!(
                "Usage account for user {user_id} not found"
            )));
        }
        f(&mut account)
    }

    /// Delete an account. Returns `true` if something was deleted.
    ///
    /// Takes the entry's write lock first, so removal serializes with
    /// [`UsageStore::update`] and cannot orphan an in-flight debit.
    pub async fn remove(&self, user_id: UserId) -> Result<bool, AppError> {
        let Some(lock) = self.entries.get(&user_id).map(|e| Arc::clone(e.value())) else {
            return Ok(false);
        };
        let _guard = lock.write().await;
        let removed = self.entries.remove(&user_id).is_some();
        if removed {
            debug!(user_id = %user_id, "Usage account removed");
        }
        Ok(removed)
    }

    /// Number of stored accounts.
    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(self.entries.len() as u64)
    }
}
