//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use codehub_core::types::UserId;

/// Context for the current authenticated request.
///
/// Built by the entry point after the Identity Verifier has accepted the
/// credential, then passed into service methods so that every operation
/// knows *who* is acting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's stable identity.
    pub user_id: UserId,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context for a verified identity.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }
}
