//! Generation prompt provenance record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A record of one AI generation run against a project.
///
/// Prompt history is provenance, not content: forks never inherit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// The prompt text submitted by the user.
    pub prompt_text: String,
    /// Tokens charged for this run (estimated, see the quota ledger).
    pub tokens_used: u64,
    /// Backend model that produced the output.
    pub model: String,
    /// When the generation completed.
    pub generated_at: DateTime<Utc>,
}
