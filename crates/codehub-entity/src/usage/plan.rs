//! Subscription plan enumeration and the quota table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Monthly token quota for the free plan.
pub const FREE_TOKENS: u64 = 10_000;
/// Monthly token quota for the pro plan.
pub const PRO_TOKENS: u64 = 100_000;
/// Monthly token quota for the enterprise plan.
pub const ENTERPRISE_TOKENS: u64 = 1_000_000;

/// Subscription plan tiers.
///
/// The plan → quota mapping is a closed constant table, not runtime
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// Default tier for every new account.
    Free,
    /// Paid individual tier.
    Pro,
    /// Paid organization tier.
    Enterprise,
}

impl PlanType {
    /// The token quota granted by this plan.
    pub fn token_quota(&self) -> u64 {
        match self {
            Self::Free => FREE_TOKENS,
            Self::Pro => PRO_TOKENS,
            Self::Enterprise => ENTERPRISE_TOKENS,
        }
    }

    /// Return the plan as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }
}

impl Default for PlanType {
    fn default() -> Self {
        Self::Free
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = codehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(codehub_core::AppError::validation(format!(
                "Invalid plan type: '{s}'. Expected one of: free, pro, enterprise"
            ))),
        }
    }
}
