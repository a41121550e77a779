//! Usage accounting entities.

pub mod account;
pub mod plan;

pub use account::{UsageAccount, UsageSnapshot};
pub use plan::PlanType;
