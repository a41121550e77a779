//! Quota ledger — per-identity token accounting.

pub mod estimate;
pub mod service;

pub use estimate::estimate_tokens;
pub use service::QuotaService;
