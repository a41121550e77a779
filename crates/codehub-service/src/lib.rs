//! # codehub-service
//!
//! Business logic services for CodeHub. Composes the stores, the access
//! policy, the quota ledger, the project version engine, and the
//! generation orchestrator. Collaborators arrive through constructors;
//! nothing here reaches into global state.

pub mod access;
pub mod context;
pub mod generation;
pub mod project;
pub mod quota;

pub use context::RequestContext;
