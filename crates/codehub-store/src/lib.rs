//! # codehub-store
//!
//! Keyed document stores for CodeHub. The persistence contract is
//! deliberately small — find, save, delete — with one addition the
//! domain requires: closure-based `update`, which runs a read-modify-write
//! under a per-entry lock so concurrent mutations of the same project or
//! usage account are serialized while unrelated entries proceed in
//! parallel.
//!
//! The implementation is in-memory (a `DashMap` of `tokio::sync::RwLock`
//! entries); the storage engine behind the contract is out of scope.

pub mod project;
pub mod usage;

pub use project::ProjectStore;
pub use usage::UsageStore;
