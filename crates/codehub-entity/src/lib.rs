//! # codehub-entity
//!
//! Domain entity models for CodeHub. Every struct in this crate
//! represents a stored document or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod project;
pub mod usage;
