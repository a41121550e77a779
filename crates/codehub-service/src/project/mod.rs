//! Project services — CRUD, the version engine, and forking.

pub mod fork;
pub mod service;
pub mod version;

pub use fork::ForkService;
pub use service::ProjectService;
pub use version::VersionService;
