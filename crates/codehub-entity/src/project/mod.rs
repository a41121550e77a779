//! Project domain entities.

pub mod file;
pub mod model;
pub mod prompt;
pub mod version;
pub mod visibility;

pub use file::ProjectFile;
pub use model::{CreateProject, Project};
pub use prompt::PromptRecord;
pub use version::ProjectVersion;
pub use visibility::Visibility;
