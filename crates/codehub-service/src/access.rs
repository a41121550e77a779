//! Project access policy.
//!
//! A pure, total predicate over (project, identity, intent): every input
//! yields either a permit or an `Authorization` error, with no side
//! effects. Safe to evaluate repeatedly.

use codehub_core::AppError;
use codehub_core::types::UserId;
use codehub_entity::project::Project;

/// What the caller wants to do with the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessIntent {
    /// Read the project's files, history, or metadata.
    Read,
    /// Mutate the project (append versions, change files, delete).
    Write,
}

/// Whether `user` may act on `project` with the given intent.
///
/// Writes are owner-only. Reads are permitted for the owner and, when the
/// project is public, for anyone.
pub fn can_access(project: &Project, user: UserId, intent: AccessIntent) -> bool {
    match intent {
        AccessIntent::Write => project.is_owned_by(user),
        AccessIntent::Read => project.is_owned_by(user) || project.visibility.is_public(),
    }
}

/// Policy check that fails with an `Authorization` error on denial.
pub fn require_access(
    project: &Project,
    user: UserId,
    intent: AccessIntent,
) -> Result<(), AppError> {
    if can_access(project, user, intent) {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "User {user} may not {} project {}",
            match intent {
                AccessIntent::Read => "read",
                AccessIntent::Write => "write",
            },
            project.id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use codehub_core::error::ErrorKind;
    use codehub_core::types::ProjectId;
    use codehub_entity::project::Visibility;

    fn project(owner: UserId, visibility: Visibility) -> Project {
        Project {
            id: ProjectId::new(),
            owner_id: owner,
            name: "p".to_string(),
            description: None,
            tech_stack: vec![],
            tags: vec![],
            files: vec![],
            versions: vec![],
            prompts: vec![],
            visibility,
            parent_project_id: None,
            forked_from_user_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_can_read_and_write() {
        let owner = UserId::new();
        let p = project(owner, Visibility::Private);
        assert!(can_access(&p, owner, AccessIntent::Read));
        assert!(can_access(&p, owner, AccessIntent::Write));
    }

    #[test]
    fn test_private_project_hidden_from_non_owner() {
        let p = project(UserId::new(), Visibility::Private);
        let stranger = UserId::new();
        assert!(!can_access(&p, stranger, AccessIntent::Read));
        assert!(!can_access(&p, stranger, AccessIntent::Write));
    }

    #[test]
    fn test_public_project_readable_not_writable() {
        let p = project(UserId::new(), Visibility::Public);
        let stranger = UserId::new();
        assert!(can_access(&p, stranger, AccessIntent::Read));
        assert!(!can_access(&p, stranger, AccessIntent::Write));
    }

    #[test]
    fn test_require_access_denial_kind() {
        let p = project(UserId::new(), Visibility::Private);
        let err = require_access(&p, UserId::new(), AccessIntent::Write).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
