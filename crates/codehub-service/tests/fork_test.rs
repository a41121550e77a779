//! Integration tests for fork isolation.

mod helpers;

use codehub_entity::project::{ProjectFile, Visibility};

use helpers::TestApp;

#[tokio::test]
async fn test_mutating_fork_leaves_source_untouched() {
    let app = TestApp::new();
    let owner = app.user_with_usage(1_000, 0).await;
    let source = app.create_project(&owner, Visibility::Public).await;
    app.versions
        .append_version(
            &owner,
            source.id,
            vec![ProjectFile::new("src/a.js", "javascript", "upstream")],
            Some("upstream edit"),
        )
        .await
        .unwrap();

    let forker = app.user_with_usage(1_000, 0).await;
    let fork = app.forks.fork_project(&forker, source.id).await.unwrap();

    app.versions
        .append_version(
            &forker,
            fork.id,
            vec![ProjectFile::new("src/a.js", "javascript", "fork edit")],
            Some("fork edit"),
        )
        .await
        .unwrap();

    let source_after = app.projects.get_project(&owner, source.id).await.unwrap();
    assert_eq!(source_after.files[0].content, "upstream");
    assert_eq!(source_after.versions.len(), 2);
    for version in &source_after.versions {
        for file in &version.files_snapshot {
            assert_ne!(file.content, "fork edit");
        }
    }
}

#[tokio::test]
async fn test_mutating_source_leaves_fork_untouched() {
    let app = TestApp::new();
    let owner = app.user_with_usage(1_000, 0).await;
    let source = app.create_project(&owner, Visibility::Public).await;
    app.versions
        .append_version(
            &owner,
            source.id,
            vec![ProjectFile::new("src/a.js", "javascript", "upstream")],
            None,
        )
        .await
        .unwrap();

    let forker = app.user_with_usage(1_000, 0).await;
    let fork = app.forks.fork_project(&forker, source.id).await.unwrap();

    app.versions
        .append_version(
            &owner,
            source.id,
            vec![ProjectFile::new("src/a.js", "javascript", "after fork")],
            None,
        )
        .await
        .unwrap();

    let fork_after = app.projects.get_project(&forker, fork.id).await.unwrap();
    assert_eq!(fork_after.files[0].content, "upstream");
    assert_eq!(fork_after.versions.len(), 2);
}

#[tokio::test]
async fn test_fork_preserves_numbering_not_continuation() {
    let app = TestApp::new();
    let owner = app.user_with_usage(1_000, 0).await;
    let source = app.create_project(&owner, Visibility::Public).await;
    for i in 0..3 {
        app.versions
            .append_version(
                &owner,
                source.id,
                vec![ProjectFile::new(
                    "src/a.js",
                    "javascript",
                    format!("edit {i}"),
                )],
                None,
            )
            .await
            .unwrap();
    }

    let forker = app.user_with_usage(1_000, 0).await;
    let fork = app.forks.fork_project(&forker, source.id).await.unwrap();

    // The fork's history is a copy of 1..=4; its next append is 5.
    let numbers: Vec<u32> = fork.versions.iter().map(|v| v.version_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);

    let updated = app
        .versions
        .append_version(
            &forker,
            fork.id,
            vec![ProjectFile::new("src/b.js", "javascript", "fork edit")],
            None,
        )
        .await
        .unwrap();
    assert_eq!(updated.current_version().unwrap().version_number, 5);
}
