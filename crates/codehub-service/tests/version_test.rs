//! Integration tests for the append-only version engine.

mod helpers;

use codehub_entity::project::{ProjectFile, Visibility};

use helpers::TestApp;

#[tokio::test]
async fn test_version_numbers_are_dense_and_ordered() {
    let app = TestApp::new();
    let ctx = app.user_with_usage(1_000, 0).await;
    let project = app.create_project(&ctx, Visibility::Private).await;

    for i in 0..5 {
        app.versions
            .append_version(
                &ctx,
                project.id,
                vec![ProjectFile::new(
                    "src/main.js",
                    "javascript",
                    format!("edit {i}"),
                )],
                Some(&format!("edit {i}")),
            )
            .await
            .expect("append");
    }

    let history = app.versions.list_versions(&ctx, project.id).await.unwrap();
    assert_eq!(history.len(), 6);
    for (i, version) in history.iter().enumerate() {
        assert_eq!(version.version_number, i as u32 + 1);
    }
}

#[tokio::test]
async fn test_prior_snapshots_survive_later_appends() {
    let app = TestApp::new();
    let ctx = app.user_with_usage(1_000, 0).await;
    let project = app.create_project(&ctx, Visibility::Private).await;

    app.versions
        .append_version(
            &ctx,
            project.id,
            vec![ProjectFile::new("src/a.js", "javascript", "version two")],
            Some("v2"),
        )
        .await
        .unwrap();

    let snapshot_after_append = app
        .versions
        .list_versions(&ctx, project.id)
        .await
        .unwrap()[1]
        .clone();

    // Five more appends, same path, different content.
    for i in 0..5 {
        app.versions
            .append_version(
                &ctx,
                project.id,
                vec![ProjectFile::new(
                    "src/a.js",
                    "javascript",
                    format!("later {i}"),
                )],
                None,
            )
            .await
            .unwrap();
    }

    let snapshot_later = app
        .versions
        .list_versions(&ctx, project.id)
        .await
        .unwrap()[1]
        .clone();

    assert_eq!(snapshot_after_append, snapshot_later);
    assert_eq!(snapshot_later.files_snapshot[0].content, "version two");
}

#[tokio::test]
async fn test_identical_appends_are_distinct_versions() {
    let app = TestApp::new();
    let ctx = app.user_with_usage(1_000, 0).await;
    let project = app.create_project(&ctx, Visibility::Private).await;

    let files = vec![ProjectFile::new("src/a.js", "javascript", "same content")];
    app.versions
        .append_version(&ctx, project.id, files.clone(), Some("edit"))
        .await
        .unwrap();
    app.versions
        .append_version(&ctx, project.id, files, Some("edit"))
        .await
        .unwrap();

    let history = app.versions.list_versions(&ctx, project.id).await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].files_snapshot[0].content, "same content");
    assert_eq!(history[2].files_snapshot[0].content, "same content");
}

#[tokio::test]
async fn test_concurrent_appends_never_collide() {
    let app = TestApp::new();
    let ctx = app.user_with_usage(1_000, 0).await;
    let project = app.create_project(&ctx, Visibility::Private).await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let versions = app.versions.clone();
        let ctx = ctx;
        let project_id = project.id;
        handles.push(tokio::spawn(async move {
            versions
                .append_version(
                    &ctx,
                    project_id,
                    vec![ProjectFile::new(
                        "src/a.js",
                        "javascript",
                        format!("concurrent {i}"),
                    )],
                    None,
                )
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let history = app.versions.list_versions(&ctx, project.id).await.unwrap();
    assert_eq!(history.len(), 21);
    for (i, version) in history.iter().enumerate() {
        assert_eq!(version.version_number, i as u32 + 1);
    }
}

#[tokio::test]
async fn test_appends_to_different_projects_are_independent() {
    let app = TestApp::new();
    let ctx = app.user_with_usage(1_000, 0).await;
    let first = app.create_project(&ctx, Visibility::Private).await;
    let second = app.create_project(&ctx, Visibility::Private).await;

    app.versions
        .append_version(
            &ctx,
            first.id,
            vec![ProjectFile::new("src/a.js", "javascript", "first only")],
            None,
        )
        .await
        .unwrap();

    let second_history = app.versions.list_versions(&ctx, second.id).await.unwrap();
    assert_eq!(second_history.len(), 1);
}
