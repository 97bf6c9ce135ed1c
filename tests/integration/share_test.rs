//! Integration tests for sharing and shared access.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, names};

#[tokio::test]
async fn test_share_folder_grants_read_access_to_subtree() {
    let app = TestApp::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let team = app.create_folder(alice, "Team", None).await;
    let specs = app.create_folder(alice, "Specs", Some(team)).await;
    let file = app.create_file(alice, "design", "md", Some(specs)).await;

    let response = app
        .request("GET", &format!("/user/{bob}/folder/{specs}"), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.share_folder(alice, team, bob).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folderId"], team.to_string());
    assert_eq!(response.data()["userId"], bob.to_string());
    assert_eq!(response.data()["status"], true);
    assert!(response.data().get("fileId").is_none());

    let response = app
        .request("GET", &format!("/user/{bob}/folder/{specs}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.data()["files"]), vec!["design"]);

    let response = app
        .request("GET", &format!("/user/{bob}/file/{file}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_shared_access_is_read_only() {
    let app = TestApp::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let team = app.create_folder(alice, "Team", None).await;
    app.share_folder(alice, team, bob).await;

    let response = app
        .request(
            "PUT",
            &format!("/user/{bob}/folder/{team}"),
            Some(json!({ "name": "Mine now" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/user/{bob}/folder/{team}"), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let carol = Uuid::new_v4();
    let response = app.share_folder(bob, team, carol).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unshare_folder_revokes_access() {
    let app = TestApp::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let team = app.create_folder(alice, "Team", None).await;
    app.share_folder(alice, team, bob).await;

    let response = app
        .request(
            "DELETE",
            &format!("/user/{alice}/folder/{team}/share/{bob}"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data(), &json!(true));

    let response = app
        .request("GET", &format!("/user/{bob}/folder/{team}"), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "DELETE",
            &format!("/user/{alice}/folder/{team}/share/{bob}"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Sharing again reactivates the same grant.
    let response = app.share_folder(alice, team, bob).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], true);
}

#[tokio::test]
async fn test_share_file_directly() {
    let app = TestApp::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let file = app.create_file(alice, "budget", "xlsx", None).await;

    let response = app
        .request(
            "POST",
            &format!("/user/{alice}/file/{file}/share"),
            Some(json!({ "userId": bob.to_string() })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["fileId"], file.to_string());

    let response = app
        .request("GET", &format!("/user/{bob}/file/{file}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "DELETE",
            &format!("/user/{alice}/file/{file}/share/{bob}"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/user/{bob}/file/{file}"), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_cannot_share_with_yourself() {
    let app = TestApp::new();
    let alice = Uuid::new_v4();
    let team = app.create_folder(alice, "Team", None).await;

    let response = app.share_folder(alice, team, alice).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.errors(), vec!["Cannot share an item with yourself"]);
}

#[tokio::test]
async fn test_share_request_validation() {
    let app = TestApp::new();
    let alice = Uuid::new_v4();
    let team = app.create_folder(alice, "Team", None).await;

    let response = app
        .request(
            "POST",
            &format!("/user/{alice}/folder/{team}/share"),
            Some(json!({})),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.errors(), vec!["Missing userId"]);

    let response = app
        .request(
            "POST",
            &format!("/user/{alice}/folder/{team}/share"),
            Some(json!({ "userId": "bob" })),
        )
        .await;
    assert_eq!(response.errors(), vec!["Invalid userId"]);
}

#[tokio::test]
async fn test_list_shared_with_me() {
    let app = TestApp::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let photos = app.create_folder(alice, "Photos", None).await;
    let gone = app.create_folder(alice, "Gone", None).await;
    let file = app.create_file(alice, "memo", "txt", None).await;
    app.share_folder(alice, photos, bob).await;
    app.share_folder(alice, gone, bob).await;
    app.request(
        "POST",
        &format!("/user/{alice}/file/{file}/share"),
        Some(json!({ "userId": bob.to_string() })),
    )
    .await;
    app.request("DELETE", &format!("/user/{alice}/folder/{gone}"), None)
        .await;

    let response = app.request("GET", &format!("/user/{bob}/shared"), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.data()["folders"]), vec!["Photos"]);
    assert_eq!(names(&response.data()["files"]), vec!["memo"]);

    let response = app
        .request("GET", &format!("/user/{alice}/shared"), None)
        .await;
    assert_eq!(names(&response.data()["folders"]), Vec::<String>::new());
}

#[tokio::test]
async fn test_breadcrumbs_start_at_shared_folder() {
    let app = TestApp::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let private = app.create_folder(alice, "Layoffs 2026", None).await;
    let shared = app.create_folder(alice, "Shared", Some(private)).await;
    let notes = app.create_folder(alice, "Notes", Some(shared)).await;
    app.share_folder(alice, shared, bob).await;

    let response = app
        .request("GET", &format!("/user/{bob}/folder/{private}"), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", &format!("/user/{bob}/folder/{notes}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.data()["breadcrumbs"]), vec!["Shared", "Notes"]);
    assert!(!response.body.to_string().contains(&private.to_string()));

    let response = app
        .request("GET", &format!("/user/{alice}/folder/{notes}"), None)
        .await;
    assert_eq!(
        names(&response.data()["breadcrumbs"]),
        vec!["Layoffs 2026", "Shared", "Notes"]
    );
}
