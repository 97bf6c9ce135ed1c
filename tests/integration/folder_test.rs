//! Integration tests for folder operations.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, folder_body, names};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["backend"], "memory");
    assert_eq!(response.data()["database"], true);
}

#[tokio::test]
async fn test_create_folder_returns_envelope() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let id = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/user/{user}/folder"),
            Some(folder_body(id, "  Projects  ", None)),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.errors(), Vec::<String>::new());
    assert_eq!(response.data()["id"], id.to_string());
    assert_eq!(response.data()["name"], "Projects");
    assert_eq!(response.data()["userId"], user.to_string());
    assert!(response.data()["parentId"].is_null());
    assert_eq!(response.data()["status"], true);
}

#[tokio::test]
async fn test_create_folder_reports_every_bad_field() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/user/{user}/folder"),
            Some(json!({
                "name": "",
                "parentId": "not-a-uuid",
                "status": false,
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert!(response.data().is_null());
    assert_eq!(
        response.errors(),
        vec![
            "Missing id",
            "Invalid name",
            "Invalid parentId",
            "Missing createdDate",
            "Invalid status",
        ]
    );
}

#[tokio::test]
async fn test_invalid_user_id_in_path() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/user/not-a-user/folder",
            Some(folder_body(Uuid::new_v4(), "Docs", None)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.errors(), vec!["Invalid userId"]);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let request = http::Request::builder()
        .method("POST")
        .uri(format!("/user/{user}/folder"))
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_duplicate_sibling_name_conflicts() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    app.create_folder(user, "Docs", None).await;

    let response = app
        .request(
            "POST",
            &format!("/user/{user}/folder"),
            Some(folder_body(Uuid::new_v4(), "Docs", None)),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // Same name is fine for another user and under another parent.
    app.create_folder(Uuid::new_v4(), "Docs", None).await;
    let parent = app.create_folder(user, "Archive", None).await;
    app.create_folder(user, "Docs", Some(parent)).await;
}

#[tokio::test]
async fn test_duplicate_id_conflicts() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let id = app.create_folder(user, "One", None).await;

    let response = app
        .request(
            "POST",
            &format!("/user/{user}/folder"),
            Some(folder_body(id, "Two", None)),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_contents_and_breadcrumbs() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let root = app.create_folder(user, "Root", None).await;
    let middle = app.create_folder(user, "Middle", Some(root)).await;
    app.create_folder(user, "Leaf B", Some(middle)).await;
    app.create_folder(user, "Leaf A", Some(middle)).await;
    app.create_file(user, "notes", "md", Some(middle)).await;

    let response = app
        .request("GET", &format!("/user/{user}/folder/{middle}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["folder"]["id"], middle.to_string());
    assert_eq!(names(&data["folders"]), vec!["Leaf A", "Leaf B"]);
    assert_eq!(names(&data["files"]), vec!["notes"]);
    assert_eq!(names(&data["breadcrumbs"]), vec!["Root", "Middle"]);
}

#[tokio::test]
async fn test_list_root_only_shows_top_level() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let top = app.create_folder(user, "Top", None).await;
    app.create_folder(user, "Nested", Some(top)).await;
    app.create_file(user, "readme", "txt", None).await;

    let response = app.request("GET", &format!("/user/{user}/folder"), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["folder"].is_null());
    assert_eq!(names(&response.data()["folders"]), vec!["Top"]);
    assert_eq!(names(&response.data()["files"]), vec!["readme"]);
}

#[tokio::test]
async fn test_rename_folder() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let id = app.create_folder(user, "Old", None).await;
    app.create_folder(user, "Taken", None).await;

    let response = app
        .request(
            "PUT",
            &format!("/user/{user}/folder/{id}"),
            Some(json!({ "name": "New" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "New");

    let response = app
        .request(
            "PUT",
            &format!("/user/{user}/folder/{id}"),
            Some(json!({ "name": "Taken" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "PUT",
            &format!("/user/{user}/folder/{id}"),
            Some(json!({ "name": "a/b" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.errors(), vec!["Invalid name"]);
}

#[tokio::test]
async fn test_move_folder_and_back_to_top_level() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let a = app.create_folder(user, "A", None).await;
    let b = app.create_folder(user, "B", None).await;

    let response = app
        .request(
            "PATCH",
            &format!("/user/{user}/folder/{b}"),
            Some(json!({ "parentId": a.to_string() })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["parentId"], a.to_string());

    let response = app
        .request(
            "PATCH",
            &format!("/user/{user}/folder/{b}"),
            Some(json!({ "parentId": null })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["parentId"].is_null());
}

#[tokio::test]
async fn test_move_into_descendant_is_rejected() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let a = app.create_folder(user, "A", None).await;
    let b = app.create_folder(user, "B", Some(a)).await;
    let c = app.create_folder(user, "C", Some(b)).await;

    for target in [a, c] {
        let response = app
            .request(
                "PATCH",
                &format!("/user/{user}/folder/{a}"),
                Some(json!({ "parentId": target.to_string() })),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    let response = app
        .request("GET", &format!("/user/{user}/folder/{a}"), None)
        .await;
    assert!(response.data()["folder"]["parentId"].is_null());
}

#[tokio::test]
async fn test_move_requires_parent_key() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let a = app.create_folder(user, "A", None).await;

    let response = app
        .request("PATCH", &format!("/user/{user}/folder/{a}"), Some(json!({})))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.errors(), vec!["Missing parentId"]);
}

#[tokio::test]
async fn test_delete_folder_cascades() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let top = app.create_folder(user, "Top", None).await;
    let child = app.create_folder(user, "Child", Some(top)).await;
    app.create_file(user, "a", "txt", Some(top)).await;
    let deep = app.create_file(user, "b", "txt", Some(child)).await;

    let response = app
        .request("DELETE", &format!("/user/{user}/folder/{top}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folders"], 2);
    assert_eq!(response.data()["files"], 2);

    for path in [
        format!("/user/{user}/folder/{top}"),
        format!("/user/{user}/folder/{child}"),
        format!("/user/{user}/file/{deep}"),
    ] {
        let response = app.request("GET", &path, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
    }

    // The name is free again once the old folder is gone.
    app.create_folder(user, "Top", None).await;
}

#[tokio::test]
async fn test_other_users_cannot_touch_folder() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let id = app.create_folder(owner, "Private", None).await;

    let response = app
        .request("GET", &format!("/user/{stranger}/folder/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/user/{stranger}/folder/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &format!("/user/{stranger}/folder"),
            Some(folder_body(Uuid::new_v4(), "Intruder", Some(id))),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();

    let response = app.request("GET", "/nowhere", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["success"], false);
}
