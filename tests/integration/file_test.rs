//! Integration tests for file operations.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, file_body};

#[tokio::test]
async fn test_create_file_records_client_address() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let id = Uuid::new_v4();

    let response = app
        .request_with_headers(
            "POST",
            &format!("/user/{user}/file"),
            Some(file_body(id, "report", "pdf", None)),
            &[("X-Forwarded-For", "203.0.113.5, 10.1.1.1")],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["id"], id.to_string());
    assert_eq!(data["name"], "report");
    assert_eq!(data["extension"], "pdf");
    assert_eq!(data["mimeType"], "application/octet-stream");
    assert_eq!(data["size"], 1024);
    assert_eq!(data["ipLocation"], "203.0.113.5");
    assert_eq!(data["status"], true);
}

#[tokio::test]
async fn test_create_file_without_client_address() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/user/{user}/file"),
            Some(file_body(Uuid::new_v4(), "Makefile", "", None)),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["extension"], "");
    assert_eq!(response.data()["ipLocation"], "unknown");
}

#[tokio::test]
async fn test_create_file_validation() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/user/{user}/file"),
            Some(json!({
                "id": Uuid::new_v4().to_string(),
                "name": "data",
                "size": -5,
                "createdDate": "2024-05-01",
                "status": true,
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.errors(),
        vec!["Missing extension", "Missing mimeType", "Invalid size"]
    );
}

#[tokio::test]
async fn test_same_name_different_extension() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    app.create_file(user, "report", "pdf", None).await;
    app.create_file(user, "report", "docx", None).await;

    let response = app
        .request(
            "POST",
            &format!("/user/{user}/file"),
            Some(file_body(Uuid::new_v4(), "report", "pdf", None)),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_in_missing_folder() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let response = app
        .request(
            "POST",
            &format!("/user/{user}/file"),
            Some(file_body(Uuid::new_v4(), "x", "bin", Some(Uuid::new_v4()))),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_rename_and_move_file() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let docs = app.create_folder(user, "Docs", None).await;
    let id = app.create_file(user, "draft", "txt", None).await;

    let response = app
        .request("GET", &format!("/user/{user}/file/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "draft");

    let response = app
        .request(
            "PUT",
            &format!("/user/{user}/file/{id}"),
            Some(json!({ "name": "final" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "final");
    assert_eq!(response.data()["extension"], "txt");

    let response = app
        .request(
            "PATCH",
            &format!("/user/{user}/file/{id}"),
            Some(json!({ "folderId": docs.to_string() })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folderId"], docs.to_string());

    let response = app
        .request(
            "PATCH",
            &format!("/user/{user}/file/{id}"),
            Some(json!({ "folderId": null })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["folderId"].is_null());
}

#[tokio::test]
async fn test_move_file_into_name_clash() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let docs = app.create_folder(user, "Docs", None).await;
    app.create_file(user, "plan", "md", Some(docs)).await;
    let loose = app.create_file(user, "plan", "md", None).await;

    let response = app
        .request(
            "PATCH",
            &format!("/user/{user}/file/{loose}"),
            Some(json!({ "folderId": docs.to_string() })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_file() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let id = app.create_file(user, "old", "log", None).await;

    let response = app
        .request("DELETE", &format!("/user/{user}/file/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["id"], id.to_string());
    assert_eq!(response.data()["status"], false);

    let response = app
        .request("DELETE", &format!("/user/{user}/file/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // A deleted file frees its name.
    app.create_file(user, "old", "log", None).await;
}

#[tokio::test]
async fn test_bad_file_id_in_path() {
    let app = TestApp::new();
    let user = Uuid::new_v4();

    let response = app
        .request("GET", &format!("/user/{user}/file/123"), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.errors(), vec!["Invalid fileId"]);
}

#[tokio::test]
async fn test_other_users_cannot_modify_file() {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let id = app.create_file(owner, "secret", "txt", None).await;

    let response = app
        .request("GET", &format!("/user/{stranger}/file/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            &format!("/user/{stranger}/file/{id}"),
            Some(json!({ "name": "mine" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
