//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use drivetree_api::{AppState, build_app};
use drivetree_core::config::AppConfig;
use drivetree_database::{MemoryDatabase, Stores};

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Backing store, for direct inspection
    pub db: MemoryDatabase,
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body as JSON (`Null` when empty)
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of the envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `errors` member of the envelope as strings.
    pub fn errors(&self) -> Vec<String> {
        self.body["errors"]
            .as_array()
            .map(|errs| {
                errs.iter()
                    .filter_map(|e| e.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application over a fresh in-memory backend
    pub fn new() -> Self {
        let db = MemoryDatabase::new();
        let state = AppState::new(AppConfig::in_memory(), Stores::memory(db.clone()));
        Self {
            router: build_app(state),
            db,
        }
    }

    /// Make a request against the router
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request_with_headers(method, path, body, &[]).await
    }

    /// Make a request with extra headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Send a fully built request
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a folder through the API and return its id
    pub async fn create_folder(&self, user: Uuid, name: &str, parent: Option<Uuid>) -> Uuid {
        let id = Uuid::new_v4();
        let response = self
            .request(
                "POST",
                &format!("/user/{user}/folder"),
                Some(folder_body(id, name, parent)),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        id
    }

    /// Create a file through the API and return its id
    pub async fn create_file(
        &self,
        user: Uuid,
        name: &str,
        extension: &str,
        folder: Option<Uuid>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let response = self
            .request(
                "POST",
                &format!("/user/{user}/file"),
                Some(file_body(id, name, extension, folder)),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        id
    }

    /// Share a folder through the API
    pub async fn share_folder(&self, owner: Uuid, folder: Uuid, target: Uuid) -> TestResponse {
        self.request(
            "POST",
            &format!("/user/{owner}/folder/{folder}/share"),
            Some(json!({ "userId": target.to_string() })),
        )
        .await
    }
}

/// A valid folder creation body
pub fn folder_body(id: Uuid, name: &str, parent: Option<Uuid>) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "parentId": parent.map(|p| p.to_string()),
        "createdDate": "2024-05-01T09:30:00Z",
        "status": true,
    })
}

/// A valid file creation body
pub fn file_body(id: Uuid, name: &str, extension: &str, folder: Option<Uuid>) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "extension": extension,
        "mimeType": "application/octet-stream",
        "size": 1024,
        "folderId": folder.map(|f| f.to_string()),
        "createdDate": "2024-05-01",
        "status": true,
    })
}

/// Names of the entries in a JSON array, in order
pub fn names(items: &Value) -> Vec<String> {
    items
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|i| i["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
