use admin_gate::{
    AppState, InMemoryRepository, StaticIdentity, create_router, models::Principal,
    repository::RepositoryState,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

async fn spawn_app(principal: Principal) -> TestApp {
    let repo = Arc::new(InMemoryRepository::new()) as RepositoryState;
    let state = AppState::new(repo, Arc::new(StaticIdentity::new(principal)));
    let router = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app(Principal::default()).await;
    let response = reqwest::get(format!("{}/health", app.address))
        .await
        .expect("req fail");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.json::<Value>().await.unwrap(), json!({"status": "ok"}));
}

#[tokio::test]
async fn test_admin_flow_over_the_wire() {
    let denied = spawn_app(Principal::new(true, true, false)).await;
    let response = reqwest::get(format!("{}/admin/dashboard", denied.address))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::FORBIDDEN);
    // Correlation headers are still attached to short-circuited responses.
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"error": "Admin access only"})
    );

    let admin = spawn_app(Principal::new(true, true, true)).await;
    let response = reqwest::get(format!("{}/admin/users", admin.address))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({"users": ["Alice", "Bob"]})
    );
}

#[tokio::test]
async fn test_todo_lifecycle() {
    // To-do routes are public: an anonymous-looking principal still works.
    let app = spawn_app(Principal::default()).await;
    let client = reqwest::Client::new();

    let created = client
        .post(format!("{}/todos", app.address))
        .json(&json!({"title": "Buy milk", "description": "2 litres"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), reqwest::StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    assert_eq!(created["id"], 1);
    assert_eq!(created["title"], "Buy milk");
    assert_eq!(created["done"], false);

    let listed: Value = client
        .get(format!("{}/", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([created]));

    let missing = client
        .get(format!("{}/todos/99", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_is_public() {
    let app = spawn_app(Principal::default()).await;
    let doc: Value = reqwest::get(format!("{}/api-docs/openapi.json", app.address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(doc["paths"]["/admin/users"].is_object());
    assert!(doc["paths"]["/health"].is_object());
}
