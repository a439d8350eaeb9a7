use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints that never consult the identity provider: the health probe and the to-do store.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Monitoring and load balancer probe.
        .route("/health", get(handlers::health_check))
        // GET /
        // Lists all to-dos.
        .route("/", get(handlers::list_todos))
        // POST /todos
        .route("/todos", post(handlers::create_todo))
        // GET /todos/{id}
        .route("/todos/{id}", get(handlers::get_todo))
}
