use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Nested under `ADMIN_PREFIX`. Handlers here perform no checks of their own; by the time
/// one runs, the admin gate has already confirmed the principal is logged in, verified and
/// privileged.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/dashboard
        .route("/dashboard", get(handlers::admin_dashboard))
        // GET /admin/users
        .route("/users", get(handlers::admin_users))
}
