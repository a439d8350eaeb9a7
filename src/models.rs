use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Identity ---

/// Principal
///
/// The acting identity of a request. The three flags are the only inputs the admin gate
/// reads; a request always works on its own copy, so handlers can never change what the
/// next request sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Principal {
    pub is_authenticated: bool,
    pub email_verified: bool,
    // Administrator privilege.
    pub is_privileged: bool,
}

impl Principal {
    pub const fn new(is_authenticated: bool, email_verified: bool, is_privileged: bool) -> Self {
        Self {
            is_authenticated,
            email_verified,
            is_privileged,
        }
    }
}

// --- API Response Schemas ---

/// ErrorBody
///
/// The only shape the service uses for failures, whether a gate denial or a handler error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct HealthStatus {
    pub status: String,
}

/// Payload of `GET /admin/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct DashboardResponse {
    pub message: String,
}

/// Payload of `GET /admin/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserListResponse {
    pub users: Vec<String>,
}

// --- To-do Store ---

/// Todo
///
/// A row of the `todos` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
pub struct Todo {
    #[ts(type = "number")]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub done: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// CreateTodoRequest
///
/// Input for `POST /todos`. `done` and `created_at` are always assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: Option<String>,
}
