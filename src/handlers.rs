use crate::{
    error::{AppError, AppResult},
    extract::{AppJson, AppPath},
    models::{
        CreateTodoRequest, DashboardResponse, ErrorBody, HealthStatus, Todo, UserListResponse,
    },
    repository::RepositoryState,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

// --- Public Handlers ---

/// health_check
///
/// [Public Route] Liveness probe for load balancers. Never consults the identity provider.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthStatus))
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

/// list_todos
///
/// [Public Route] Lists every to-do in the store, ordered by id.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "All to-dos", body = [Todo]),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_todos(State(repo): State<RepositoryState>) -> AppResult<Json<Vec<Todo>>> {
    let todos = repo.list_todos().await?;
    Ok(Json(todos))
}

/// get_todo
///
/// [Public Route] Fetches a single to-do by id.
#[utoipa::path(
    get,
    path = "/todos/{id}",
    params(("id" = i64, Path, description = "To-do id")),
    responses(
        (status = 200, description = "The to-do", body = Todo),
        (status = 400, description = "Id is not a number", body = ErrorBody),
        (status = 404, description = "No such to-do", body = ErrorBody)
    )
)]
pub async fn get_todo(
    State(repo): State<RepositoryState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Todo>> {
    repo.get_todo(id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Todo"))
}

/// create_todo
///
/// [Public Route] Adds a to-do. The title must contain at least one non-whitespace character.
#[utoipa::path(
    post,
    path = "/todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 201, description = "Created", body = Todo),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 415, description = "Not a JSON request", body = ErrorBody),
        (status = 422, description = "Missing or blank title", body = ErrorBody)
    )
)]
pub async fn create_todo(
    State(repo): State<RepositoryState>,
    AppJson(payload): AppJson<CreateTodoRequest>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".to_string()));
    }
    let todo = repo.create_todo(payload).await?;
    tracing::info!(todo_id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// not_found
///
/// Fallback for paths without a route. Under `/admin` it only runs for admitted requests.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route")
}

// --- Admin Handlers ---
// These only run after the admin gate has allowed the request.

/// admin_dashboard
///
/// [Admin Route] Landing payload for administrators.
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Not verified or not an admin", body = ErrorBody)
    )
)]
pub async fn admin_dashboard() -> Json<DashboardResponse> {
    Json(DashboardResponse {
        message: "Welcome to admin dashboard".to_string(),
    })
}

/// admin_users
///
/// [Admin Route] Lists the known user names.
#[utoipa::path(
    get,
    path = "/admin/users",
    responses(
        (status = 200, description = "User names", body = UserListResponse),
        (status = 401, description = "Not logged in", body = ErrorBody),
        (status = 403, description = "Not verified or not an admin", body = ErrorBody)
    )
)]
pub async fn admin_users() -> Json<UserListResponse> {
    Json(UserListResponse {
        users: vec!["Alice".to_string(), "Bob".to_string()],
    })
}
