use axum::{
    Router,
    extract::{FromRef, Request, State},
    http::HeaderName,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod repository;

// Module for routing segregation (Public, Admin).
pub mod routes;
use routes::{admin, public};

// --- Public Re-exports ---

pub use auth::{IdentityProvider, IdentityState, StaticIdentity};
pub use config::AppConfig;
pub use gate::{GateOutcome, PathMatcher};
pub use repository::{InMemoryRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Auto-generated OpenAPI document, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health_check, handlers::list_todos, handlers::get_todo,
        handlers::create_todo, handlers::admin_dashboard, handlers::admin_users
    ),
    components(
        schemas(
            models::Principal, models::ErrorBody, models::HealthStatus,
            models::DashboardResponse, models::UserListResponse, models::Todo,
            models::CreateTodoRequest,
        )
    ),
    tags(
        (name = "admin-gate", description = "Public and admin routes behind a path-scoped gate")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container of everything a request needs. Cloning is cheap: the
/// store and identity source are shared behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// To-do store.
    pub repo: RepositoryState,
    /// Source of the acting principal, consulted per protected request.
    pub identity: IdentityState,
    /// Decides which paths the admin gate covers.
    pub admin_paths: PathMatcher,
}

impl AppState {
    /// Assembles the state with the standard admin path matcher.
    pub fn new(repo: RepositoryState, identity: IdentityState) -> Self {
        Self {
            repo,
            identity,
            admin_paths: PathMatcher::admin(),
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

/// admin_gate
///
/// The interceptor every request passes through before route dispatch.
///
/// Paths outside the admin prefix are handed to `next` untouched. For admin paths the
/// principal is resolved for this request only, the gate chain is evaluated, and a denial is
/// answered directly with its status code and `{"error": ...}` body; no handler runs.
pub async fn admin_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.admin_paths.is_protected(request.uri().path()) {
        return next.run(request).await;
    }

    let principal = state.identity.principal_for(&request);
    match gate::evaluate(principal.as_ref()) {
        GateOutcome::Allow => {
            tracing::debug!(path = %request.uri().path(), "admin gate: allowed");
            next.run(request).await
        }
        GateOutcome::Deny(denial) => {
            tracing::warn!(
                path = %request.uri().path(),
                reason = ?denial,
                status = denial.status_code().as_u16(),
                "admin gate: denied"
            );
            denial.into_response()
        }
    }
}

/// create_router
///
/// Assembles both route groups, wraps them in the admin gate, and adds the observability
/// layers.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .nest(gate::ADMIN_PREFIX, admin::admin_routes())
        // Registered before the gate layer so unknown admin paths are gated too.
        .fallback(handlers::not_found)
        // The gate wraps every route and the fallback; it decides by path, not by group.
        .layer(middleware::from_fn_with_state(state.clone(), admin_gate))
        .with_state(state);

    // 3. Observability and Correlation Layers (Applied outermost/first)
    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span so every log line, gate decisions included, carries the
/// request id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
