use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::{ErrorBody, Principal};

/// The path prefix owned by the admin route group.
pub const ADMIN_PREFIX: &str = "/admin";

// --- Denial Classification ---

/// Denial
///
/// Why the admin gate refused a request. The `Display` text is the client-facing reason
/// placed in the `{"error": ...}` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("User not logged in")]
    Unauthenticated,
    #[error("Email not verified")]
    Unverified,
    #[error("Admin access only")]
    InsufficientPrivilege,
}

impl Denial {
    pub fn status_code(self) -> StatusCode {
        match self {
            Denial::Unauthenticated => StatusCode::UNAUTHORIZED,
            Denial::Unverified | Denial::InsufficientPrivilege => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

// --- Predicate Set ---

/// A single pass/fail check against a principal snapshot.
pub type Predicate = fn(&Principal) -> Result<(), Denial>;

pub fn is_authenticated(principal: &Principal) -> Result<(), Denial> {
    if principal.is_authenticated {
        Ok(())
    } else {
        Err(Denial::Unauthenticated)
    }
}

pub fn is_email_verified(principal: &Principal) -> Result<(), Denial> {
    if principal.email_verified {
        Ok(())
    } else {
        Err(Denial::Unverified)
    }
}

pub fn is_privileged(principal: &Principal) -> Result<(), Denial> {
    if principal.is_privileged {
        Ok(())
    } else {
        Err(Denial::InsufficientPrivilege)
    }
}

/// GATE_CHAIN
///
/// The admin predicates in priority order: the most fundamental failure is reported first.
pub const GATE_CHAIN: [Predicate; 3] = [is_authenticated, is_email_verified, is_privileged];

// --- Chain Evaluator ---

/// GateOutcome
///
/// The terminal decision for one protected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Allow,
    Deny(Denial),
}

impl GateOutcome {
    pub fn is_allowed(self) -> bool {
        matches!(self, GateOutcome::Allow)
    }
}

/// evaluate_chain
///
/// Runs `chain` in order and stops at the first failing predicate. An empty chain allows.
pub fn evaluate_chain(principal: &Principal, chain: &[Predicate]) -> GateOutcome {
    match chain.iter().try_for_each(|check| check(principal)) {
        Ok(()) => GateOutcome::Allow,
        Err(denial) => GateOutcome::Deny(denial),
    }
}

/// evaluate
///
/// Evaluates the admin chain. A request without a resolvable principal is treated as not
/// logged in.
pub fn evaluate(principal: Option<&Principal>) -> GateOutcome {
    match principal {
        Some(principal) => evaluate_chain(principal, &GATE_CHAIN),
        None => GateOutcome::Deny(Denial::Unauthenticated),
    }
}

// --- Path Matcher ---

/// PathMatcher
///
/// Classifies request paths by a literal protected prefix. Both the prefix and the request
/// path are normalized first: repeated `/` separators collapse and a trailing `/` is dropped.
/// After that the test is a plain `starts_with`, so `/administrator` is covered by `/admin`.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    prefix: String,
}

impl PathMatcher {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: normalize(prefix),
        }
    }

    /// Matcher for the admin route group.
    pub fn admin() -> Self {
        Self::new(ADMIN_PREFIX)
    }

    pub fn is_protected(&self, path: &str) -> bool {
        normalize(path).starts_with(&self.prefix)
    }
}

/// Collapses empty segments: `//admin//users/` becomes `/admin/users`, `""` becomes `/`.
fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}
