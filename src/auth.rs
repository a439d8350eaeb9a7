use axum::extract::Request;
use std::sync::Arc;

use crate::models::Principal;

/// IdentityProvider
///
/// The read-only source of the acting principal. The admin gate asks it once per protected
/// request and works on the returned copy; no caller is ever handed a way to write back.
///
/// Returning `None` means the identity could not be determined, which the gate treats as an
/// unauthenticated request.
pub trait IdentityProvider: Send + Sync {
    fn principal_for(&self, request: &Request) -> Option<Principal>;
}

/// IdentityState
///
/// The shared handle stored in `AppState`.
pub type IdentityState = Arc<dyn IdentityProvider>;

/// StaticIdentity
///
/// Every request acts as the same configured principal. There is no session binding; the
/// principal changes only when the process is redeployed with new configuration.
#[derive(Debug, Clone, Copy)]
pub struct StaticIdentity {
    principal: Principal,
}

impl StaticIdentity {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }
}

impl IdentityProvider for StaticIdentity {
    fn principal_for(&self, _request: &Request) -> Option<Principal> {
        Some(self.principal)
    }
}

/// Anonymous
///
/// Resolves no principal at all. Used where no identity source is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn principal_for(&self, _request: &Request) -> Option<Principal> {
        None
    }
}
