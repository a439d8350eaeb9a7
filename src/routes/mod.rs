/// Router Module Index
///
/// Organizes routing into the two route groups. Access control is not applied here: the
/// admin gate in `lib.rs` wraps the whole router and decides by path prefix, so a route
/// cannot escape the gate by being registered in the wrong module.

/// Routes accessible to every client regardless of identity.
pub mod public;

/// Routes under `/admin`, reachable only after the admin gate allows the request.
pub mod admin;
