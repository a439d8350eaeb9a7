use admin_gate::{
    gate::{
        self, Denial, GATE_CHAIN, GateOutcome, PathMatcher, Predicate, evaluate, evaluate_chain,
    },
    models::Principal,
};
use axum::http::StatusCode;

// --- Helpers ---

/// Every combination of the three principal flags.
fn all_principals() -> Vec<Principal> {
    let mut out = Vec::with_capacity(8);
    for authenticated in [false, true] {
        for verified in [false, true] {
            for privileged in [false, true] {
                out.push(Principal::new(authenticated, verified, privileged));
            }
        }
    }
    out
}

// --- Predicates ---

#[test]
fn test_predicates_check_only_their_own_flag() {
    let nobody = Principal::new(false, false, false);
    assert_eq!(gate::is_authenticated(&nobody), Err(Denial::Unauthenticated));
    assert_eq!(gate::is_email_verified(&nobody), Err(Denial::Unverified));
    assert_eq!(gate::is_privileged(&nobody), Err(Denial::InsufficientPrivilege));

    assert!(gate::is_authenticated(&Principal::new(true, false, false)).is_ok());
    assert!(gate::is_email_verified(&Principal::new(false, true, false)).is_ok());
    assert!(gate::is_privileged(&Principal::new(false, false, true)).is_ok());
}

#[test]
fn test_denial_status_codes_and_reasons() {
    assert_eq!(Denial::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(Denial::Unverified.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(Denial::InsufficientPrivilege.status_code(), StatusCode::FORBIDDEN);

    assert_eq!(Denial::Unauthenticated.to_string(), "User not logged in");
    assert_eq!(Denial::Unverified.to_string(), "Email not verified");
    assert_eq!(Denial::InsufficientPrivilege.to_string(), "Admin access only");
}

// --- Chain Evaluator ---

#[test]
fn test_unauthenticated_wins_regardless_of_other_flags() {
    for principal in all_principals().into_iter().filter(|p| !p.is_authenticated) {
        assert_eq!(
            evaluate(Some(&principal)),
            GateOutcome::Deny(Denial::Unauthenticated),
            "{principal:?}"
        );
    }
}

#[test]
fn test_unverified_reported_before_privilege() {
    for is_privileged in [false, true] {
        let principal = Principal::new(true, false, is_privileged);
        assert_eq!(
            evaluate(Some(&principal)),
            GateOutcome::Deny(Denial::Unverified)
        );
    }
}

#[test]
fn test_verified_non_admin_is_denied_privilege() {
    let principal = Principal::new(true, true, false);
    assert_eq!(
        evaluate(Some(&principal)),
        GateOutcome::Deny(Denial::InsufficientPrivilege)
    );
}

#[test]
fn test_only_full_principal_is_allowed() {
    for principal in all_principals() {
        let expected = principal.is_authenticated && principal.email_verified && principal.is_privileged;
        assert_eq!(evaluate(Some(&principal)).is_allowed(), expected, "{principal:?}");
    }
}

#[test]
fn test_missing_principal_is_unauthenticated() {
    assert_eq!(evaluate(None), GateOutcome::Deny(Denial::Unauthenticated));
}

#[test]
fn test_evaluation_is_idempotent() {
    for principal in all_principals() {
        let first = evaluate(Some(&principal));
        for _ in 0..5 {
            assert_eq!(evaluate(Some(&principal)), first);
        }
    }
}

#[test]
fn test_chain_stops_at_first_failure() {
    fn must_not_run(_: &Principal) -> Result<(), Denial> {
        panic!("predicate after a failure was evaluated");
    }
    let chain: [Predicate; 2] = [gate::is_authenticated, must_not_run];

    let outcome = evaluate_chain(&Principal::default(), &chain);
    assert_eq!(outcome, GateOutcome::Deny(Denial::Unauthenticated));
}

#[test]
fn test_empty_chain_allows() {
    assert_eq!(evaluate_chain(&Principal::default(), &[]), GateOutcome::Allow);
}

#[test]
fn test_gate_chain_priority_order() {
    let nobody = Principal::default();
    let reasons: Vec<Denial> = GATE_CHAIN
        .iter()
        .filter_map(|check| check(&nobody).err())
        .collect();
    assert_eq!(
        reasons,
        vec![Denial::Unauthenticated, Denial::Unverified, Denial::InsufficientPrivilege]
    );
}

// --- Path Matcher ---

#[test]
fn test_admin_paths_are_protected() {
    let matcher = PathMatcher::admin();
    for path in ["/admin", "/admin/", "/admin/dashboard", "/admin/users", "/admin/a/b/c"] {
        assert!(matcher.is_protected(path), "{path}");
    }
}

#[test]
fn test_public_paths_are_not_protected() {
    let matcher = PathMatcher::admin();
    for path in ["/", "", "/health", "/todos", "/todos/1", "/swagger-ui", "/users/admin"] {
        assert!(!matcher.is_protected(path), "{path}");
    }
}

#[test]
fn test_prefix_is_a_literal_string_match() {
    let matcher = PathMatcher::admin();
    assert!(matcher.is_protected("/administrator"));
    assert!(matcher.is_protected("/admin-panel"));
    assert!(matcher.is_protected("/adminx/users"));
    assert!(matcher.is_protected("//administrator/"));
    // Case-sensitive, like routing.
    assert!(!matcher.is_protected("/Admin/dashboard"));
    assert!(!matcher.is_protected("/adm"));
}

#[test]
fn test_repeated_slashes_are_normalized() {
    let matcher = PathMatcher::admin();
    assert!(matcher.is_protected("//admin"));
    assert!(matcher.is_protected("//admin//users"));
    assert!(matcher.is_protected("/admin///dashboard/"));
}

#[test]
fn test_nested_prefix() {
    let matcher = PathMatcher::new("/api/admin/");
    assert!(matcher.is_protected("/api/admin/users"));
    assert!(matcher.is_protected("/api/administrator"));
    assert!(!matcher.is_protected("/api/users"));
    assert!(!matcher.is_protected("/admin"));
}
