use super::*;

const BOTH: RouteMeta = RouteMeta { requires_auth: true, redirect_if_auth: true };

#[test]
fn protected_route_redirects_unauthenticated_to_login_with_original_path() {
    for requested in ["/dashboard", "/processing/7?view=chart", "/profile#top"] {
        assert_eq!(
            evaluate(&RouteMeta::PROTECTED, false, requested),
            GuardDecision::RedirectToLogin { redirect: requested.to_owned() }
        );
    }
}

#[test]
fn protected_route_proceeds_when_authenticated() {
    assert_eq!(evaluate(&RouteMeta::PROTECTED, true, "/dashboard"), GuardDecision::Proceed);
}

#[test]
fn guest_only_route_redirects_authenticated_to_dashboard() {
    assert_eq!(evaluate(&RouteMeta::GUEST_ONLY, true, "/login"), GuardDecision::RedirectToDashboard);
}

#[test]
fn guest_only_route_proceeds_when_unauthenticated() {
    assert_eq!(evaluate(&RouteMeta::GUEST_ONLY, false, "/login"), GuardDecision::Proceed);
}

#[test]
fn public_route_always_proceeds() {
    assert_eq!(evaluate(&RouteMeta::PUBLIC, false, "/"), GuardDecision::Proceed);
    assert_eq!(evaluate(&RouteMeta::PUBLIC, true, "/"), GuardDecision::Proceed);
}

#[test]
fn requires_auth_wins_when_both_flags_set() {
    assert_eq!(
        evaluate(&BOTH, false, "/odd"),
        GuardDecision::RedirectToLogin { redirect: "/odd".to_owned() }
    );
    assert_eq!(evaluate(&BOTH, true, "/odd"), GuardDecision::Proceed);
}
