use super::*;
use crate::api::types::User;

fn signed_in() -> Session {
    let user: User = serde_json::from_value(serde_json::json!({ "id": 1, "name": "A" })).unwrap();
    Session { token: Some("abc".to_owned()), user: Some(user) }
}

fn navigator() -> Navigator {
    Navigator::new(RouteTable::app_default())
}

// =============================================================
// navigate
// =============================================================

#[test]
fn protected_route_while_signed_out_goes_to_login_with_return_path() {
    let nav = navigator();
    let res = nav.navigate("/dashboard", &Session::default());
    assert_eq!(res.route.map(|r| r.name), Some("Dashboard"));
    assert_eq!(res.decision, GuardDecision::RedirectToLogin { redirect: "/dashboard".to_owned() });
    assert_eq!(res.location, "/login?redirect=%2Fdashboard");
}

#[test]
fn protected_route_while_signed_in_proceeds() {
    let nav = navigator();
    let res = nav.navigate("/processing/9", &signed_in());
    assert_eq!(res.decision, GuardDecision::Proceed);
    assert_eq!(res.location, "/processing/9");
    assert_eq!(res.params.get("id").map(String::as_str), Some("9"));
}

#[test]
fn login_while_signed_in_goes_to_dashboard() {
    let nav = navigator();
    let res = nav.navigate("/login", &signed_in());
    assert_eq!(res.decision, GuardDecision::RedirectToDashboard);
    assert_eq!(res.location, "/dashboard");
}

#[test]
fn register_while_signed_out_proceeds() {
    let nav = navigator();
    let res = nav.navigate("/register", &Session::default());
    assert_eq!(res.decision, GuardDecision::Proceed);
    assert_eq!(res.location, "/register");
}

#[test]
fn unknown_path_falls_through_to_not_found() {
    let nav = navigator();
    let res = nav.navigate("/nope", &Session::default());
    assert_eq!(res.route.map(|r| r.name), Some("NotFound"));
    assert_eq!(res.decision, GuardDecision::Proceed);
}

#[test]
fn unmatched_path_without_catch_all_proceeds() {
    let nav = Navigator::new(RouteTable::new(Vec::new()));
    let res = nav.navigate("/anything", &Session::default());
    assert!(res.route.is_none());
    assert_eq!(res.decision, GuardDecision::Proceed);
}

#[test]
fn every_navigation_reads_current_session() {
    let nav = navigator();
    let mut session = Session::default();
    assert!(matches!(nav.navigate("/profile", &session).decision, GuardDecision::RedirectToLogin { .. }));
    session = signed_in();
    assert_eq!(nav.navigate("/profile", &session).decision, GuardDecision::Proceed);
    session = Session::default();
    assert!(matches!(nav.navigate("/profile", &session).decision, GuardDecision::RedirectToLogin { .. }));
}

#[test]
fn empty_token_counts_as_signed_out() {
    let session = Session { token: Some(String::new()), user: None };
    assert!(matches!(navigator().navigate("/dashboard", &session).decision, GuardDecision::RedirectToLogin { .. }));
}

#[test]
fn custom_paths_are_used_for_redirects() {
    let nav = navigator().with_login_path("/signin").with_dashboard_path("/home");
    assert_eq!(nav.navigate("/dashboard", &Session::default()).location, "/signin?redirect=%2Fdashboard");
    assert_eq!(nav.navigate("/login", &signed_in()).location, "/home");
}

// =============================================================
// redirect round-trip
// =============================================================

#[test]
fn login_location_encodes_query_in_redirect() {
    let nav = navigator();
    let location = nav.login_location("/processing/3?view=chart&x=1");
    assert_eq!(location, "/login?redirect=%2Fprocessing%2F3%3Fview%3Dchart%26x%3D1");
    assert_eq!(redirect_param(&location).as_deref(), Some("/processing/3?view=chart&x=1"));
}

#[test]
fn redirect_param_absent() {
    assert_eq!(redirect_param("/login"), None);
    assert_eq!(redirect_param("/login?next=%2Fa"), None);
}

#[test]
fn post_login_target_uses_safe_redirect() {
    let nav = navigator();
    assert_eq!(nav.post_login_target(Some("/profile")), "/profile");
    assert_eq!(nav.post_login_target(Some("/processing/3?view=chart")), "/processing/3?view=chart");
}

#[test]
fn post_login_target_rejects_unsafe_or_missing_redirect() {
    let nav = navigator();
    assert_eq!(nav.post_login_target(None), "/dashboard");
    assert_eq!(nav.post_login_target(Some("https://evil.example")), "/dashboard");
    assert_eq!(nav.post_login_target(Some("//evil.example")), "/dashboard");
    assert_eq!(nav.post_login_target(Some("/\\evil.example")), "/dashboard");
    assert_eq!(nav.post_login_target(Some("/login?redirect=%2Fx")), "/dashboard");
}
