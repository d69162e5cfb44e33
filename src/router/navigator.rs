//! Runs the guard for a requested location against the current session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Called synchronously before every transition. The navigator only decides
//! where to go; it never mutates the session.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::collections::BTreeMap;

use super::guard::{GuardDecision, evaluate};
use super::{DASHBOARD_PATH, LOGIN_PATH, RouteDescriptor, RouteMeta, RouteTable};
use crate::session::Session;

const REDIRECT_PARAM: &str = "redirect";

/// Outcome of one navigation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// Location as requested.
    pub requested: String,
    /// Route the requested location matched, if any.
    pub route: Option<&'a RouteDescriptor>,
    pub params: BTreeMap<String, String>,
    pub decision: GuardDecision,
    /// Where the app ends up after the guard ran.
    pub location: String,
}

#[derive(Clone, Debug)]
pub struct Navigator {
    table: RouteTable,
    login_path: String,
    dashboard_path: String,
}

impl Navigator {
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self { table, login_path: LOGIN_PATH.to_owned(), dashboard_path: DASHBOARD_PATH.to_owned() }
    }

    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    #[must_use]
    pub fn with_dashboard_path(mut self, path: impl Into<String>) -> Self {
        self.dashboard_path = path.into();
        self
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve `requested` and run the guard against `session`.
    ///
    /// Unmatched locations carry no access flags and proceed.
    #[must_use]
    pub fn navigate(&self, requested: &str, session: &Session) -> Resolution<'_> {
        let matched = self.table.resolve(requested);
        let meta = matched.as_ref().map_or(RouteMeta::PUBLIC, |m| m.route.meta);
        let decision = evaluate(&meta, session.is_authenticated(), requested);

        let location = match &decision {
            GuardDecision::Proceed => requested.to_owned(),
            GuardDecision::RedirectToLogin { redirect } => self.login_location(redirect),
            GuardDecision::RedirectToDashboard => self.dashboard_path.clone(),
        };
        tracing::debug!(%requested, %location, ?decision, "navigation guarded");

        let (route, params) = match matched {
            Some(m) => (Some(m.route), m.params),
            None => (None, BTreeMap::new()),
        };
        Resolution { requested: requested.to_owned(), route, params, decision, location }
    }

    /// Login location carrying `redirect` as a return-to parameter.
    #[must_use]
    pub fn login_location(&self, redirect: &str) -> String {
        format!("{}?{REDIRECT_PARAM}={}", self.login_path, urlencoding::encode(redirect))
    }

    /// Where to land after a successful login.
    ///
    /// Uses `redirect` when it is an in-app path that is not the login page
    /// itself; otherwise the dashboard.
    #[must_use]
    pub fn post_login_target(&self, redirect: Option<&str>) -> String {
        match redirect {
            Some(target) if self.is_safe_return(target) => target.to_owned(),
            _ => self.dashboard_path.clone(),
        }
    }

    fn is_safe_return(&self, target: &str) -> bool {
        target.starts_with('/')
            && !target.starts_with("//")
            && !target.contains('\\')
            && super::path_of(target) != self.login_path
    }
}

/// Decode the `redirect` query parameter from a location such as
/// `/login?redirect=%2Fdashboard`.
#[must_use]
pub fn redirect_param(location: &str) -> Option<String> {
    let query = location.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == REDIRECT_PARAM)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(std::borrow::Cow::into_owned)
}
