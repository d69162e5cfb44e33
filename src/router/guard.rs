//! Per-transition access decision.
//!
//! Pure function of the target route's flags and the current authentication
//! state. Nothing is cached: every navigation calls [`evaluate`] afresh.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::RouteMeta;

/// Terminal outcome of one guard evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Continue to the requested route unchanged.
    Proceed,
    /// Go to the login route; `redirect` is the originally requested location.
    RedirectToLogin { redirect: String },
    /// Go to the default authenticated landing route.
    RedirectToDashboard,
}

/// Decide a transition to a route with `meta`.
///
/// `requires_auth` is checked first, so a route that (mis)sets both flags
/// behaves as a protected route.
#[must_use]
pub fn evaluate(meta: &RouteMeta, authenticated: bool, requested: &str) -> GuardDecision {
    if meta.requires_auth {
        if authenticated {
            GuardDecision::Proceed
        } else {
            GuardDecision::RedirectToLogin { redirect: requested.to_owned() }
        }
    } else if meta.redirect_if_auth && authenticated {
        GuardDecision::RedirectToDashboard
    } else {
        GuardDecision::Proceed
    }
}
