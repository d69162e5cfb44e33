//! Static route table and path matching.
//!
//! ARCHITECTURE
//! ============
//! `RouteTable` holds the descriptors in declaration order; the first
//! matching pattern wins, so a catch-all belongs last. `guard` is the pure
//! per-transition decision and `navigator` glues table, guard, and session
//! together.
//!
//! Pattern syntax: literal segments, `:name` segments that capture one
//! segment, and a final `*` that captures the rest of the path (possibly
//! empty).

pub mod guard;
pub mod navigator;


use std::collections::BTreeMap;

pub use guard::{GuardDecision, evaluate};
pub use navigator::{Navigator, Resolution};

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Access-control flags attached to a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Unauthenticated visitors are sent to the login route.
    pub requires_auth: bool,
    /// Authenticated visitors are sent to the dashboard (login/register pages).
    pub redirect_if_auth: bool,
}

impl RouteMeta {
    pub const PUBLIC: Self = Self { requires_auth: false, redirect_if_auth: false };
    pub const PROTECTED: Self = Self { requires_auth: true, redirect_if_auth: false };
    pub const GUEST_ONLY: Self = Self { requires_auth: false, redirect_if_auth: true };
}

/// How the route's view is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewTarget {
    /// Bundled with the app shell.
    Eager(&'static str),
    /// Fetched on first navigation.
    Lazy(&'static str),
}

impl ViewTarget {
    #[must_use]
    pub fn component(&self) -> &'static str {
        match self {
            Self::Eager(name) | Self::Lazy(name) => name,
        }
    }

    #[must_use]
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }
}

/// One entry of the routing table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub view: ViewTarget,
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    #[must_use]
    pub const fn new(path: &'static str, name: &'static str, view: ViewTarget, meta: RouteMeta) -> Self {
        Self { path, name, view, meta }
    }

    /// Match `path` (no query or fragment) against this route's pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        match_pattern(self.path, path)
    }
}

/// A route matched against a requested path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteDescriptor,
    pub params: BTreeMap<String, String>,
}

#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    #[must_use]
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        for route in routes.iter().filter(|r| r.meta.requires_auth && r.meta.redirect_if_auth) {
            tracing::warn!(path = route.path, "route sets requires_auth and redirect_if_auth; requires_auth wins");
        }
        Self { routes }
    }

    /// The application's routing table.
    #[must_use]
    pub fn app_default() -> Self {
        use ViewTarget::{Eager, Lazy};
        Self::new(vec![
            RouteDescriptor::new("/", "Home", Eager("Home"), RouteMeta::PUBLIC),
            RouteDescriptor::new("/guide", "Guide", Lazy("Guide"), RouteMeta::PUBLIC),
            RouteDescriptor::new("/about/history", "History", Lazy("about/History"), RouteMeta::PUBLIC),
            RouteDescriptor::new("/about/mission-vision", "Mission", Lazy("about/MissionVision"), RouteMeta::PUBLIC),
            RouteDescriptor::new("/support/help", "Help", Lazy("support/HelpFAQ"), RouteMeta::PUBLIC),
            RouteDescriptor::new("/support/contact", "Contact", Lazy("support/ContactForm"), RouteMeta::PUBLIC),
            RouteDescriptor::new("/support/feedback", "Feedback", Lazy("support/Feedback"), RouteMeta::PUBLIC),
            RouteDescriptor::new("/legal/privacy", "Privacy", Lazy("legal/PrivacyPolicy"), RouteMeta::PUBLIC),
            RouteDescriptor::new("/legal/terms", "Terms", Lazy("legal/TermsConditions"), RouteMeta::PUBLIC),
            RouteDescriptor::new(LOGIN_PATH, "Login", Lazy("auth/Login"), RouteMeta::GUEST_ONLY),
            RouteDescriptor::new("/register", "Register", Lazy("auth/Register"), RouteMeta::GUEST_ONLY),
            RouteDescriptor::new(DASHBOARD_PATH, "Dashboard", Lazy("Dashboard"), RouteMeta::PROTECTED),
            RouteDescriptor::new("/profile", "Profile", Lazy("Profile"), RouteMeta::PROTECTED),
            RouteDescriptor::new("/processing", "Processing", Lazy("Processing"), RouteMeta::PROTECTED),
            RouteDescriptor::new("/processing/:id", "ProcessingResult", Lazy("ProcessingResult"), RouteMeta::PROTECTED),
            RouteDescriptor::new("/*", "NotFound", Lazy("NotFound"), RouteMeta::PUBLIC),
        ])
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// First route whose pattern matches the path part of `location`.
    #[must_use]
    pub fn resolve(&self, location: &str) -> Option<RouteMatch<'_>> {
        let path = path_of(location);
        self.routes
            .iter()
            .find_map(|route| route.matches(path).map(|params| RouteMatch { route, params }))
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.name == name)
    }
}

/// Strip query string and fragment from a location.
#[must_use]
pub fn path_of(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    &location[..end]
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let mut params = BTreeMap::new();
    let mut actual = segments(path);

    for expected in segments(pattern) {
        if expected == "*" {
            let rest: Vec<&str> = actual.by_ref().collect();
            params.insert("*".to_owned(), rest.join("/"));
            return Some(params);
        }
        let segment = actual.next()?;
        match expected.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_owned(), segment.to_owned());
            }
            None if expected == segment => {}
            None => return None,
        }
    }

    if actual.next().is_some() { None } else { Some(params) }
}
