// ── Route resolution ──
//
// The console has two screens. The router that owns them asks `resolve`
// what to render for a requested path; session and controller methods
// hand back `Navigation` values instead of navigating themselves.

use serde::Serialize;

/// A screen the console can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum Route {
    #[strum(to_string = "/login")]
    Login,
    #[strum(to_string = "/dashboard")]
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
        }
    }

    /// Whether the route needs an authenticated session.
    pub fn is_gated(self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

/// A navigation side effect for the router-owning caller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Navigation {
    Login,
    Dashboard,
}

impl From<Navigation> for Route {
    fn from(nav: Navigation) -> Self {
        match nav {
            Navigation::Login => Route::Login,
            Navigation::Dashboard => Route::Dashboard,
        }
    }
}

/// Outcome of resolving one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
}

/// Decide what to do with a requested path.
///
/// `/login` always renders. `/dashboard` renders when authenticated and
/// otherwise redirects to `/login`. Anything else redirects to
/// `/dashboard`.
pub fn resolve(path: &str, authenticated: bool) -> Resolution {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "/login" => Resolution::Render(Route::Login),
        "/dashboard" if authenticated => Resolution::Render(Route::Dashboard),
        "/dashboard" => Resolution::Redirect(Route::Login),
        _ => Resolution::Redirect(Route::Dashboard),
    }
}

/// Follow redirects until a route renders.
pub fn landing(path: &str, authenticated: bool) -> Route {
    let mut current = path.to_owned();
    // Every chain ends within two hops: anything -> /dashboard -> /login.
    for _ in 0..3 {
        match resolve(&current, authenticated) {
            Resolution::Render(route) => return route,
            Resolution::Redirect(route) => current = route.path().to_owned(),
        }
    }
    Route::Login
}
