//! Route guarding for the views that sit on top of the registry.

use serde::Serialize;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Login,
    Register,
    Dashboard,
}

/// What the outer layer should do with a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum RouteDecision {
    Render { view: View },
    Redirect { to: &'static str },
}

/// Map a requested path to a view or a redirect.
///
/// - `/login`, `/register` always render.
/// - `/dashboard` renders only when authenticated, otherwise redirects to login.
/// - `/` redirects to login.
/// - Unknown paths redirect to the dashboard or login depending on `authenticated`.
pub fn resolve_route(path: &str, authenticated: bool) -> RouteDecision {
    match normalize(path) {
        LOGIN_PATH => RouteDecision::Render { view: View::Login },
        REGISTER_PATH => RouteDecision::Render {
            view: View::Register,
        },
        DASHBOARD_PATH if authenticated => RouteDecision::Render {
            view: View::Dashboard,
        },
        DASHBOARD_PATH | "/" => RouteDecision::Redirect { to: LOGIN_PATH },
        _ if authenticated => RouteDecision::Redirect { to: DASHBOARD_PATH },
        _ => RouteDecision::Redirect { to: LOGIN_PATH },
    }
}

/// Strip a query string and a single trailing slash (`/login/` == `/login`).
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.strip_suffix('/') {
        Some("") | None => path,
        Some(trimmed) => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_views_render_regardless_of_session() {
        for authenticated in [false, true] {
            assert_eq!(
                resolve_route("/login", authenticated),
                RouteDecision::Render { view: View::Login }
            );
            assert_eq!(
                resolve_route("/register", authenticated),
                RouteDecision::Render {
                    view: View::Register
                }
            );
        }
    }

    #[test]
    fn dashboard_is_guarded() {
        assert_eq!(
            resolve_route("/dashboard", false),
            RouteDecision::Redirect { to: LOGIN_PATH }
        );
        assert_eq!(
            resolve_route("/dashboard", true),
            RouteDecision::Render {
                view: View::Dashboard
            }
        );
    }

    #[test]
    fn root_redirects_to_login() {
        assert_eq!(
            resolve_route("/", true),
            RouteDecision::Redirect { to: LOGIN_PATH }
        );
    }

    #[test]
    fn unknown_paths_follow_session_state() {
        assert_eq!(
            resolve_route("/nowhere", false),
            RouteDecision::Redirect { to: LOGIN_PATH }
        );
        assert_eq!(
            resolve_route("/nowhere", true),
            RouteDecision::Redirect { to: DASHBOARD_PATH }
        );
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(
            resolve_route("/dashboard/?tab=users", true),
            RouteDecision::Render {
                view: View::Dashboard
            }
        );
    }
}
