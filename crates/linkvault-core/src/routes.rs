//! User-visible route surface.

use std::fmt;

use crate::session::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, rendered as the sign-in page.
    Home,
    SignUp,
    SignIn,
    Dashboard,
    Shared { token: String },
}

impl Route {
    /// Parse a path such as `/shared/abc123?ref=x`. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Self::Home),
            ["signup"] => Some(Self::SignUp),
            ["signin"] => Some(Self::SignIn),
            ["dashboard"] => Some(Self::Dashboard),
            ["shared", token] => urlencoding::decode(token)
                .ok()
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .map(|token| Self::Shared { token }),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::SignUp => "/signup".to_string(),
            Self::SignIn => "/signin".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Shared { token } => format!("/shared/{}", urlencoding::encode(token)),
        }
    }

    pub const fn requires_session(&self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// Route to actually show: the dashboard redirects to sign-in when no
    /// token is held.
    #[must_use]
    pub fn guard(self, session: &SessionStore) -> Self {
        if self.requires_session() && !session.is_signed_in() {
            Self::SignIn
        } else {
            self
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_known_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/signup/"), Some(Route::SignUp));
        assert_eq!(Route::parse("/signin?next=x"), Some(Route::SignIn));
        assert_eq!(Route::parse("/dashboard"), Some(Route::Dashboard));
        assert_eq!(
            Route::parse("/shared/abc123"),
            Some(Route::Shared {
                token: "abc123".to_string()
            })
        );
    }

    #[test]
    fn rejects_unknown_and_tokenless_paths() {
        assert_eq!(Route::parse("/shared"), None);
        assert_eq!(Route::parse("/shared/a/b"), None);
        assert_eq!(Route::parse("/settings"), None);
    }

    #[test]
    fn path_roundtrips_through_parse() {
        let route = Route::Shared {
            token: "a b".to_string(),
        };
        assert_eq!(route.path(), "/shared/a%20b");
        assert_eq!(Route::parse(&route.path()), Some(route));
    }

    #[test]
    fn dashboard_requires_session() {
        let session = SessionStore::in_memory();
        assert_eq!(Route::Dashboard.guard(&session), Route::SignIn);
        assert_eq!(Route::SignUp.guard(&session), Route::SignUp);

        session.set("token").unwrap();
        assert_eq!(Route::Dashboard.guard(&session), Route::Dashboard);
    }
}
