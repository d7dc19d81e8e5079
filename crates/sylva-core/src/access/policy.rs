use url::form_urlencoded;

use super::matcher::matches_prefix;
use crate::domain::{CookieSession, Role};

/// What a route demands of the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Public,
    /// Only for visitors without a session (login, register, password reset).
    GuestOnly,
    Authenticated,
    /// Authenticated with one of these roles.
    Roles(Vec<Role>),
}

impl Requirement {
    fn admits(&self, role: Role) -> bool {
        match self {
            Requirement::Roles(roles) => roles.contains(&role),
            _ => true,
        }
    }
}

/// Static rule binding a path prefix to a requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub path_prefix: &'static str,
    pub requirement: Requirement,
}

impl RouteRule {
    pub fn new(path_prefix: &'static str, requirement: Requirement) -> Self {
        Self {
            path_prefix,
            requirement,
        }
    }
}

/// Outcome of evaluating a request against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    RedirectToLogin { location: String },
    RedirectToHome { location: String },
}

impl AccessDecision {
    pub fn location(&self) -> Option<&str> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::RedirectToLogin { location }
            | AccessDecision::RedirectToHome { location } => Some(location),
        }
    }
}

/// The route table. Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<RouteRule>,
    login_path: &'static str,
    home_path: &'static str,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(vec![
            RouteRule::new("/login", Requirement::GuestOnly),
            RouteRule::new("/register", Requirement::GuestOnly),
            RouteRule::new("/reset-password", Requirement::GuestOnly),
            RouteRule::new("/forgot-password", Requirement::GuestOnly),
            RouteRule::new("/admin", Requirement::Roles(vec![Role::Admin])),
            RouteRule::new(
                "/dashboard",
                Requirement::Roles(vec![Role::Admin, Role::Editor, Role::Author]),
            ),
            RouteRule::new("/account", Requirement::Authenticated),
        ])
    }
}

impl AccessPolicy {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self {
            rules,
            login_path: "/login",
            home_path: "/",
        }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Decide for `path` (path plus optional query string).
    ///
    /// Guest-only rules are evaluated before protected ones; anything that
    /// matches neither is allowed.
    pub fn decide(&self, path: &str, session: Option<&CookieSession>) -> AccessDecision {
        let guest_only = self
            .rules
            .iter()
            .filter(|r| r.requirement == Requirement::GuestOnly)
            .any(|r| matches_prefix(path, r.path_prefix));

        if guest_only {
            return match session {
                Some(_) => self.redirect_home(),
                None => AccessDecision::Allow,
            };
        }

        let protected = self.rules.iter().find(|r| {
            matches!(
                r.requirement,
                Requirement::Authenticated | Requirement::Roles(_)
            ) && matches_prefix(path, r.path_prefix)
        });

        match (protected, session) {
            (None, _) => AccessDecision::Allow,
            (Some(_), None) => self.redirect_login(path),
            (Some(rule), Some(session)) if !rule.requirement.admits(session.role) => {
                self.redirect_home()
            }
            (Some(_), Some(_)) => AccessDecision::Allow,
        }
    }

    /// Validate the raw cookies, then decide. Malformed cookies count as no session.
    pub fn decide_from_cookies(
        &self,
        path: &str,
        token_cookie: Option<&str>,
        user_cookie: Option<&str>,
    ) -> AccessDecision {
        let session = CookieSession::from_cookies(token_cookie, user_cookie);
        self.decide(path, session.as_ref())
    }

    /// `original_path` carries its query string too, so a visitor sent to
    /// the login page comes back to the same filtered or paginated view.
    fn redirect_login(&self, original_path: &str) -> AccessDecision {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("redirect", original_path)
            .finish();
        AccessDecision::RedirectToLogin {
            location: format!("{}?{}", self.login_path, query),
        }
    }

    fn redirect_home(&self) -> AccessDecision {
        AccessDecision::RedirectToHome {
            location: self.home_path.to_string(),
        }
    }
}
