use serde::Deserialize;
use sylva_shared::dto::{Role, UserProfile};

/// Authenticated session held by the client layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn new(user: UserProfile, access_token: String, refresh_token: String) -> Self {
        Self {
            user,
            access_token,
            refresh_token,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Shape the `user` cookie must have. Extra fields are ignored.
#[derive(Deserialize)]
struct CookieUser {
    id: serde_json::Value,
    role: Role,
}

/// Session as seen by the access gate, validated from the request cookies.
///
/// The token itself is opaque here; only its presence matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSession {
    pub user_id: String,
    pub role: Role,
}

impl CookieSession {
    /// Build from the raw `access_token` and `user` cookie values.
    ///
    /// Returns `None` for a missing or blank token, unparsable user JSON,
    /// a blank id or an unknown role. Never fails otherwise.
    pub fn from_cookies(token: Option<&str>, user: Option<&str>) -> Option<Self> {
        let token = token?.trim();
        if token.is_empty() {
            return None;
        }

        let user: CookieUser = serde_json::from_str(user?).ok()?;

        // Backends send numeric or string ids.
        let user_id = match user.id {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if user_id.trim().is_empty() {
            return None;
        }

        Some(Self {
            user_id,
            role: user.role,
        })
    }
}

impl From<&Session> for CookieSession {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user.id.clone(),
            role: session.user.role,
        }
    }
}
