//! Data Transfer Objects - auth request/response types for the API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// User role. Unknown role strings are rejected at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Author,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Author => "author",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public user object returned by the auth API and mirrored into the `user` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Checked locally, never sent to the backend.
    #[serde(skip_serializing, default)]
    pub password_confirmation: String,
}

/// Response of login, register and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

/// Body of refresh and logout calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
    #[serde(skip_serializing, default)]
    pub password_confirmation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_is_rejected() {
        let parsed: Result<UserProfile, _> =
            serde_json::from_str(r#"{"id":"1","email":"a@b.c","role":"root"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_register_request_does_not_send_confirmation() {
        let req = RegisterRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "longenough".to_string(),
            password_confirmation: "longenough".to_string(),
        };
        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("passwordConfirmation").is_none());
        assert_eq!(body["email"], "ana@example.com");
    }

    #[test]
    fn test_auth_response_camel_case() {
        let resp: AuthResponse = serde_json::from_str(
            r#"{"accessToken":"a","refreshToken":"r","user":{"id":"7","email":"x@y.z","role":"editor"}}"#,
        )
        .unwrap();
        assert_eq!(resp.access_token, "a");
        assert_eq!(resp.user.unwrap().role, Role::Editor);
    }
}
