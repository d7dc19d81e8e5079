//! Error types shared by the client layer and the gateway.

use std::fmt;

use thiserror::Error;

/// Message of a content 404.
pub const CONTENT_NOT_FOUND: &str = "Contenu non trouvé";

/// Message of a content 5xx.
pub const CONTENT_SERVER_ERROR: &str = "Erreur serveur, veuillez réessayer plus tard";

/// API call failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Server(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl ApiError {
    /// Error for a non-success status, with the backend's `message` when it sent one.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        ApiError::Status {
            status,
            message: message.unwrap_or_else(|| format!("Request failed with status {status}")),
        }
    }

    /// HTTP status behind this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::NotFound(_) => Some(404),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }
}

/// One invalid form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .fields
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "Validation failed: {}", messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_status_message() {
        let err = ApiError::from_status(418, None);
        assert_eq!(err.to_string(), "Request failed with status 418");
        assert_eq!(err.status(), Some(418));
    }

    #[test]
    fn test_backend_message_is_kept() {
        let err = ApiError::from_status(400, Some("Email déjà utilisé".to_string()));
        assert_eq!(err.to_string(), "Email déjà utilisé");
    }

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "Invalid email address");
        errors.add("password", "Too short");
        assert!(errors.has("password"));
        assert_eq!(
            errors.to_string(),
            "Validation failed: email: Invalid email address, password: Too short"
        );
    }
}
