//! Error handling - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;
use sylva_core::{ApiError, ValidationErrors};
use sylva_shared::response::FieldProblem;
use sylva_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Rejected credentials or missing session; the message is shown inline.
    Unauthorized(String),
    Validation(Vec<FieldProblem>),
    /// A backend failed or answered something unusable.
    Upstream(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::Upstream(msg) => write!(f, "Upstream error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized().with_detail(detail),
            AppError::Validation(errors) => ErrorResponse::new(422, "Validation Failed")
                .with_detail("Veuillez corriger les champs signalés")
                .with_errors(errors.clone()),
            AppError::Upstream(detail) => {
                tracing::warn!("Upstream error: {}", detail);
                ErrorResponse::bad_gateway(detail)
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(
            errors
                .fields
                .into_iter()
                .map(|e| FieldProblem {
                    field: e.field.to_string(),
                    message: e.message,
                })
                .collect(),
        )
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(errors) => errors.into(),
            ApiError::NotFound(msg) => AppError::NotFound(msg),
            ApiError::Unauthorized => {
                AppError::Unauthorized("Authentification requise".to_string())
            }
            ApiError::Status { status, message } => match status {
                401 | 403 => AppError::Unauthorized(message),
                404 => AppError::NotFound(message),
                400..=499 => AppError::BadRequest(message),
                _ => AppError::Upstream(message),
            },
            ApiError::Server(msg) | ApiError::Transport(msg) => AppError::Upstream(msg),
            ApiError::Decode(msg) => {
                tracing::error!("Undecodable backend response: {}", msg);
                AppError::Upstream("Réponse invalide du serveur".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_api_error_mapping() {
        assert!(matches!(
            AppError::from(ApiError::from_status(401, Some("Identifiants invalides".into()))),
            AppError::Unauthorized(ref m) if m == "Identifiants invalides"
        ));
        assert!(matches!(
            AppError::from(ApiError::from_status(409, None)),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from(ApiError::Transport("refused".into())),
            AppError::Upstream(_)
        ));
        assert!(matches!(
            AppError::from(ApiError::NotFound("Contenu non trouvé".into())),
            AppError::NotFound(_)
        ));
    }

    #[actix_web::test]
    async fn test_validation_body_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "Adresse e-mail invalide");
        let resp = AppError::from(ApiError::Validation(errors)).error_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 422);
        assert_eq!(json["errors"][0]["field"], "email");
        assert_eq!(json["errors"][0]["message"], "Adresse e-mail invalide");
    }
}
