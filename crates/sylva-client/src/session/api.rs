//! Stateless calls to the auth endpoints.

use std::sync::Arc;

use sylva_core::ApiError;
use sylva_core::ports::{ApiRequest, HttpTransport, RequestContext};
use sylva_core::validation;
use sylva_shared::dto::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    ResetPasswordRequest,
};

use crate::envelope::unwrap_response;

/// Auth endpoints. Form input is validated locally first; invalid input
/// never reaches the backend.
#[derive(Clone)]
pub struct AuthApi {
    transport: Arc<dyn HttpTransport>,
}

impl AuthApi {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// POST /auth/login
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        validation::validate_login(&request.email, &request.password)?;
        self.send(ApiRequest::post("/auth/login").json(request)?).await
    }

    /// POST /auth/register
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        validation::validate_registration(
            &request.name,
            &request.email,
            &request.password,
            &request.password_confirmation,
        )?;
        self.send(ApiRequest::post("/auth/register").json(request)?)
            .await
    }

    /// POST /auth/refresh
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, ApiError> {
        let body = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.send(ApiRequest::post("/auth/refresh").json(&body)?)
            .await
    }

    /// POST /auth/logout - invalidates the refresh token server side.
    pub async fn logout(&self, ctx: &RequestContext, refresh_token: &str) -> Result<(), ApiError> {
        let body = RefreshTokenRequest {
            refresh_token: refresh_token.to_string(),
        };
        let request = ApiRequest::post("/auth/logout").context(ctx).json(&body)?;
        self.send::<serde_json::Value>(request).await.map(|_| ())
    }

    /// POST /auth/forgot-password
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        validation::validate_email(email)?;
        let body = ForgotPasswordRequest {
            email: email.trim().to_string(),
        };
        let request = ApiRequest::post("/auth/forgot-password").json(&body)?;
        self.send::<serde_json::Value>(request).await.map(|_| ())
    }

    /// POST /auth/reset-password
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        validation::validate_password_reset(&request.password, &request.password_confirmation)?;
        let request = ApiRequest::post("/auth/reset-password").json(request)?;
        self.send::<serde_json::Value>(request).await.map(|_| ())
    }

    async fn send<T: serde::de::DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.transport.send(request).await?;
        unwrap_response(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_invalid_login_is_not_sent() {
        let mock = Arc::new(MockTransport::new());
        let api = AuthApi::new(mock.clone());

        let err = api
            .login(&LoginRequest {
                email: "pas-un-email".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(ref v) if v.has("email")));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_password_mismatch_is_not_sent() {
        let mock = Arc::new(MockTransport::new());
        let api = AuthApi::new(mock.clone());

        let err = api
            .reset_password(&ResetPasswordRequest {
                token: "t".to_string(),
                password: "motdepasse1".to_string(),
                password_confirmation: "motdepasse2".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_forgot_password_posts_email() {
        let mock = Arc::new(MockTransport::new().respond(200, json!({"message": "ok"})));
        let api = AuthApi::new(mock.clone());

        api.forgot_password(" ana@example.com ").await.unwrap();
        let sent = mock.last_request();
        assert_eq!(sent.path, "/auth/forgot-password");
        assert_eq!(
            sent.body,
            sylva_core::ports::RequestBody::Json(json!({"email": "ana@example.com"}))
        );
    }
}
