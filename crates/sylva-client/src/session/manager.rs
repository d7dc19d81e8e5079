use std::sync::Arc;

use tokio::sync::RwLock;

use sylva_core::ApiError;
use sylva_core::domain::{Session, UserProfile};
use sylva_core::ports::{RequestContext, SessionStore, keys};
use sylva_shared::dto::{AuthResponse, LoginRequest, RegisterRequest, ResetPasswordRequest};

use super::api::AuthApi;

/// Result of a refresh-token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    /// Nothing to exchange; the caller is not logged in.
    NoRefreshToken,
    /// The backend refused the token. The local session has been cleared.
    Rejected,
    /// The backend could not be reached or failed. The session is kept.
    Unavailable(String),
}

/// Owns the authenticated session of one client context.
///
/// The session is persisted to a [`SessionStore`] and handed to API calls
/// as an explicit [`RequestContext`]. Login, refresh and logout replace it
/// wholesale; the last writer wins.
pub struct SessionManager {
    api: AuthApi,
    store: Arc<dyn SessionStore>,
    current: RwLock<Option<Session>>,
}

impl SessionManager {
    pub fn new(api: AuthApi, store: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            store,
            current: RwLock::new(None),
        }
    }

    /// Reload a persisted session at startup.
    ///
    /// Needs both the access token and the user object. A user object that
    /// does not parse is logged and dropped; the manager then starts logged out.
    pub async fn restore(&self) -> Option<UserProfile> {
        let token = self.read_key(keys::ACCESS_TOKEN).await;
        let user = self.read_key(keys::USER).await;

        let (Some(token), Some(user)) = (token, user) else {
            return None;
        };

        match serde_json::from_str::<UserProfile>(&user) {
            Ok(profile) => {
                let refresh = self.read_key(keys::REFRESH_TOKEN).await.unwrap_or_default();
                let session = Session::new(profile.clone(), token, refresh);
                *self.current.write().await = Some(session);
                tracing::debug!(user_id = %profile.id, "Session restored");
                Some(profile)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Persisted user is unreadable, starting logged out");
                self.clear_persisted().await;
                None
            }
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<UserProfile, ApiError> {
        let response = self.api.login(request).await?;
        self.establish(response, None).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserProfile, ApiError> {
        let response = self.api.register(request).await?;
        self.establish(response, None).await
    }

    /// Best-effort server-side logout, then local cleanup no matter what.
    pub async fn logout(&self) {
        let session = self.current.read().await.clone();
        let refresh_token = match &session {
            Some(s) if !s.refresh_token.is_empty() => Some(s.refresh_token.clone()),
            _ => self.read_key(keys::REFRESH_TOKEN).await,
        };

        if let Some(refresh_token) = refresh_token {
            let ctx = session
                .as_ref()
                .map(|s| RequestContext::with_bearer(&s.access_token))
                .unwrap_or_default();
            if let Err(e) = self.api.logout(&ctx, &refresh_token).await {
                tracing::debug!(error = %e, "Server-side logout failed, ignoring");
            }
        }

        *self.current.write().await = None;
        self.clear_persisted().await;
    }

    /// Exchange the refresh token for a new token pair.
    pub async fn refresh(&self) -> RefreshOutcome {
        let existing = self.current.read().await.clone();
        let refresh_token = match &existing {
            Some(s) if !s.refresh_token.is_empty() => Some(s.refresh_token.clone()),
            _ => self.read_key(keys::REFRESH_TOKEN).await,
        };
        let Some(refresh_token) = refresh_token.filter(|t| !t.is_empty()) else {
            return RefreshOutcome::NoRefreshToken;
        };

        let response = match self.api.refresh(&refresh_token).await {
            Ok(response) => response,
            Err(e) => return self.refresh_failed(e).await,
        };

        let known_user = existing.map(|s| s.user);
        match self.establish(response, known_user).await {
            Ok(_) => RefreshOutcome::Refreshed,
            Err(e) => RefreshOutcome::Unavailable(e.to_string()),
        }
    }

    /// Flag form of [`refresh`](Self::refresh). Never fails.
    pub async fn refresh_token(&self) -> bool {
        self.refresh().await == RefreshOutcome::Refreshed
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.api.forgot_password(email).await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.api.reset_password(request).await
    }

    /// Credentials for the next API call.
    pub async fn context(&self) -> RequestContext {
        match self.current.read().await.as_ref() {
            Some(session) => RequestContext::with_bearer(&session.access_token),
            None => RequestContext::anonymous(),
        }
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.current.read().await.as_ref().map(|s| s.user.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Install the session from an auth response and persist it.
    async fn establish(
        &self,
        response: AuthResponse,
        known_user: Option<UserProfile>,
    ) -> Result<UserProfile, ApiError> {
        let user = response
            .user
            .or(known_user)
            .ok_or_else(|| ApiError::Decode("auth response has no user".to_string()))?;

        let session = Session::new(user.clone(), response.access_token, response.refresh_token);
        self.persist(&session).await;
        *self.current.write().await = Some(session);
        Ok(user)
    }

    async fn refresh_failed(&self, err: ApiError) -> RefreshOutcome {
        match err.status() {
            Some(400 | 401 | 403) => {
                tracing::info!(error = %err, "Refresh token rejected, clearing session");
                *self.current.write().await = None;
                self.clear_persisted().await;
                RefreshOutcome::Rejected
            }
            _ => {
                tracing::warn!(error = %err, "Token refresh failed");
                RefreshOutcome::Unavailable(err.to_string())
            }
        }
    }

    // Storage failures never fail an auth flow; the in-memory session stays authoritative.

    async fn persist(&self, session: &Session) {
        let user = match serde_json::to_string(&session.user) {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize user");
                return;
            }
        };
        let entries = [
            (keys::ACCESS_TOKEN, session.access_token.as_str()),
            (keys::REFRESH_TOKEN, session.refresh_token.as_str()),
            (keys::USER, user.as_str()),
        ];
        for (key, value) in entries {
            if let Err(e) = self.store.set(key, value).await {
                tracing::error!(key, error = %e, "Failed to persist session");
            }
        }
    }

    async fn clear_persisted(&self) {
        for key in keys::ALL {
            if let Err(e) = self.store.remove(key).await {
                tracing::error!(key, error = %e, "Failed to clear persisted session");
            }
        }
    }

    async fn read_key(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read persisted session");
                None
            }
        }
    }
}
