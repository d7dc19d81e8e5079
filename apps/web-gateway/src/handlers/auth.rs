//! Authentication form handlers.
//!
//! Successful logins set the session cookies the access guard reads and
//! redirect with `303 See Other`. Failures answer with an RFC 7807 body the
//! page shows inline.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};

use sylva_core::ports::RequestContext;
use sylva_shared::UserProfile;
use sylva_shared::dto::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};

use crate::middleware::access::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_COOKIE};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RedirectParam {
    pub redirect: Option<String>,
}

#[derive(Serialize)]
struct Notice {
    message: &'static str,
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    query: web::Query<RedirectParam>,
    form: web::Form<LoginRequest>,
) -> AppResult<HttpResponse> {
    let auth = state.auth.login(&form).await?;
    let target = local_redirect(query.redirect.as_deref());
    tracing::debug!(target, "Login succeeded");
    signed_in(auth, target, state.cookie_secure)
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let auth = state.auth.register(&form).await?;
    signed_in(auth, "/", state.cookie_secure)
}

/// POST /logout
///
/// The backend call is best effort; the cookies are cleared regardless.
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let token = req.cookie(ACCESS_TOKEN_COOKIE);
    let ctx = token
        .as_ref()
        .map(|c| RequestContext::with_bearer(c.value()))
        .unwrap_or_default();

    if let Some(refresh) = req.cookie(REFRESH_TOKEN_COOKIE) {
        if let Err(e) = state.auth.logout(&ctx, refresh.value()).await {
            tracing::debug!(error = %e, "Backend logout failed, clearing cookies anyway");
        }
    }

    let mut response = HttpResponse::SeeOther();
    response.insert_header((LOCATION, "/"));
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_COOKIE] {
        let mut cookie = Cookie::build(name, "").path("/").finish();
        cookie.make_removal();
        response.cookie(cookie);
    }
    response.finish()
}

/// POST /forgot-password
///
/// Answers the same way whether or not the address is known.
pub async fn forgot_password(
    state: web::Data<AppState>,
    form: web::Form<ForgotPasswordRequest>,
) -> AppResult<HttpResponse> {
    state.auth.forgot_password(&form.email).await?;
    Ok(HttpResponse::Ok().json(Notice {
        message: "Si un compte existe pour cette adresse, un e-mail de réinitialisation a été envoyé",
    }))
}

/// POST /reset-password
pub async fn reset_password(
    state: web::Data<AppState>,
    form: web::Form<ResetPasswordRequest>,
) -> AppResult<HttpResponse> {
    state.auth.reset_password(&form).await?;
    Ok(HttpResponse::SeeOther()
        .insert_header((LOCATION, "/login"))
        .finish())
}

fn signed_in(auth: AuthResponse, target: &str, secure: bool) -> AppResult<HttpResponse> {
    let user = auth
        .user
        .ok_or_else(|| AppError::Upstream("Réponse d'authentification incomplète".to_string()))?;

    Ok(HttpResponse::SeeOther()
        .insert_header((LOCATION, target))
        .cookie(session_cookie(ACCESS_TOKEN_COOKIE, auth.access_token, true, secure))
        .cookie(session_cookie(REFRESH_TOKEN_COOKIE, auth.refresh_token, true, secure))
        .cookie(session_cookie(USER_COOKIE, user_cookie_value(&user)?, false, secure))
        .finish())
}

/// The user cookie stays readable by page scripts; the tokens do not.
fn session_cookie(name: &'static str, value: String, http_only: bool, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(http_only)
        .secure(secure)
        .same_site(SameSite::Lax)
        .finish()
}

fn user_cookie_value(user: &UserProfile) -> AppResult<String> {
    serde_json::to_string(user).map_err(|e| AppError::Internal(e.to_string()))
}

/// Only same-site absolute paths are followed after login.
fn local_redirect(target: Option<&str>) -> &str {
    match target {
        Some(t) if t.starts_with('/') && !t.starts_with("//") && !t.starts_with("/\\") => t,
        _ => "/",
    }
}
