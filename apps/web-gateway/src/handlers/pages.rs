//! Page descriptors for the gated pages.
//!
//! Rendering happens client side; these endpoints tell the page what it is
//! and who is looking at it. The access guard has already run.

use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

use sylva_core::domain::{CookieSession, Role};

use crate::middleware::access::{ACCESS_TOKEN_COOKIE, USER_COOKIE};

#[derive(Debug, Serialize)]
pub struct PageDescriptor {
    pub page: &'static str,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<Viewer>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub user_id: String,
    pub role: Role,
}

fn viewer(req: &HttpRequest) -> Option<Viewer> {
    let token = req.cookie(ACCESS_TOKEN_COOKIE);
    let user = req.cookie(USER_COOKIE);
    CookieSession::from_cookies(
        token.as_ref().map(|c| c.value()),
        user.as_ref().map(|c| c.value()),
    )
    .map(|s| Viewer {
        user_id: s.user_id,
        role: s.role,
    })
}

fn describe(req: &HttpRequest, page: &'static str, title: &'static str) -> HttpResponse {
    HttpResponse::Ok().json(PageDescriptor {
        page,
        title,
        viewer: viewer(req),
    })
}

pub async fn login(req: HttpRequest) -> HttpResponse {
    describe(&req, "login", "Connexion")
}

pub async fn register(req: HttpRequest) -> HttpResponse {
    describe(&req, "register", "Créer un compte")
}

pub async fn forgot_password(req: HttpRequest) -> HttpResponse {
    describe(&req, "forgot-password", "Mot de passe oublié")
}

pub async fn reset_password(req: HttpRequest) -> HttpResponse {
    describe(&req, "reset-password", "Nouveau mot de passe")
}

pub async fn dashboard(req: HttpRequest) -> HttpResponse {
    describe(&req, "dashboard", "Tableau de bord")
}

pub async fn admin(req: HttpRequest) -> HttpResponse {
    describe(&req, "admin", "Administration")
}

pub async fn account(req: HttpRequest) -> HttpResponse {
    describe(&req, "account", "Mon compte")
}
