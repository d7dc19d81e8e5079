//! Route access control.
//!
//! Runs before every page request: reads the session cookies, asks the
//! shared [`AccessPolicy`] and either forwards or answers with a redirect.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::LOCATION,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use sylva_core::access::is_gated_path;
use sylva_core::ports::keys;
use sylva_core::{AccessDecision, AccessPolicy};

/// Cookie holding the bearer token.
pub const ACCESS_TOKEN_COOKIE: &str = keys::ACCESS_TOKEN;
/// Cookie holding the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = keys::REFRESH_TOKEN;
/// Cookie holding the JSON user profile (`{"id", "role", ...}`).
pub const USER_COOKIE: &str = keys::USER;

/// Access guard middleware factory.
pub struct AccessGuard {
    policy: Arc<AccessPolicy>,
}

impl AccessGuard {
    pub fn new(policy: Arc<AccessPolicy>) -> Self {
        Self { policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AccessGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGuardService {
            service,
            policy: self.policy.clone(),
        }))
    }
}

pub struct AccessGuardService<S> {
    service: S,
    policy: Arc<AccessPolicy>,
}

impl<S, B> Service<ServiceRequest> for AccessGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // The router matches the decoded path, so the guard must too.
        let path = req.match_info().as_str().to_string();
        let decision = if is_gated_path(&path) {
            let target = match req.query_string() {
                "" => path.clone(),
                query => format!("{path}?{query}"),
            };
            let token = req.cookie(ACCESS_TOKEN_COOKIE);
            let user = req.cookie(USER_COOKIE);

            self.policy.decide_from_cookies(
                &target,
                token.as_ref().map(|c| c.value()),
                user.as_ref().map(|c| c.value()),
            )
        } else {
            AccessDecision::Allow
        };

        match decision.location() {
            Some(location) => {
                tracing::debug!(%path, %location, "Access denied, redirecting");

                let response = HttpResponse::Found()
                    .insert_header((LOCATION, location))
                    .finish();
                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
            None => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
        }
    }
}
