//! Echo the request ID assigned by `TracingLogger` back to the caller.

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use tracing_actix_web::RequestId;

pub static REQUEST_ID_HEADER: &str = "x-request-id";

/// Copies the request ID into the `X-Request-ID` response header.
///
/// Must be registered before `TracingLogger` so it runs inside it.
pub struct RequestIdHeader;

impl<S, B> Transform<S, ServiceRequest> for RequestIdHeader
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestIdHeaderService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdHeaderService { service }))
    }
}

pub struct RequestIdHeaderService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdHeaderService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = req.extensions().get::<RequestId>().map(|id| id.to_string());
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            if let Some(value) = request_id.and_then(|id| HeaderValue::from_str(&id).ok()) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }
            Ok(res)
        })
    }
}
