//! The signed-in user's garden overview.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use sylva_core::ports::RequestContext;
use sylva_shared::garden::{Plant, Project};

use crate::middleware::access::ACCESS_TOKEN_COOKIE;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct GardenOverview {
    pub projects: Vec<Project>,
    pub plants: Vec<Plant>,
}

/// The bearer travels with each call, taken from this request's cookie.
fn request_context(req: &HttpRequest) -> RequestContext {
    req.cookie(ACCESS_TOKEN_COOKIE)
        .map(|c| RequestContext::with_bearer(c.value()))
        .unwrap_or_default()
}

/// GET /account/garden
pub async fn overview(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let ctx = request_context(&req);
    let (projects, plants) =
        futures::try_join!(state.garden.projects(&ctx), state.garden.plants(&ctx, None))?;
    Ok(HttpResponse::Ok().json(GardenOverview { projects, plants }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubTransport, test_state};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;

    #[actix_web::test]
    async fn test_overview_forwards_cookie_token() {
        let stub = StubTransport::new()
            .on("/projects", 200, json!({"data": [{"id": "p1", "name": "Verger"}]}))
            .on("/plants", 200, json!([]));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state().garden(stub.clone()).build()))
                .route("/account/garden", web::get().to(overview)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/account/garden")
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, "jeton"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["projects"][0]["name"], "Verger");
        assert_eq!(body["plants"], json!([]));
        assert!(stub.requests().iter().all(|r| r.bearer.as_deref() == Some("jeton")));
    }

    #[actix_web::test]
    async fn test_without_token_nothing_is_sent() {
        let stub = StubTransport::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state().garden(stub.clone()).build()))
                .route("/account/garden", web::get().to(overview)),
        )
        .await;

        let req = test::TestRequest::get().uri("/account/garden").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(stub.requests().is_empty());
    }
}
