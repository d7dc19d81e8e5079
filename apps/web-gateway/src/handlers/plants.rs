//! Plant bible views. The encyclopedia degrades to empty results rather
//! than failing.

use std::collections::BTreeMap;

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use sylva_client::SpeciesQuery;
use sylva_client::plant_bible::DEFAULT_PAGE_SIZE;
use sylva_core::listing::{ListingQuery, PaginatedResult, QueryParams};
use sylva_shared::plants::{Species, SpeciesFilters};

use super::listing::Pagination;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const BASE_PATH: &str = "/plant-bible";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesListing {
    pub species: PaginatedResult<Species>,
    pub available_filters: SpeciesFilters,
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
    pub pagination: Pagination,
}

/// GET /plant-bible
pub async fn list(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let params = QueryParams::parse(req.query_string());
    let listing = ListingQuery::from_params(&params);
    let query = SpeciesQuery::from_listing(&listing, DEFAULT_PAGE_SIZE);

    let (species, available_filters) =
        futures::join!(state.plants.species(&query), state.plants.filters());

    let pagination = Pagination::build(BASE_PATH, &params, &species);
    HttpResponse::Ok().json(SpeciesListing {
        species,
        available_filters,
        search: listing.search,
        filters: listing.filters,
        pagination,
    })
}

/// GET /plant-bible/{slug}
pub async fn detail(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    match state.plants.species_by_slug(&slug).await {
        Some(species) => Ok(HttpResponse::Ok().json(species)),
        None => Err(AppError::NotFound(format!("Espèce introuvable : {slug}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubTransport, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;

    #[actix_web::test]
    async fn test_unreachable_api_renders_empty_listing() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state().build()))
                .route("/plant-bible", web::get().to(list)),
        )
        .await;

        let req = test::TestRequest::get().uri("/plant-bible?family=rosaceae").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["species"]["items"], json!([]));
        assert_eq!(body["species"]["totalPages"], 0);
        assert_eq!(body["availableFilters"]["families"], json!([]));
        assert_eq!(body["filters"]["family"], "rosaceae");
    }

    #[actix_web::test]
    async fn test_listing_maps_filters_to_backend_names() {
        let stub = StubTransport::new()
            .on(
                "/api/v1/plant-bible/species",
                200,
                json!({
                    "data": [{"id": "1", "slug": "malus-domestica", "commonName": "Pommier"}],
                    "meta": {"pagination": {"page": 1, "pageSize": 24, "total": 1}}
                }),
            )
            .on(
                "/api/v1/plant-bible/filters",
                200,
                json!({"data": {"families": ["Rosaceae"]}}),
            );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state().plant_bible(stub.clone()).build()))
                .route("/plant-bible", web::get().to(list)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/plant-bible?type=arbre&sun=plein-soleil")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["species"]["items"][0]["commonName"], "Pommier");
        assert_eq!(body["availableFilters"]["families"], json!(["Rosaceae"]));

        let sent = stub.request_to("/api/v1/plant-bible/species").unwrap();
        assert!(sent.query.contains(&("plantType".to_string(), "arbre".to_string())));
        assert!(sent.query.contains(&("sunExposure".to_string(), "plein-soleil".to_string())));
    }

    #[actix_web::test]
    async fn test_unknown_species_is_404() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state().build()))
                .route("/plant-bible/{slug}", web::get().to(detail)),
        )
        .await;

        let req = test::TestRequest::get().uri("/plant-bible/inconnue").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
