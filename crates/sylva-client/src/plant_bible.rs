//! Plant bible client.
//!
//! The encyclopedia is a secondary feature: every call falls back to an
//! empty result instead of failing the page.

use std::sync::Arc;

use sylva_core::listing::{ListingQuery, PaginatedResult};
use sylva_core::ports::{ApiRequest, HttpTransport, path_segment};
use sylva_shared::plants::{Species, SpeciesFilters};

use crate::envelope::{unwrap_page, unwrap_response};

const BASE_PATH: &str = "/api/v1/plant-bible";

pub const DEFAULT_PAGE_SIZE: u32 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesQuery {
    pub search: Option<String>,
    pub family: Option<String>,
    pub plant_type: Option<String>,
    pub sun_exposure: Option<String>,
    pub water_needs: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for SpeciesQuery {
    fn default() -> Self {
        Self {
            search: None,
            family: None,
            plant_type: None,
            sun_exposure: None,
            water_needs: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SpeciesQuery {
    pub fn from_listing(listing: &ListingQuery, page_size: u32) -> Self {
        let filter = |key: &str| listing.filter(key).map(String::from);
        Self {
            search: listing.search.clone(),
            family: filter("family"),
            plant_type: filter("type"),
            sun_exposure: filter("sun"),
            water_needs: filter("water"),
            page: listing.page,
            page_size,
        }
    }
}

#[derive(Clone)]
pub struct PlantBibleClient {
    transport: Arc<dyn HttpTransport>,
}

impl PlantBibleClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// GET /api/v1/plant-bible/species. Empty page on any failure.
    pub async fn species(&self, query: &SpeciesQuery) -> PaginatedResult<Species> {
        let request = ApiRequest::get(format!("{BASE_PATH}/species"))
            .query_opt("search", query.search.as_deref())
            .query_opt("family", query.family.as_deref())
            .query_opt("plantType", query.plant_type.as_deref())
            .query_opt("sunExposure", query.sun_exposure.as_deref())
            .query_opt("waterNeeds", query.water_needs.as_deref())
            .query("page", query.page)
            .query("limit", query.page_size);

        let result = match self.transport.send(request).await {
            Ok(response) => unwrap_page(response, query.page_size),
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Plant bible species listing unavailable");
            PaginatedResult::empty(query.page_size)
        })
    }

    /// GET /api/v1/plant-bible/species/{slug}. `None` when missing or on failure.
    pub async fn species_by_slug(&self, slug: &str) -> Option<Species> {
        let segment = match path_segment(slug) {
            Ok(segment) => segment,
            Err(_) => return None,
        };
        let request = ApiRequest::get(format!("{BASE_PATH}/species/{segment}"));
        let result = match self.transport.send(request).await {
            Ok(response) => unwrap_response::<Option<Species>>(response),
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!(slug, error = %e, "Plant bible species unavailable");
            None
        })
    }

    /// GET /api/v1/plant-bible/filters. Empty facets on failure.
    pub async fn filters(&self) -> SpeciesFilters {
        let request = ApiRequest::get(format!("{BASE_PATH}/filters"));
        let result = match self.transport.send(request).await {
            Ok(response) => unwrap_response::<SpeciesFilters>(response),
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Plant bible filters unavailable");
            SpeciesFilters::default()
        })
    }
}
