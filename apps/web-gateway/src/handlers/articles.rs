//! Article listing and detail views.

use std::collections::BTreeMap;

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use sylva_client::ArticleQuery;
use sylva_core::listing::{ListingQuery, PaginatedResult, QueryParams};
use sylva_shared::content::{Article, Category};

use super::listing::Pagination;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const BASE_PATH: &str = "/articles";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListing {
    pub articles: PaginatedResult<Article>,
    pub categories: Vec<Category>,
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
    pub pagination: Pagination,
}

/// GET /articles
///
/// The listing state lives entirely in the URL. Articles and categories are
/// fetched concurrently; either failing fails the page.
pub async fn list(state: web::Data<AppState>, req: HttpRequest) -> AppResult<HttpResponse> {
    let params = QueryParams::parse(req.query_string());
    let listing = ListingQuery::from_params(&params);
    let query = ArticleQuery::from_listing(&listing, state.page_size);

    let (articles, categories) =
        futures::try_join!(state.content.articles(&query), state.content.categories())?;

    tracing::debug!(
        page = articles.page,
        total = articles.total,
        "Article listing fetched"
    );

    let pagination = Pagination::build(BASE_PATH, &params, &articles);
    Ok(HttpResponse::Ok().json(ArticleListing {
        articles,
        categories,
        search: listing.search,
        filters: listing.filters,
        pagination,
    }))
}

/// GET /articles/{slug}
pub async fn detail(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let article = state.content.article(&slug).await?;
    Ok(HttpResponse::Ok().json(article))
}
