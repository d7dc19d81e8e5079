//! Content API client: articles, categories, tags, authors.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use sylva_core::ApiError;
use sylva_core::listing::{ListingQuery, PaginatedResult};
use sylva_core::ports::{ApiRequest, HttpTransport, path_segment};
use sylva_shared::content::{Article, Author, Category, Tag};

use crate::envelope::{translate_content_error, unwrap_page, unwrap_response};

pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Backend filters for the article listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub author: Option<String>,
    pub sort: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            tag: None,
            author: None,
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ArticleQuery {
    /// Map URL listing state to backend parameters. Unknown filters are ignored.
    pub fn from_listing(listing: &ListingQuery, page_size: u32) -> Self {
        let filter = |key: &str| listing.filter(key).map(String::from);
        Self {
            search: listing.search.clone(),
            category: filter("category"),
            tag: filter("tag"),
            author: filter("author"),
            sort: filter("sort"),
            page: listing.page,
            page_size,
        }
    }

    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("search", self.search.as_deref())
            .query_opt("category", self.category.as_deref())
            .query_opt("tag", self.tag.as_deref())
            .query_opt("author", self.author.as_deref())
            .query_opt("sort", self.sort.as_deref())
            .query("page", self.page)
            .query("pageSize", self.page_size)
    }
}

/// Content API client. Public endpoints, no credentials.
#[derive(Clone)]
pub struct ContentClient {
    transport: Arc<dyn HttpTransport>,
}

impl ContentClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// GET /articles
    pub async fn articles(&self, query: &ArticleQuery) -> Result<PaginatedResult<Article>, ApiError> {
        let request = query.apply(ApiRequest::get("/articles"));
        let response = self.transport.send(request).await?;
        unwrap_page(response, query.page_size).map_err(translate_content_error)
    }

    /// GET /articles/{slug}
    pub async fn article(&self, slug: &str) -> Result<Article, ApiError> {
        self.fetch(by_slug("/articles", slug)?).await
    }

    /// GET /categories
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.fetch(ApiRequest::get("/categories")).await
    }

    /// GET /categories/{slug}
    pub async fn category(&self, slug: &str) -> Result<Category, ApiError> {
        self.fetch(by_slug("/categories", slug)?).await
    }

    /// GET /tags
    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.fetch(ApiRequest::get("/tags")).await
    }

    /// GET /authors/{slug}
    pub async fn author(&self, slug: &str) -> Result<Author, ApiError> {
        self.fetch(by_slug("/authors", slug)?).await
    }

    /// GET /featured
    pub async fn featured(&self, limit: u32) -> Result<Vec<Article>, ApiError> {
        self.fetch(ApiRequest::get("/featured").query("limit", limit))
            .await
    }

    /// GET /popular
    pub async fn popular(&self, limit: u32) -> Result<Vec<Article>, ApiError> {
        self.fetch(ApiRequest::get("/popular").query("limit", limit))
            .await
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.transport.send(request).await?;
        unwrap_response(response).map_err(translate_content_error)
    }
}

fn by_slug(collection: &str, slug: &str) -> Result<ApiRequest, ApiError> {
    let segment = path_segment(slug).map_err(translate_content_error)?;
    Ok(ApiRequest::get(format!("{collection}/{segment}")))
}
