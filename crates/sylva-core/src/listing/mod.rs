//! Listing pages: URL-backed filter/search/page state and pagination.

mod pagination;
mod query;

pub use pagination::{PAGINATION_DELTA, PageItem, PaginatedResult, pagination_window};
pub use query::{
    FilterValue, ListingQuery, PAGE_KEY, QueryParams, SEARCH_KEY, apply_filter_change,
    build_page_url,
};
