//! Pagination links shared by the listing views.

use serde::Serialize;
use sylva_core::listing::{PageItem, PaginatedResult, QueryParams, build_page_url};

/// One slot of the pagination control. Gaps have no URL.
#[derive(Debug, Serialize)]
pub struct PageLink {
    pub page: PageItem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub current: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub links: Vec<PageLink>,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}

impl Pagination {
    /// Links for `result`, keeping every other parameter of the current URL.
    pub fn build<T>(base_path: &str, params: &QueryParams, result: &PaginatedResult<T>) -> Self {
        let links = result
            .window()
            .into_iter()
            .map(|item| match item {
                PageItem::Page(n) => PageLink {
                    page: item,
                    url: Some(build_page_url(base_path, params, n)),
                    current: n == result.page,
                },
                PageItem::Ellipsis => PageLink {
                    page: item,
                    url: None,
                    current: false,
                },
            })
            .collect();

        Self {
            links,
            prev_url: result
                .has_previous()
                .then(|| build_page_url(base_path, params, result.page - 1)),
            next_url: result
                .has_next()
                .then(|| build_page_url(base_path, params, result.page + 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_keep_filters_and_drop_page_one() {
        let params = QueryParams::parse("category=arbres&page=2");
        let result = PaginatedResult::new(vec![(); 12], 2, 12, 40);
        let pagination = Pagination::build("/articles", &params, &result);

        assert_eq!(pagination.links.len(), 4);
        assert_eq!(pagination.links[0].url.as_deref(), Some("/articles?category=arbres"));
        assert!(pagination.links[1].current);
        assert_eq!(
            pagination.prev_url.as_deref(),
            Some("/articles?category=arbres")
        );
        assert_eq!(
            pagination.next_url.as_deref(),
            Some("/articles?category=arbres&page=3")
        );
    }

    #[test]
    fn test_single_page_has_no_neighbours() {
        let result = PaginatedResult::new(vec![1, 2], 1, 12, 2);
        let pagination = Pagination::build("/articles", &QueryParams::new(), &result);

        assert!(pagination.prev_url.is_none());
        assert!(pagination.next_url.is_none());
        let json = serde_json::to_value(&pagination.links).unwrap();
        assert_eq!(json, serde_json::json!([{"page": 1, "url": "/articles", "current": true}]));
    }
}
