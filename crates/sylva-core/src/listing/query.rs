use std::collections::BTreeMap;

use url::form_urlencoded;

/// Query key holding the page number.
pub const PAGE_KEY: &str = "page";

/// Query key holding the free-text search.
pub const SEARCH_KEY: &str = "q";

/// Ordered URL query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key`, replacing every existing value at the position of the first one.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(idx) => {
                self.pairs[idx].1 = value;
                let mut seen = false;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// `base_path` with this query appended, or bare when empty.
    pub fn to_url(&self, base_path: &str) -> String {
        if self.is_empty() {
            base_path.to_string()
        } else {
            format!("{}?{}", base_path, self.to_query_string())
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// New value of a filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
    Unset,
}

impl FilterValue {
    /// The value to store, `None` when the key should be removed.
    fn as_param(&self) -> Option<String> {
        match self {
            FilterValue::Text(s) if !s.trim().is_empty() => Some(s.clone()),
            FilterValue::Flag(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FilterValue::Unset)
    }
}

/// Apply one filter (or search) change.
///
/// Empty, `false` and unset values remove the key. The page key is always
/// dropped so the listing restarts at page 1.
pub fn apply_filter_change(
    base_path: &str,
    current: &QueryParams,
    key: &str,
    value: impl Into<FilterValue>,
) -> (QueryParams, String) {
    let value: FilterValue = value.into();
    let mut params = current.clone();
    match value.as_param() {
        Some(v) => params.set(key, v),
        None => params.remove(key),
    }
    params.remove(PAGE_KEY);
    let url = params.to_url(base_path);
    (params, url)
}

/// URL of `target_page`, keeping every other parameter. Page 1 carries no page key.
pub fn build_page_url(base_path: &str, current: &QueryParams, target_page: u32) -> String {
    let mut params = current.clone();
    params.remove(PAGE_KEY);
    if target_page > 1 {
        params.set(PAGE_KEY, target_page.to_string());
    }
    params.to_url(base_path)
}

/// Listing state reconstructed from the URL on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
    pub page: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: None,
            filters: BTreeMap::new(),
            page: 1,
        }
    }
}

impl ListingQuery {
    pub fn from_params(params: &QueryParams) -> Self {
        let search = params
            .get(SEARCH_KEY)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        let page = params
            .get(PAGE_KEY)
            .and_then(|p| p.parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        let filters = params
            .iter()
            .filter(|(k, v)| *k != SEARCH_KEY && *k != PAGE_KEY && !v.is_empty())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            search,
            filters,
            page,
        }
    }

    pub fn from_query_string(query: &str) -> Self {
        Self::from_params(&QueryParams::parse(query))
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Back to URL parameters: search first, then filters, then page when above 1.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(search) = &self.search {
            params.set(SEARCH_KEY, search.clone());
        }
        for (k, v) in &self.filters {
            params.set(k, v.clone());
        }
        if self.page > 1 {
            params.set(PAGE_KEY, self.page.to_string());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_change_sets_value_and_drops_page() {
        let current = QueryParams::parse("category=roses&page=4");
        let (params, url) = apply_filter_change("/articles", &current, "tag", "taille");
        assert!(!params.contains(PAGE_KEY));
        assert_eq!(params.get("tag"), Some("taille"));
        assert_eq!(url, "/articles?category=roses&tag=taille");
    }

    #[test]
    fn test_filter_change_replaces_existing_value() {
        let current = QueryParams::parse("?category=roses&q=soil");
        let (params, url) = apply_filter_change("/articles", &current, "category", "bulbs");
        assert_eq!(params.get("category"), Some("bulbs"));
        assert_eq!(url, "/articles?category=bulbs&q=soil");
    }

    #[test]
    fn test_empty_false_and_unset_remove_key() {
        let current = QueryParams::parse("category=roses&organic=true&page=2");

        let (params, _) = apply_filter_change("/a", &current, "category", "");
        assert!(!params.contains("category"));

        let (params, _) = apply_filter_change("/a", &current, "organic", false);
        assert!(!params.contains("organic"));

        let (params, url) = apply_filter_change("/a", &current, "category", None::<&str>);
        assert!(!params.contains("category"));
        assert_eq!(url, "/a?organic=true");
    }

    #[test]
    fn test_filter_change_always_removes_page() {
        let current = QueryParams::parse("page=3&q=tomato&zone=7");
        for key in ["q", "zone", "family", "page"] {
            let (params, url) = apply_filter_change("/plant-bible", &current, key, "x");
            assert!(!params.contains(PAGE_KEY), "page kept after {key}");
            assert!(!url.contains("page="), "{url}");
        }
    }

    #[test]
    fn test_removing_last_filter_gives_bare_path() {
        let current = QueryParams::parse("page=2&tag=herbs");
        let (_, url) = apply_filter_change("/articles", &current, "tag", "");
        assert_eq!(url, "/articles");
    }

    #[test]
    fn test_page_one_has_no_page_param() {
        let current = QueryParams::parse("q=rose&page=5");
        assert_eq!(build_page_url("/articles", &current, 1), "/articles?q=rose");
        assert_eq!(build_page_url("/articles", &QueryParams::new(), 1), "/articles");
    }

    #[test]
    fn test_page_above_one_has_page_param() {
        let current = QueryParams::parse("page=5&q=rose");
        assert_eq!(build_page_url("/articles", &current, 6), "/articles?q=rose&page=6");
        assert_eq!(build_page_url("/articles", &QueryParams::new(), 2), "/articles?page=2");
    }

    #[test]
    fn test_special_characters_are_encoded() {
        let current = QueryParams::new();
        let (_, url) = apply_filter_change("/articles", &current, "q", "pommes & poires");
        assert_eq!(url, "/articles?q=pommes+%26+poires");
        let parsed = QueryParams::parse("q=pommes+%26+poires");
        assert_eq!(parsed.get("q"), Some("pommes & poires"));
    }

    #[test]
    fn test_listing_query_from_params() {
        let query = ListingQuery::from_query_string("q=%20compost%20&category=soil&page=3&tag=");
        assert_eq!(query.search.as_deref(), Some("compost"));
        assert_eq!(query.filter("category"), Some("soil"));
        assert_eq!(query.filter("tag"), None);
        assert_eq!(query.page, 3);
    }

    #[test]
    fn test_invalid_page_defaults_to_one() {
        for raw in ["page=0", "page=-2", "page=abc", ""] {
            assert_eq!(ListingQuery::from_query_string(raw).page, 1, "{raw}");
        }
    }

    #[test]
    fn test_listing_query_to_params() {
        let query = ListingQuery::from_query_string("page=2&category=soil&q=worms");
        assert_eq!(query.to_params().to_query_string(), "q=worms&category=soil&page=2");
        assert_eq!(ListingQuery::default().to_params().to_query_string(), "");
    }
}
