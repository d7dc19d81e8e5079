use serde::Serialize;
use sylva_shared::PaginationMeta;

/// Pages shown on each side of the current page.
pub const PAGINATION_DELTA: u32 = 2;

/// One slot of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

// Pages render as numbers, gaps as "...".
impl Serialize for PageItem {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageItem::Page(n) => serializer.serialize_u32(*n),
            PageItem::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Page numbers to render for `current` out of `total_pages`.
///
/// Page 1 and the last page are always present, plus up to
/// [`PAGINATION_DELTA`] pages on each side of `current`. Hidden pages
/// between them collapse into one [`PageItem::Ellipsis`].
pub fn pagination_window(current: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);

    let start = current.saturating_sub(PAGINATION_DELTA).max(2);
    let end = current.saturating_add(PAGINATION_DELTA).min(total_pages - 1);

    let mut items = vec![PageItem::Page(1)];
    if current > PAGINATION_DELTA + 2 {
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if current.saturating_add(PAGINATION_DELTA) < total_pages - 1 {
        items.push(PageItem::Ellipsis);
    }
    if total_pages > 1 {
        items.push(PageItem::Page(total_pages));
    }
    items
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    /// `total_pages` is derived from `total` and `page_size`; surplus items are dropped.
    pub fn new(mut items: Vec<T>, page: u32, page_size: u32, total: u64) -> Self {
        items.truncate(page_size as usize);
        Self {
            items,
            page: page.max(1),
            page_size,
            total,
            total_pages: total_pages(total, page_size),
        }
    }

    pub fn empty(page_size: u32) -> Self {
        Self::new(Vec::new(), 1, page_size, 0)
    }

    /// Build from a backend pagination block. A page count sent by the
    /// backend is ignored in favour of the computed one.
    pub fn from_meta(items: Vec<T>, meta: &PaginationMeta) -> Self {
        Self::new(items, meta.page, meta.page_size, meta.total)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn window(&self) -> Vec<PageItem> {
        pagination_window(self.page, self.total_pages)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn test_window_middle() {
        assert_eq!(
            pagination_window(5, 20),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6), Page(7), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_window_near_start() {
        assert_eq!(
            pagination_window(1, 10),
            vec![Page(1), Page(2), Page(3), Ellipsis, Page(10)]
        );
        assert_eq!(
            pagination_window(4, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_window_near_end() {
        assert_eq!(
            pagination_window(10, 10),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            pagination_window(7, 10),
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_window_small_totals() {
        assert!(pagination_window(1, 0).is_empty());
        assert_eq!(pagination_window(1, 1), vec![Page(1)]);
        assert_eq!(pagination_window(2, 2), vec![Page(1), Page(2)]);
        assert_eq!(
            pagination_window(3, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
    }

    #[test]
    fn test_window_clamps_current() {
        assert_eq!(pagination_window(0, 3), pagination_window(1, 3));
        assert_eq!(pagination_window(99, 3), pagination_window(3, 3));
    }

    #[test]
    fn test_window_serializes_ellipsis_as_string() {
        let json = serde_json::to_string(&pagination_window(5, 20)).unwrap();
        assert_eq!(json, r#"[1,"...",3,4,5,6,7,"...",20]"#);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(PaginatedResult::<u8>::new(vec![], 1, 10, 0).total_pages, 0);
        assert_eq!(PaginatedResult::<u8>::new(vec![], 1, 10, 1).total_pages, 1);
        assert_eq!(PaginatedResult::<u8>::new(vec![], 1, 10, 10).total_pages, 1);
        assert_eq!(PaginatedResult::<u8>::new(vec![], 1, 10, 11).total_pages, 2);
        assert_eq!(PaginatedResult::<u8>::new(vec![], 1, 0, 11).total_pages, 0);
    }

    #[test]
    fn test_items_never_exceed_page_size() {
        let result = PaginatedResult::new((0..15).collect(), 1, 10, 15);
        assert_eq!(result.items.len(), 10);
        assert!(result.has_next());
        assert!(!result.has_previous());
    }

    #[test]
    fn test_from_meta_recomputes_page_count() {
        let meta = PaginationMeta {
            page: 2,
            page_size: 5,
            total: 12,
            page_count: Some(99),
        };
        let result = PaginatedResult::from_meta(vec!["a", "b"], &meta);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.page, 2);
    }
}
