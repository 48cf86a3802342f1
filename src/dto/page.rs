use serde::Serialize;

/// One page of a filtered listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

/// Items skipped before a 1-based `page`. Saturates instead of overflowing.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    page.max(1).saturating_sub(1).saturating_mul(page_size.max(1))
}

impl<T> Page<T> {
    /// Slices `items`; `page` is 1-based and clamped to at least 1.
    pub fn paginate(items: Vec<T>, page: Option<i64>, page_size: i64) -> Self {
        let page = page.unwrap_or(1).max(1);
        let page_size = page_size.max(1);
        let total = items.len() as i64;
        let total_pages = ((total as f64) / (page_size as f64)).ceil() as i64;
        let offset = usize::try_from(page_offset(page, page_size)).unwrap_or(usize::MAX);

        let items = items
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();

        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}
