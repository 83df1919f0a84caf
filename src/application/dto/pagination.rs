use serde::{Deserialize, Serialize};

/// One page of a page-number paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, total_pages: u32, total_items: u64) -> Self {
        Self {
            items,
            page,
            total_pages,
            total_items,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }
}

/// Number of pages needed for `total_items`; an empty listing still has one page.
pub fn total_pages(total_items: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page.max(1));
    let pages = total_items.div_ceil(per_page).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Resolve a raw `page` query value leniently: a missing or non-numeric value
/// means the first page, and a number outside `1..=total_pages` means the
/// last page.
pub fn resolve_page(raw: Option<&str>, total_pages: u32) -> u32 {
    let last = total_pages.max(1);
    match raw.and_then(|value| value.trim().parse::<i64>().ok()) {
        None => 1,
        Some(page) if page < 1 || page > i64::from(last) => last,
        Some(page) => page as u32,
    }
}
