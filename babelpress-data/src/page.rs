use serde::Serialize;

/// Default page size when a caller (or tenant policy) specifies none.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Pagination parameters. Pages are 1-indexed.
///
/// Construction clamps `page` to at least 1 and `size` to
/// `1..=MAX_PAGE_SIZE`, so `offset()` can never underflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pageable {
    page: u64,
    size: u64,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pageable {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        // page is clamped to >= 1, so the subtraction cannot underflow;
        // the multiplication saturates for absurdly large page numbers.
        (self.page - 1).saturating_mul(self.size)
    }
}

/// Derived description of a listing's position within a larger result set.
///
/// Computed fresh from a live count on every listing call, never stored.
/// Serialized in camelCase for the front-end contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub page_size: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageMeta {
    pub fn new(current_page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            (total_items + page_size - 1) / page_size
        };
        Self {
            current_page,
            total_pages,
            total_items,
            page_size,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }
}

/// A page of results with pagination metadata.
///
/// `data.len()` may differ from `pagination.page_size`: the serving layer
/// over-fetches one row for some tenants' featured layouts while reporting
/// the smaller size. Consumers must not assume the two agree.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, pagination: PageMeta) -> Self {
        Self { data, pagination }
    }
}
