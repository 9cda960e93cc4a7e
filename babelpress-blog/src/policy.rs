//! Per-tenant page-size policy.
//!
//! Lives outside the data core on purpose: the core's pagination has one
//! behavior, and tenant-specific sizing (including the featured-landing
//! over-fetch) is resolved here, before the listing call, where it can be
//! unit-tested without a database or a rendering layer.
//!
//! The flow at the serving layer:
//!
//! ```ignore
//! let resolved = policy.resolve(Some(project.id), page, requested_size);
//! let mut listing = posts
//!     .find_many_paginated(&PostPageQuery {
//!         page,
//!         page_size: resolved.fetch_size,
//!         project_id: Some(project.id),
//!     })
//!     .await?;
//! // Report the policy size, not the fetched row count.
//! listing.pagination = resolved.meta(page, listing.pagination.total_items);
//! ```

use std::collections::HashMap;

use babelpress_data::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use babelpress_data::PageMeta;

/// Paging configuration for one tenant.
#[derive(Debug, Clone, Copy)]
pub struct TenantPaging {
    /// Page size used when the request doesn't specify one.
    pub default_size: u64,
    /// Whether page 1 renders a featured item and needs one extra row
    /// beyond the reported page size.
    pub featured_landing: bool,
}

impl Default for TenantPaging {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            featured_landing: false,
        }
    }
}

/// The outcome of resolving a page-size request against tenant policy.
///
/// `fetch_size` is what the listing query should ask the store for;
/// `reported_size` is what the pagination metadata should say. The two
/// differ only on a featured landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPageSize {
    pub fetch_size: u64,
    pub reported_size: u64,
}

impl ResolvedPageSize {
    /// Metadata derived from the reported size, independent of how many
    /// rows were actually fetched.
    pub fn meta(&self, current_page: u64, total_items: u64) -> PageMeta {
        PageMeta::new(current_page, self.reported_size, total_items)
    }
}

/// Tenant-keyed page-size defaults and layout quirks.
#[derive(Debug, Clone, Default)]
pub struct PageSizePolicy {
    tenants: HashMap<i64, TenantPaging>,
}

impl PageSizePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tenant(mut self, project_id: i64, paging: TenantPaging) -> Self {
        self.tenants.insert(project_id, paging);
        self
    }

    /// Resolve the effective sizes for one request.
    ///
    /// A requested size wins over the tenant default; both are clamped to
    /// `1..=MAX_PAGE_SIZE`. Featured-landing tenants fetch one extra row
    /// on page 1 while reporting the unadjusted size. On such a page the
    /// reported size is capped at `MAX_PAGE_SIZE - 1`, so the extra row
    /// still fits under the listing's own size clamp.
    pub fn resolve(
        &self,
        project_id: Option<i64>,
        page: u64,
        requested: Option<u64>,
    ) -> ResolvedPageSize {
        let tenant = project_id.and_then(|id| self.tenants.get(&id));
        let mut reported = requested
            .unwrap_or_else(|| tenant.map_or(DEFAULT_PAGE_SIZE, |t| t.default_size))
            .clamp(1, MAX_PAGE_SIZE);
        let featured_landing = tenant.is_some_and(|t| t.featured_landing) && page <= 1;
        if featured_landing {
            reported = reported.min(MAX_PAGE_SIZE - 1);
        }
        let fetch_size = if featured_landing {
            reported + 1
        } else {
            reported
        };
        ResolvedPageSize {
            fetch_size,
            reported_size: reported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use babelpress_data::{Page, Pageable};

    fn policy() -> PageSizePolicy {
        PageSizePolicy::new()
            .tenant(
                1,
                TenantPaging {
                    default_size: 15,
                    featured_landing: true,
                },
            )
            .tenant(
                2,
                TenantPaging {
                    default_size: 12,
                    featured_landing: false,
                },
            )
    }

    #[test]
    fn unknown_tenant_gets_global_default() {
        let r = policy().resolve(Some(99), 1, None);
        assert_eq!(r, ResolvedPageSize { fetch_size: 10, reported_size: 10 });
    }

    #[test]
    fn no_tenant_gets_global_default() {
        let r = policy().resolve(None, 2, None);
        assert_eq!(r.reported_size, 10);
        assert_eq!(r.fetch_size, 10);
    }

    #[test]
    fn featured_tenant_overfetches_on_page_one_only() {
        // The "fetch 16, report 15" behavior.
        let first = policy().resolve(Some(1), 1, None);
        assert_eq!(first, ResolvedPageSize { fetch_size: 16, reported_size: 15 });

        let second = policy().resolve(Some(1), 2, None);
        assert_eq!(second, ResolvedPageSize { fetch_size: 15, reported_size: 15 });
    }

    #[test]
    fn requested_size_wins_over_tenant_default() {
        let r = policy().resolve(Some(2), 1, Some(30));
        assert_eq!(r.reported_size, 30);
        assert_eq!(r.fetch_size, 30);
    }

    #[test]
    fn featured_overfetch_survives_the_max_size_clamp() {
        // At the top of the range the reported size yields one slot so the
        // fetch size stays inside what the listing will accept.
        let r = policy().resolve(Some(1), 1, Some(100));
        assert_eq!(r, ResolvedPageSize { fetch_size: 100, reported_size: 99 });
        assert_eq!(Pageable::new(1, r.fetch_size).size(), r.fetch_size);
    }

    #[test]
    fn requested_size_is_clamped() {
        assert_eq!(policy().resolve(None, 1, Some(0)).reported_size, 1);
        assert_eq!(policy().resolve(None, 1, Some(500)).reported_size, 100);
    }

    #[test]
    fn metadata_uses_reported_size_not_fetched_rows() {
        let resolved = policy().resolve(Some(1), 1, None);
        let meta = resolved.meta(1, 45);
        assert_eq!(meta.page_size, 15);
        assert_eq!(meta.total_pages, 3);

        // A page may legitimately carry more rows than its reported size.
        let rows: Vec<u64> = (0..resolved.fetch_size).collect();
        let page = Page::new(rows, meta);
        assert_eq!(page.data.len(), 16);
        assert_eq!(page.pagination.page_size, 15);
    }
}
