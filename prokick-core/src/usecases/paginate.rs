//! Page arithmetic for the request list.

pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit)).min(u64::from(u32::MAX)) as u32
}

/// Clamps a requested page into `1..=total_pages` (or 1 when empty).
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.max(1).min(total_pages.max(1))
}

/// Navigation state of a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self {
            page: clamp_page(page, total_pages),
            total_pages,
        }
    }

    pub fn page(self) -> u32 {
        self.page
    }

    pub fn has_previous(self) -> bool {
        self.page > 1
    }

    pub fn has_next(self) -> bool {
        self.page < self.total_pages
    }

    pub fn previous(self) -> Self {
        Self::new(self.page.saturating_sub(1), self.total_pages)
    }

    pub fn next(self) -> Self {
        Self::new(self.page.saturating_add(1), self.total_pages)
    }
}
