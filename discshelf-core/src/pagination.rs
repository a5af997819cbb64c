use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Number of pages needed for `total_items`; never less than one.
/// A zero page size is treated as one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Bring a requested page number into `1..=total_pages`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Position of a page within its result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// Zero-based start of the slice, inclusive
    pub start: usize,
    /// Zero-based end of the slice, exclusive
    pub end: usize,
}

impl PageInfo {
    pub fn compute(total_items: usize, page_size: usize, requested_page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total_items, page_size);
        let current_page = clamp_page(requested_page, total_pages);
        let start = ((current_page - 1) * page_size).min(total_items);
        let end = (start + page_size).min(total_items);

        Self {
            current_page,
            total_pages,
            page_size,
            total_items,
            start,
            end,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// A contiguous slice of an ordered result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    #[serde(flatten)]
    pub info: PageInfo,
}

impl<'a, T> Page<'a, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice `items` into the requested page, clamping out-of-range requests.
pub fn paginate<T>(items: &[T], page_size: usize, requested_page: usize) -> Page<'_, T> {
    let info = PageInfo::compute(items.len(), page_size, requested_page);
    Page {
        items: &items[info.start..info.end],
        info,
    }
}

/// Page cursor owned by a browsing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page_size: usize,
    pub current_page: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        PaginationState::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Change the page size and keep the cursor within the new page count
    pub fn set_page_size(&mut self, page_size: usize, total_items: usize) {
        self.page_size = page_size.max(1);
        self.reclamp(total_items);
    }

    pub fn go_to(&mut self, page: usize, total_items: usize) {
        self.current_page = page;
        self.reclamp(total_items);
    }

    pub fn next(&mut self, total_items: usize) {
        self.go_to(self.current_page.saturating_add(1), total_items);
    }

    pub fn previous(&mut self, total_items: usize) {
        self.go_to(self.current_page.saturating_sub(1), total_items);
    }

    pub fn first(&mut self) {
        self.current_page = 1;
    }

    /// Re-clamp after the result set changed size
    pub fn reclamp(&mut self, total_items: usize) {
        self.current_page = clamp_page(self.current_page, total_pages(total_items, self.page_size));
    }

    pub fn page<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        paginate(items, self.page_size, self.current_page)
    }
}
