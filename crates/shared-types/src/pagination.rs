/// Rows per page in the case table.
pub const PAGE_SIZE: usize = 15;

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Half-open index range of 1-based `page`, clamped to `len`.
/// Out-of-range pages yield an empty range.
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> (usize, usize) {
    if page == 0 || page_size == 0 {
        return (0, 0);
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= len {
        return (0, 0);
    }
    (start, start.saturating_add(page_size).min(len))
}

/// Pull `page` back onto the last existing page after the list shrinks.
/// Never below page one.
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.min(total_pages(len, page_size)).max(1)
}

pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let (start, end) = page_bounds(items.len(), page, page_size);
    &items[start..end]
}

/// Window state for a paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
    pub page_size: usize,
    pub len: usize,
}

impl Pager {
    pub fn new(len: usize, page: usize) -> Self {
        Self {
            page,
            page_size: PAGE_SIZE,
            len,
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.len, self.page_size)
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// "Showing X to Y of Z", or `None` when the window is empty.
    pub fn showing_label(&self) -> Option<String> {
        let (start, end) = page_bounds(self.len, self.page, self.page_size);
        if start == end {
            return None;
        }
        Some(format!("Showing {} to {} of {} results", start + 1, end, self.len))
    }
}
