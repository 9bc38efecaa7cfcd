// src/domain/pagination.rs

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `total` items
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

pub fn previous_page(page: usize) -> usize {
    page.saturating_sub(1).max(1)
}

pub fn next_page(page: usize, count: usize) -> usize {
    (page + 1).min(count).max(1)
}

/// One page of a list, 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub count: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn is_first(&self) -> bool {
        self.number <= 1
    }

    pub fn is_last(&self) -> bool {
        self.number >= self.count
    }
}

/// Slices `items` to page `requested`, clamping the page number into `[1, max(count, 1)]`.
pub fn paginate<T: Clone>(items: &[T], requested: usize, page_size: usize) -> Page<T> {
    let count = page_count(items.len(), page_size);
    let number = requested.clamp(1, count.max(1));
    let start = ((number - 1) * page_size).min(items.len());
    let end = (number * page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        number,
        count,
        total: items.len(),
    }
}
