pub const DEFAULT_PAGE_SIZE: usize = 9;
/// Pages shown on each side of the current page in the page bar.
pub const DEFAULT_PAGE_RADIUS: usize = 2;

/// One page of a larger result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
}

/// Always at least 1, so an empty result still has a page to show.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slices `items` into the 1-based `page`. A page past the end is clamped
/// down to the last page instead of coming back empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let page = clamp_page(page, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Page {
        items: &items[start.min(end)..end],
        page,
        total_pages,
    }
}

/// Page numbers for the page bar: a window of `radius` pages around
/// `current`, plus the first and last page, ascending and unique.
pub fn page_window(current: usize, total: usize, radius: usize) -> Vec<usize> {
    let total = total.max(1);
    let current = clamp_page(current, total);
    let start = current.saturating_sub(radius).max(1);
    let end = current.saturating_add(radius).min(total);

    let mut pages = Vec::with_capacity(end - start + 3);
    if start > 1 {
        pages.push(1);
    }
    pages.extend(start..=end);
    if end < total {
        pages.push(total);
    }
    pages
}
