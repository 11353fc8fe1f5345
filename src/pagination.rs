/// Fixed page size used by every paginated listing.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the 1-based `page` window of `items`.
///
/// Pages past the end, and page `0`, are empty rather than an error; callers
/// decide whether an empty page means "not found".
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
