use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Size of the whole collection, not of `items`.
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Slice `[offset, offset + limit)` out of a fully fetched collection.
/// Out-of-range offsets give an empty page rather than an error.
pub fn paginate<T>(all: Vec<T>, limit: usize, offset: usize) -> Page<T> {
    let total = all.len();
    let items: Vec<T> = all.into_iter().skip(offset).take(limit).collect();
    let has_more = offset.saturating_add(items.len()) < total;
    Page {
        items,
        total,
        limit,
        offset,
        has_more,
    }
}
