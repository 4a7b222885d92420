use std::future::Future;

use futures::future::join_all;

use crate::api::ObjectRecord;

/// Number of pages needed to cover `total_ids` at `items_per_page` per page.
/// An empty catalog still has one (empty) page.
pub fn page_count(total_ids: usize, items_per_page: usize) -> usize {
    if total_ids == 0 {
        return 1;
    }
    (total_ids + items_per_page - 1) / items_per_page
}

/// Half-open id-index window `[start, end)` a 1-based page starts filling from.
pub fn page_window(page: usize, items_per_page: usize) -> (usize, usize) {
    let start = page.saturating_sub(1) * items_per_page;
    (start, start + items_per_page)
}

/// Loads one page of thumbnail-bearing records.
///
/// Walks the id sequence slice by slice starting at the page's window: every
/// fetch within a slice is issued before any is awaited, the join is the
/// batch boundary, and source id order is preserved within each slice. A
/// failed fetch or a record without a thumbnail only reduces the slice's
/// yield; the fill loop keeps consuming slices until a full page is
/// accumulated or the ids run out, so a short (or empty) result can only
/// mean exhaustion.
pub async fn load_page<F, Fut, E>(
    ids: &[u64],
    page: usize,
    items_per_page: usize,
    fetch: F,
) -> Vec<ObjectRecord>
where
    F: Fn(u64) -> Fut,
    Fut: Future<Output = Result<ObjectRecord, E>>,
{
    let (window_start, _) = page_window(page, items_per_page);
    let mut accepted: Vec<ObjectRecord> = Vec::with_capacity(items_per_page);
    let mut offset = window_start;

    while accepted.len() < items_per_page && offset < ids.len() {
        let end = (offset + items_per_page).min(ids.len());
        let slice = &ids[offset..end];
        let settled = join_all(slice.iter().map(|id| fetch(*id))).await;
        for record in settled.into_iter().flatten() {
            if record.has_thumbnail() {
                accepted.push(record);
            }
        }
        offset += items_per_page;
    }

    accepted.truncate(items_per_page);
    accepted
}
