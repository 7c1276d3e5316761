// src/api/pagination.rs
//! Cursor-threaded pagination over a listing call.

use crate::error::ConvertError;

use super::ChildrenPage;

/// Drains every page of a listing call, threading each response's
/// `next_cursor` into the next request until `has_more` is false.
///
/// The closure receives the cursor for the page it should fetch. On any page
/// failure the whole traversal aborts with that error and the cursor it
/// failed at, so callers can discard partial results.
pub async fn fetch_all_pages<F, Fut>(
    mut fetch_page: F,
) -> Result<Vec<serde_json::Value>, (Option<String>, ConvertError)>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<ChildrenPage, ConvertError>>,
{
    let mut all_items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = match fetch_page(cursor.clone()).await {
            Ok(page) => page,
            Err(e) => return Err((cursor, e)),
        };

        let has_more = page.has_more;
        cursor = page.next_cursor;
        all_items.extend(page.results);

        if !has_more || cursor.is_none() {
            break;
        }
    }

    Ok(all_items)
}
