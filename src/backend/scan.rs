// Cursor-based key enumeration
//
// A bounded, restartable traversal over a remote key-space. The backend
// hands out an opaque cursor with each page; the traversal is complete
// when the cursor returns to the start value. Pattern semantics belong
// to the backend and are not reinterpreted here.

use crate::backend::store::StoreConn;
use crate::errors::ToolError;

/// Cursor value denoting the beginning of a traversal.
pub const CURSOR_START: u64 = 0;

/// Collect up to `max` keys matching `pattern`.
///
/// `page_hint` is forwarded to the backend as a per-page size hint. The
/// loop stops as soon as either `max` keys are collected or the backend
/// signals exhaustion, so no page is fetched that is not needed, and at
/// most one page is ever held in memory beyond the accumulated keys.
pub async fn scan_keys(
    conn: &dyn StoreConn,
    pattern: &str,
    page_hint: usize,
    max: usize,
) -> Result<Vec<String>, ToolError> {
    let mut keys = Vec::new();
    if max == 0 {
        return Ok(keys);
    }

    let mut cursor = CURSOR_START;
    loop {
        let (next, batch) = conn.scan_page(cursor, pattern, page_hint).await?;
        for key in batch {
            keys.push(key);
            if keys.len() == max {
                return Ok(keys);
            }
        }
        if next == CURSOR_START {
            return Ok(keys);
        }
        cursor = next;
    }
}
