use std::time::{SystemTime, UNIX_EPOCH};

use relayer_db_types::{types::MAX_LISTING_ENTRIES, DbResult};
use tracing::warn;
use typed_sled::{Schema, SledTreeIter};

/// Seconds since UNIX epoch, 0 if the clock is before it.
pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Maps entries of `iter` through `f` until [`MAX_LISTING_ENTRIES`] are
/// collected. Returns them with the key of the first entry left out, if any.
pub(crate) fn collect_page<S, T, F>(
    component: &'static str,
    iter: SledTreeIter<S>,
    mut f: F,
) -> DbResult<(Vec<T>, Option<S::Key>)>
where
    S: Schema,
    F: FnMut(S::Key, S::Value) -> DbResult<T>,
{
    let mut out = Vec::new();
    for item in iter {
        let (key, value) = item?;
        if out.len() == MAX_LISTING_ENTRIES {
            warn!(
                component,
                limit = MAX_LISTING_ENTRIES,
                "listing truncated, more entries remain"
            );
            return Ok((out, Some(key)));
        }
        out.push(f(key, value)?);
    }
    Ok((out, None))
}
