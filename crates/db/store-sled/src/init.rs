use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use relayer_db_types::{DbError, DbResult};
use tracing::info;
use typed_sled::SledDb;

use crate::instrumentation::components;

/// Name used when the configured path does not name a store itself.
///
/// Despite the extension this is a directory: sled keeps its config, blob and
/// snapshot files under it.
pub const DEFAULT_STORE_NAME: &str = "relayer.bin";

const STORE_EXTENSION: &str = "bin";

/// Resolves the configured path to the store location. A path with the `.bin`
/// extension is used as is, anything else is a directory holding
/// [`DEFAULT_STORE_NAME`].
pub fn resolve_store_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == STORE_EXTENSION) {
        path.to_path_buf()
    } else {
        path.join(DEFAULT_STORE_NAME)
    }
}

/// Opens or creates the sled store at `path`.
///
/// Fails with [`DbError::IoError`] if the location cannot be created or the
/// store cannot be opened, e.g. because another process holds it.
pub fn open_sled_database(path: &Path) -> DbResult<Arc<SledDb>> {
    let store_path = resolve_store_path(path);

    if let Some(parent) = store_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| DbError::IoError(format!("creating {}: {e}", parent.display())))?;
    }

    let sled_db = sled::open(&store_path)
        .map_err(|e| DbError::IoError(format!("opening {}: {e}", store_path.display())))?;

    info!(
        component = components::DB_SLED_INIT,
        path = %store_path.display(),
        recovered = sled_db.was_recovered(),
        "opened relayer store"
    );

    Ok(Arc::new(SledDb::new(sled_db)?))
}
