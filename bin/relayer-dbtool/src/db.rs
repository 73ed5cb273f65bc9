use std::{path::Path, sync::Arc};

use relayer_db_store_sled::{open_sled_backend, resolve_store_path, SledBackend, SledDbConfig};
use relayer_db_types::event::ChainEvent;
use tracing::debug;

use crate::errors::{DisplayableError, DisplayedError};

pub(crate) type Backend = SledBackend<ChainEvent>;

/// Opens the store under `datadir` with production retry settings.
pub(crate) fn open_database(datadir: &Path) -> Result<Arc<Backend>, DisplayedError> {
    let path = resolve_store_path(datadir);
    debug!(path = %path.display(), "opening relayer store");
    open_sled_backend(&path, SledDbConfig::production())
        .internal_error(format!("failed to open store at {}", path.display()))
}
