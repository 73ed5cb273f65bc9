//! Sled store for the relayer.

pub mod check;
mod config;
pub mod height;
mod init;
pub mod instrumentation;
mod lexicographic;
pub mod lifecycle;
pub mod macros;
pub mod poly_tx_retry;
pub mod retry;
mod serializer;
mod utils;

use std::{marker::PhantomData, path::Path, sync::Arc};

pub use check::db::CheckTxDBSled;
pub use config::SledDbConfig;
pub use height::db::HeightDBSled;
pub use lifecycle::db::LifecycleDBSled;
pub use poly_tx_retry::db::PolyTxRetryDBSled;
use relayer_db_types::{
    event::RelayEvent,
    traits::{
        CheckTxDatabase, DatabaseBackend, GasSubsidyDatabase, HeightDatabase, PolyTxDatabase,
        PolyTxRetryDatabase, RetryTxDatabase,
    },
    DbResult,
};
pub use retry::db::RetryTxDBSled;
use tracing::{info, warn};
use typed_sled::SledDb;

pub use crate::init::{open_sled_database, resolve_store_path, DEFAULT_STORE_NAME};
use crate::instrumentation::components;

/// Opens the store at `path` and every collection in it.
pub fn open_sled_backend<E: RelayEvent>(
    path: &Path,
    config: SledDbConfig,
) -> DbResult<Arc<SledBackend<E>>> {
    let sled_db = open_sled_database(path)?;
    SledBackend::new(sled_db, config).map(Arc::new)
}

/// Complete Sled backend with all relayer collections.
///
/// `E` is the event type stored in the check and retry sets. Dropping the
/// backend flushes the store.
#[derive(Debug)]
pub struct SledBackend<E> {
    sled_db: Arc<SledDb>,
    check_tx_db: Arc<CheckTxDBSled>,
    retry_tx_db: Arc<RetryTxDBSled>,
    height_db: Arc<HeightDBSled>,
    lifecycle_db: Arc<LifecycleDBSled>,
    poly_tx_retry_db: Arc<PolyTxRetryDBSled>,
    _event: PhantomData<fn() -> E>,
}

impl<E: RelayEvent> SledBackend<E> {
    /// Opens every collection, creating missing trees. Safe to repeat on an
    /// existing store.
    pub fn new(sled_db: Arc<SledDb>, config: SledDbConfig) -> DbResult<Self> {
        let db_ref = &sled_db;
        let config_ref = &config;

        let check_tx_db = Arc::new(CheckTxDBSled::new(db_ref.clone(), config_ref.clone())?);
        let retry_tx_db = Arc::new(RetryTxDBSled::new(db_ref.clone(), config_ref.clone())?);
        let height_db = Arc::new(HeightDBSled::new(db_ref.clone(), config_ref.clone())?);
        let lifecycle_db = Arc::new(LifecycleDBSled::new(db_ref.clone(), config_ref.clone())?);
        let poly_tx_retry_db = Arc::new(PolyTxRetryDBSled::new(db_ref.clone(), config)?);

        info!(
            component = components::DB_SLED_INIT,
            trees = sled_db.tree_names().len(),
            "relayer collections ready"
        );

        Ok(Self {
            sled_db,
            check_tx_db,
            retry_tx_db,
            height_db,
            lifecycle_db,
            poly_tx_retry_db,
            _event: PhantomData,
        })
    }
}

impl<E> SledBackend<E> {
    /// Forces all pending writes to disk. Returns the number of bytes flushed.
    pub fn flush(&self) -> DbResult<usize> {
        Ok(self.sled_db.flush()?)
    }
}

impl<E> Drop for SledBackend<E> {
    fn drop(&mut self) {
        if let Err(err) = self.sled_db.flush() {
            warn!(component = components::DB_SLED_INIT, %err, "failed to flush store on close");
        }
    }
}

impl<E: RelayEvent> DatabaseBackend for SledBackend<E> {
    type Event = E;

    fn check_tx_db(&self) -> Arc<impl CheckTxDatabase<E>> {
        self.check_tx_db.clone()
    }

    fn retry_tx_db(&self) -> Arc<impl RetryTxDatabase<E>> {
        self.retry_tx_db.clone()
    }

    fn height_db(&self) -> Arc<impl HeightDatabase> {
        self.height_db.clone()
    }

    fn poly_tx_db(&self) -> Arc<impl PolyTxDatabase> {
        self.lifecycle_db.clone()
    }

    fn gas_subsidy_db(&self) -> Arc<impl GasSubsidyDatabase> {
        self.lifecycle_db.clone()
    }

    fn poly_tx_retry_db(&self) -> Arc<impl PolyTxRetryDatabase> {
        self.poly_tx_retry_db.clone()
    }
}
