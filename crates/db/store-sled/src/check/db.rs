use std::collections::BTreeMap;

use relayer_db_types::{
    event::RelayEvent,
    traits::CheckTxDatabase,
    types::{decode_tx_hash, CheckTxPage},
    DbResult,
};
use tracing::{debug, instrument};

use super::schemas::CheckTxSchema;
use crate::{
    define_sled_database, instrumentation::components, serializer::CheckTxEntry,
    utils::collect_page,
};

define_sled_database!(
    pub struct CheckTxDBSled {
        check_tree: CheckTxSchema,
    }
);

impl CheckTxDBSled {
    fn list_from<E: RelayEvent>(&self, start: Option<Vec<u8>>) -> DbResult<CheckTxPage<E>> {
        let _guard = self.lock.read();
        let iter = self.check_tree.iter_from(start.as_ref())?;
        let (entries, next) = collect_page(components::DB_CHECK_TX, iter, |key, entry| {
            Ok((hex::encode(key), entry.decode::<E>()?))
        })?;
        Ok(CheckTxPage {
            entries: entries.into_iter().collect::<BTreeMap<_, _>>(),
            next: next.map(hex::encode),
        })
    }
}

impl<E: RelayEvent> CheckTxDatabase<E> for CheckTxDBSled {
    #[instrument(
        skip(self, raw, event),
        fields(component = components::DB_CHECK_TX, tx_hash = %tx_hash)
    )]
    fn put_check_tx(&self, tx_hash: &str, raw: Vec<u8>, event: &E) -> DbResult<()> {
        let key = decode_tx_hash(tx_hash)?;
        let entry = CheckTxEntry::encode(raw, event)?;

        let _guard = self.lock.write();
        self.config.with_retry((&self.check_tree,), |(ct,)| {
            ct.insert(&key, &entry)?;
            Ok(())
        })?;
        debug!(payload_len = entry.payload.len(), "stored check tx");
        Ok(())
    }

    #[instrument(skip(self), fields(component = components::DB_CHECK_TX, tx_hash = %tx_hash))]
    fn del_check_tx(&self, tx_hash: &str) -> DbResult<()> {
        let key = decode_tx_hash(tx_hash)?;

        let _guard = self.lock.write();
        let removed = self
            .config
            .with_retry((&self.check_tree,), |(ct,)| Ok(ct.take(&key)?.is_some()))?;
        debug!(removed, "deleted check tx");
        Ok(())
    }

    fn get_all_check_txs(&self) -> DbResult<CheckTxPage<E>> {
        self.list_from(None)
    }

    fn get_check_txs_from(&self, start: &str) -> DbResult<CheckTxPage<E>> {
        self.list_from(Some(decode_tx_hash(start)?))
    }
}
