use relayer_db_types::{
    event::RelayEvent, traits::RetryTxDatabase, types::RetryTxPage, DbResult,
};
use tracing::{debug, instrument};

use super::schemas::RetryTxSchema;
use crate::{
    define_sled_database,
    instrumentation::components,
    serializer::{decode_event, encode_event},
    utils::collect_page,
};

define_sled_database!(
    pub struct RetryTxDBSled {
        retry_tree: RetryTxSchema,
    }
);

impl RetryTxDBSled {
    fn list_from<E: RelayEvent>(&self, start: Option<&Vec<u8>>) -> DbResult<RetryTxPage<E>> {
        let _guard = self.lock.read();
        let iter = self.retry_tree.iter_from(start)?;
        let (pairs, next) = collect_page(components::DB_RETRY_TX, iter, |key, raw| {
            Ok((key, decode_event::<E>(&raw)?))
        })?;
        let (keys, events) = pairs.into_iter().unzip();
        Ok(RetryTxPage { keys, events, next })
    }
}

impl<E: RelayEvent> RetryTxDatabase<E> for RetryTxDBSled {
    #[instrument(
        skip(self, key, event),
        fields(component = components::DB_RETRY_TX, key_len = key.len())
    )]
    fn put_retry_tx(&self, key: &[u8], event: &E) -> DbResult<()> {
        let key = key.to_vec();
        let raw = encode_event(event)?;

        let _guard = self.lock.write();
        self.config.with_retry((&self.retry_tree,), |(rt,)| {
            rt.insert(&key, &raw)?;
            Ok(())
        })?;
        debug!("stored retry tx");
        Ok(())
    }

    #[instrument(skip(self, key), fields(component = components::DB_RETRY_TX, key_len = key.len()))]
    fn del_retry_tx(&self, key: &[u8]) -> DbResult<()> {
        let key = key.to_vec();

        let _guard = self.lock.write();
        let removed = self
            .config
            .with_retry((&self.retry_tree,), |(rt,)| Ok(rt.take(&key)?.is_some()))?;
        debug!(removed, "deleted retry tx");
        Ok(())
    }

    fn get_all_retry_txs(&self) -> DbResult<RetryTxPage<E>> {
        self.list_from(None)
    }

    fn get_retry_txs_from(&self, start: &[u8]) -> DbResult<RetryTxPage<E>> {
        self.list_from(Some(&start.to_vec()))
    }
}
