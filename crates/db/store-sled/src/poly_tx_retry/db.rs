use relayer_db_types::{
    traits::PolyTxRetryDatabase,
    types::{FeeStatus, PolyTxRetry},
    DbError, DbResult,
};
use tracing::{debug, instrument};
use typed_sled::error::Error;

use super::schemas::PolyTxRetrySchema;
use crate::{
    define_sled_database,
    instrumentation::components,
    lexicographic::RecordKey,
    utils::{collect_page, unix_now},
};

define_sled_database!(
    pub struct PolyTxRetryDBSled {
        retry_tree: PolyTxRetrySchema,
    }
);

impl PolyTxRetryDBSled {
    fn update_retry<F>(&self, key: &RecordKey, update: F) -> DbResult<PolyTxRetry>
    where
        F: Fn(&mut PolyTxRetry) -> DbResult<()>,
    {
        let now = unix_now();

        let _guard = self.lock.write();
        self.config.with_retry((&self.retry_tree,), |(rt,)| {
            let mut retry = rt
                .get(key)?
                .ok_or_else(|| DbError::missing_entry(key.hex_hash(), key.from_chain_id))
                .map_err(Error::abort)?;
            update(&mut retry).map_err(Error::abort)?;
            retry.updated_at = now;
            rt.insert(key, &retry)?;
            Ok(retry)
        })
    }
}

impl PolyTxRetryDatabase for PolyTxRetryDBSled {
    #[instrument(
        skip(self, retry),
        fields(
            component = components::DB_POLY_TX_RETRY,
            tx_hash = %retry.tx_hash,
            from_chain_id = retry.from_chain_id,
        )
    )]
    fn put_poly_tx_retry(&self, retry: PolyTxRetry) -> DbResult<()> {
        let key = RecordKey::parse(&retry.tx_hash, retry.from_chain_id)?;
        let record = PolyTxRetry {
            tx_hash: key.hex_hash(),
            updated_at: unix_now(),
            ..retry
        };

        let _guard = self.lock.write();
        self.config.with_retry((&self.retry_tree,), |(rt,)| {
            rt.insert(&key, &record)?;
            Ok(())
        })?;
        debug!("stored poly tx retry");
        Ok(())
    }

    fn get_poly_tx_retry(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
    ) -> DbResult<Option<PolyTxRetry>> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        let _guard = self.lock.read();
        Ok(self.retry_tree.get(&key)?)
    }

    fn get_all_poly_tx_retry(&self) -> DbResult<Vec<PolyTxRetry>> {
        let _guard = self.lock.read();
        let (retries, _) = collect_page(
            components::DB_POLY_TX_RETRY,
            self.retry_tree.iter(),
            |_, retry| Ok(retry),
        )?;
        Ok(retries)
    }

    #[instrument(skip(self), fields(component = components::DB_POLY_TX_RETRY))]
    fn del_poly_tx_retry(&self, tx_hash: &str, from_chain_id: u64) -> DbResult<()> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;

        let _guard = self.lock.write();
        let removed = self
            .config
            .with_retry((&self.retry_tree,), |(rt,)| Ok(rt.take(&key)?.is_some()))?;
        debug!(removed, "deleted poly tx retry");
        Ok(())
    }

    #[instrument(skip(self), fields(component = components::DB_POLY_TX_RETRY))]
    fn increase_poly_tx_retry_check_fee_count(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old_count: u32,
    ) -> DbResult<u32> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        let retry = self.update_retry(&key, |retry| {
            if retry.check_fee_count != old_count {
                return Err(DbError::CheckFeeCountMismatch {
                    expected: old_count,
                    actual: retry.check_fee_count,
                });
            }
            retry.check_fee_count = retry
                .check_fee_count
                .checked_add(1)
                .ok_or_else(|| DbError::Other("check fee count overflow".to_string()))?;
            Ok(())
        })?;
        debug!(check_fee_count = retry.check_fee_count, "increased check fee count");
        Ok(retry.check_fee_count)
    }

    #[instrument(skip(self), fields(component = components::DB_POLY_TX_RETRY))]
    fn set_poly_tx_retry_fee_status(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        fee_status: FeeStatus,
    ) -> DbResult<()> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        self.update_retry(&key, |retry| {
            retry.fee_status = fee_status;
            Ok(())
        })?;
        debug!("set fee status");
        Ok(())
    }
}
