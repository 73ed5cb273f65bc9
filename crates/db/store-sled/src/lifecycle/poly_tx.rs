use relayer_db_types::{
    traits::PolyTxDatabase,
    types::{PolyTx, PolyTxStatus, RemovedPolyTx, MAX_LISTING_ENTRIES},
    DbError, DbResult,
};
use tracing::{debug, instrument};
use typed_sled::error::Error;

use super::{
    db::{merge_positions, missing, next_index, LifecycleDBSled},
    schemas::Counter,
};
use crate::{instrumentation::components, lexicographic::RecordKey, utils::unix_now};

impl LifecycleDBSled {
    /// Applies `update` to the stored record under one transaction, moving its
    /// status index entry if the status changed.
    fn update_poly_tx<F>(&self, key: &RecordKey, update: F) -> DbResult<PolyTx>
    where
        F: Fn(&mut PolyTx) -> DbResult<()>,
    {
        let now = unix_now();

        let _guard = self.write_lock();
        self.config().with_retry(
            (&self.poly_tx_tree, &self.poly_tx_status_tree),
            |(pt, st)| {
                let mut tx = pt
                    .get(key)?
                    .ok_or_else(|| missing(key))
                    .map_err(Error::abort)?;
                let old_status = tx.status;

                update(&mut tx).map_err(Error::abort)?;
                tx.updated_at = now;

                if tx.status != old_status {
                    st.remove(&(old_status.tag(), tx.tx_index))?;
                    st.insert(&(tx.status.tag(), tx.tx_index), key)?;
                }
                pt.insert(key, &tx)?;
                Ok(tx)
            },
        )
    }

    /// Positions and keys of live poly txs in `status`, in queue order.
    fn poly_tx_positions(
        &self,
        status: PolyTxStatus,
    ) -> impl Iterator<Item = DbResult<(u64, RecordKey)>> + '_ {
        self.poly_tx_status_tree
            .scan_prefix(&[status.tag()])
            .map(|item| {
                let ((_, pos), key) = item?;
                Ok((pos, key))
            })
    }

    fn first_poly_tx_in(&self, status: PolyTxStatus) -> DbResult<Option<PolyTx>> {
        let _guard = self.read_lock();
        let Some(first) = self.poly_tx_positions(status).next() else {
            return Ok(None);
        };
        let (_, key) = first?;
        Ok(self.poly_tx_tree.get(&key)?)
    }
}

impl PolyTxDatabase for LifecycleDBSled {
    #[instrument(
        skip(self, tx),
        fields(
            component = components::DB_POLY_TX,
            tx_hash = %tx.tx_hash,
            from_chain_id = tx.from_chain_id,
        )
    )]
    fn put_poly_tx(&self, tx: PolyTx) -> DbResult<u64> {
        let key = RecordKey::parse(&tx.tx_hash, tx.from_chain_id)?;
        let now = unix_now();

        let _guard = self.write_lock();
        let tx_index = self.config().with_retry(
            (&self.poly_tx_tree, &self.poly_tx_status_tree, &self.counter_tree),
            |(pt, st, ct)| {
                if pt.contains_key(&key)? {
                    return Err(Error::abort(DbError::EntryAlreadyExists).into());
                }
                let tx_index = next_index(&ct, Counter::PolyTxIndex)?;
                let record = PolyTx {
                    tx_index,
                    tx_hash: key.hex_hash(),
                    updated_at: now,
                    ..tx.clone()
                };
                st.insert(&(record.status.tag(), tx_index), &key)?;
                pt.insert(&key, &record)?;
                Ok(tx_index)
            },
        )?;
        debug!(tx_index, status = %tx.status, "stored poly tx");
        Ok(tx_index)
    }

    fn get_poly_tx(&self, tx_hash: &str, from_chain_id: u64) -> DbResult<Option<PolyTx>> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        let _guard = self.read_lock();
        Ok(self.poly_tx_tree.get(&key)?)
    }

    #[instrument(skip(self), fields(component = components::DB_POLY_TX))]
    fn remove_poly_tx(&self, tx_hash: &str, from_chain_id: u64) -> DbResult<u64> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        let now = unix_now();

        let _guard = self.write_lock();
        let removed_index = self.config().with_retry(
            (
                &self.poly_tx_tree,
                &self.poly_tx_status_tree,
                &self.removed_tree,
                &self.counter_tree,
            ),
            |(pt, st, rt, ct)| {
                let tx = pt
                    .take(&key)?
                    .ok_or_else(|| missing(&key))
                    .map_err(Error::abort)?;
                st.remove(&(tx.status.tag(), tx.tx_index))?;

                let removed_index = next_index(&ct, Counter::RemovedIndex)?;
                let removed = RemovedPolyTx {
                    removed_index,
                    removed_status: tx.status,
                    removed_at: now,
                    tx,
                };
                rt.insert(&removed_index, &removed)?;
                Ok(removed_index)
            },
        )?;
        debug!(removed_index, "moved poly tx to removal queue");
        Ok(removed_index)
    }

    #[instrument(skip(self), fields(component = components::DB_POLY_TX))]
    fn push_back_removed_poly_tx(&self, removed_index: u64) -> DbResult<u64> {
        let now = unix_now();

        let _guard = self.write_lock();
        let new_index = self.config().with_retry(
            (
                &self.poly_tx_tree,
                &self.poly_tx_status_tree,
                &self.removed_tree,
                &self.counter_tree,
            ),
            |(pt, st, rt, ct)| {
                let removed = rt
                    .take(&removed_index)?
                    .ok_or(DbError::MissingRemovedEntry(removed_index))
                    .map_err(Error::abort)?;
                let key = RecordKey::parse(&removed.tx.tx_hash, removed.tx.from_chain_id)
                    .map_err(Error::abort)?;
                if pt.contains_key(&key)? {
                    return Err(Error::abort(DbError::EntryAlreadyExists).into());
                }

                let new_index = next_index(&ct, Counter::PolyTxIndex)?;
                let tx = PolyTx {
                    tx_index: new_index,
                    status: PolyTxStatus::Pending,
                    updated_at: now,
                    ..removed.tx
                };
                st.insert(&(tx.status.tag(), new_index), &key)?;
                pt.insert(&key, &tx)?;
                Ok(new_index)
            },
        )?;
        debug!(new_index, "pushed back removed poly tx");
        Ok(new_index)
    }

    fn get_first_removed_poly_tx_to_be_pushed_back(&self) -> DbResult<Option<RemovedPolyTx>> {
        let _guard = self.read_lock();
        Ok(self.removed_tree.first()?.map(|(_, removed)| removed))
    }

    #[instrument(skip(self), fields(component = components::DB_POLY_TX))]
    fn set_poly_tx_status(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: PolyTxStatus,
        new: PolyTxStatus,
    ) -> DbResult<()> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        self.update_poly_tx(&key, |tx| {
            tx.status.check_transition(old, new)?;
            tx.status = new;
            Ok(())
        })?;
        debug!("changed poly tx status");
        Ok(())
    }

    fn set_poly_tx_status_processing(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: PolyTxStatus,
    ) -> DbResult<()> {
        self.set_poly_tx_status(tx_hash, from_chain_id, old, PolyTxStatus::Processing)
    }

    #[instrument(skip(self), fields(component = components::DB_POLY_TX))]
    fn set_processing_poly_tx_starcoin_tx_hash(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        starcoin_tx_hash: &str,
    ) -> DbResult<()> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        self.update_poly_tx(&key, |tx| {
            if tx.status != PolyTxStatus::Processing {
                return Err(DbError::StatusMismatch {
                    expected: PolyTxStatus::Processing.as_str(),
                    actual: tx.status.as_str(),
                });
            }
            tx.starcoin_tx_hash = Some(starcoin_tx_hash.to_string());
            Ok(())
        })?;
        debug!("recorded destination tx hash");
        Ok(())
    }

    #[instrument(skip(self), fields(component = components::DB_POLY_TX))]
    fn set_poly_tx_status_processed(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: PolyTxStatus,
        starcoin_tx_hash: &str,
    ) -> DbResult<()> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        self.update_poly_tx(&key, |tx| {
            tx.status.check_transition(old, PolyTxStatus::Processed)?;
            tx.status = PolyTxStatus::Processed;
            tx.starcoin_tx_hash = Some(starcoin_tx_hash.to_string());
            Ok(())
        })?;
        debug!("poly tx processed");
        Ok(())
    }

    #[instrument(skip(self, msg), fields(component = components::DB_POLY_TX))]
    fn update_poly_tx_starcoin_status(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        starcoin_status: &str,
        msg: &str,
    ) -> DbResult<()> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        self.update_poly_tx(&key, |tx| {
            tx.starcoin_status = Some(starcoin_status.to_string());
            tx.starcoin_status_msg = Some(msg.to_string());
            Ok(())
        })?;
        debug!("recorded destination status");
        Ok(())
    }

    fn get_first_failed_poly_tx(&self) -> DbResult<Option<PolyTx>> {
        self.first_poly_tx_in(PolyTxStatus::Failed)
    }

    fn get_first_timed_out_poly_tx(&self) -> DbResult<Option<PolyTx>> {
        self.first_poly_tx_in(PolyTxStatus::TimedOut)
    }

    fn get_timed_out_or_failed_poly_tx_list(&self) -> DbResult<Vec<PolyTx>> {
        let _guard = self.read_lock();
        let positions = merge_positions(
            [
                self.poly_tx_positions(PolyTxStatus::TimedOut),
                self.poly_tx_positions(PolyTxStatus::Failed),
            ],
            MAX_LISTING_ENTRIES,
        )?;

        let mut txs = Vec::with_capacity(positions.len());
        for (_, key) in positions {
            let tx = self.poly_tx_tree.get(&key)?.ok_or_else(|| missing(&key))?;
            txs.push(tx);
        }
        Ok(txs)
    }

    fn get_poly_tx_list_not_have_gas_subsidy(
        &self,
        from_chain_id: u64,
        updated_after: u64,
    ) -> DbResult<Vec<PolyTx>> {
        let _guard = self.read_lock();
        let mut txs = Vec::new();
        for item in self.poly_tx_positions(PolyTxStatus::Processed) {
            let (_, key) = item?;
            if key.from_chain_id != from_chain_id || self.gas_subsidy_tree.contains_key(&key)? {
                continue;
            }
            let tx = self.poly_tx_tree.get(&key)?.ok_or_else(|| missing(&key))?;
            if tx.updated_at <= updated_after {
                continue;
            }
            txs.push(tx);
            if txs.len() == MAX_LISTING_ENTRIES {
                break;
            }
        }
        Ok(txs)
    }
}
