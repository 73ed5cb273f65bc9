use relayer_db_types::{
    traits::GasSubsidyDatabase,
    types::{GasSubsidy, GasSubsidyStatus},
    DbResult,
};
use tracing::{debug, instrument};
use typed_sled::error::Error;

use super::{
    db::{missing, next_index, LifecycleDBSled},
    schemas::Counter,
};
use crate::{instrumentation::components, lexicographic::RecordKey, utils::unix_now};

impl LifecycleDBSled {
    fn update_gas_subsidy<F>(&self, key: &RecordKey, update: F) -> DbResult<GasSubsidy>
    where
        F: Fn(&mut GasSubsidy) -> DbResult<()>,
    {
        let now = unix_now();

        let _guard = self.write_lock();
        self.config().with_retry(
            (&self.gas_subsidy_tree, &self.gas_subsidy_status_tree),
            |(gt, st)| {
                let mut subsidy = gt
                    .get(key)?
                    .ok_or_else(|| missing(key))
                    .map_err(Error::abort)?;
                let old_status = subsidy.status;

                update(&mut subsidy).map_err(Error::abort)?;
                subsidy.updated_at = now;

                if subsidy.status != old_status {
                    st.remove(&(old_status.tag(), subsidy.seq))?;
                    st.insert(&(subsidy.status.tag(), subsidy.seq), key)?;
                }
                gt.insert(key, &subsidy)?;
                Ok(subsidy)
            },
        )
    }

    fn first_gas_subsidy_in(&self, status: GasSubsidyStatus) -> DbResult<Option<GasSubsidy>> {
        let _guard = self.read_lock();
        let Some(first) = self
            .gas_subsidy_status_tree
            .scan_prefix(&[status.tag()])
            .next()
        else {
            return Ok(None);
        };
        let (_, key) = first?;
        Ok(self.gas_subsidy_tree.get(&key)?)
    }
}

impl GasSubsidyDatabase for LifecycleDBSled {
    #[instrument(
        skip(self, subsidy),
        fields(
            component = components::DB_GAS_SUBSIDY,
            tx_hash = %subsidy.tx_hash,
            from_chain_id = subsidy.from_chain_id,
            status = %subsidy.status,
        )
    )]
    fn put_gas_subsidy(&self, subsidy: GasSubsidy) -> DbResult<u64> {
        let key = RecordKey::parse(&subsidy.tx_hash, subsidy.from_chain_id)?;
        let now = unix_now();

        let _guard = self.write_lock();
        let seq = self.config().with_retry(
            (
                &self.gas_subsidy_tree,
                &self.gas_subsidy_status_tree,
                &self.counter_tree,
            ),
            |(gt, st, ct)| {
                let seq = match gt.get(&key)? {
                    Some(existing) => {
                        st.remove(&(existing.status.tag(), existing.seq))?;
                        existing.seq
                    }
                    None => next_index(&ct, Counter::GasSubsidySeq)?,
                };
                let record = GasSubsidy {
                    seq,
                    tx_hash: key.hex_hash(),
                    updated_at: now,
                    ..subsidy.clone()
                };
                st.insert(&(record.status.tag(), seq), &key)?;
                gt.insert(&key, &record)?;
                Ok(seq)
            },
        )?;
        debug!(seq, "stored gas subsidy");
        Ok(seq)
    }

    fn get_gas_subsidy(&self, tx_hash: &str, from_chain_id: u64) -> DbResult<Option<GasSubsidy>> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        let _guard = self.read_lock();
        Ok(self.gas_subsidy_tree.get(&key)?)
    }

    fn get_first_not_sent_gas_subsidy(&self) -> DbResult<Option<GasSubsidy>> {
        self.first_gas_subsidy_in(GasSubsidyStatus::NotSent)
    }

    fn get_first_timed_out_gas_subsidy(&self) -> DbResult<Option<GasSubsidy>> {
        self.first_gas_subsidy_in(GasSubsidyStatus::TimedOut)
    }

    fn get_first_failed_gas_subsidy(&self) -> DbResult<Option<GasSubsidy>> {
        self.first_gas_subsidy_in(GasSubsidyStatus::Failed)
    }

    #[instrument(
        skip(self, starcoin_tx_hash, sender_address),
        fields(component = components::DB_GAS_SUBSIDY)
    )]
    fn set_gas_subsidy_starcoin_tx_info(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: GasSubsidyStatus,
        starcoin_tx_hash: &[u8],
        sender_address: &[u8],
        sender_seq_num: u64,
    ) -> DbResult<()> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        self.update_gas_subsidy(&key, |subsidy| {
            subsidy
                .status
                .check_transition(old, GasSubsidyStatus::Processing)?;
            subsidy.status = GasSubsidyStatus::Processing;
            subsidy.starcoin_tx_hash = starcoin_tx_hash.to_vec();
            subsidy.sender_address = sender_address.to_vec();
            subsidy.sender_seq_num = sender_seq_num;
            Ok(())
        })?;
        debug!("gas subsidy submitted");
        Ok(())
    }

    fn set_gas_subsidy_status_processed(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: GasSubsidyStatus,
    ) -> DbResult<()> {
        self.set_gas_subsidy_status(tx_hash, from_chain_id, old, GasSubsidyStatus::Processed)
    }

    #[instrument(skip(self), fields(component = components::DB_GAS_SUBSIDY))]
    fn set_gas_subsidy_status(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: GasSubsidyStatus,
        new: GasSubsidyStatus,
    ) -> DbResult<()> {
        let key = RecordKey::parse(tx_hash, from_chain_id)?;
        self.update_gas_subsidy(&key, |subsidy| {
            subsidy.status.check_transition(old, new)?;
            subsidy.status = new;
            Ok(())
        })?;
        debug!("changed gas subsidy status");
        Ok(())
    }

    fn get_gas_subsidy_count_by_to_address(&self, to_address: &str) -> DbResult<u64> {
        let _guard = self.read_lock();
        let mut count = 0;
        for item in self.gas_subsidy_tree.iter() {
            let (_, subsidy) = item?;
            if subsidy.to_address == to_address {
                count += 1;
            }
        }
        Ok(count)
    }
}
