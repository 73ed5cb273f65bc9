use relayer_db_types::{DbError, DbResult};
use typed_sled::{error::Result as SledResult, SledTransactionalTree};

use super::schemas::{
    Counter, CounterSchema, GasSubsidySchema, GasSubsidyStatusIdxSchema, PolyTxSchema,
    PolyTxStatusIdxSchema, RemovedPolyTxSchema,
};
use crate::{define_sled_database, lexicographic::RecordKey};

define_sled_database!(
    pub struct LifecycleDBSled {
        pub(super) poly_tx_tree: PolyTxSchema,
        pub(super) poly_tx_status_tree: PolyTxStatusIdxSchema,
        pub(super) removed_tree: RemovedPolyTxSchema,
        pub(super) gas_subsidy_tree: GasSubsidySchema,
        pub(super) gas_subsidy_status_tree: GasSubsidyStatusIdxSchema,
        pub(super) counter_tree: CounterSchema,
    }
);

impl LifecycleDBSled {
    pub(super) fn read_lock(&self) -> parking_lot::RwLockReadGuard<'_, ()> {
        self.lock.read()
    }

    pub(super) fn write_lock(&self) -> parking_lot::RwLockWriteGuard<'_, ()> {
        self.lock.write()
    }

    pub(super) fn config(&self) -> &crate::SledDbConfig {
        &self.config
    }
}

/// Hands out the next value of `counter`, starting at 1.
pub(super) fn next_index(
    counters: &SledTransactionalTree<CounterSchema>,
    counter: Counter,
) -> SledResult<u64> {
    let next = counters.get(&counter.key())?.unwrap_or_default() + 1;
    counters.insert(&counter.key(), &next)?;
    Ok(next)
}

pub(super) fn missing(key: &RecordKey) -> DbError {
    DbError::missing_entry(key.hex_hash(), key.from_chain_id)
}

/// Queue positions from each of `lists`, merged in ascending
/// order and cut at `limit`.
pub(super) fn merge_positions<I>(lists: I, limit: usize) -> DbResult<Vec<(u64, RecordKey)>>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = DbResult<(u64, RecordKey)>>,
{
    let mut merged = Vec::new();
    for list in lists {
        for item in list.into_iter().take(limit) {
            merged.push(item?);
        }
    }
    merged.sort_by_key(|(pos, _)| *pos);
    merged.truncate(limit);
    Ok(merged)
}
