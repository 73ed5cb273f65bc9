//! Trait definitions for low level database interfaces.
//!
//! Transaction hashes cross these interfaces as lowercase hex strings and are
//! decoded before anything is written. Lifecycle records are addressed by
//! `(tx_hash, from_chain_id)`.

use std::sync::Arc;

use crate::{
    event::RelayEvent,
    types::{
        CheckTxPage, FeeStatus, GasSubsidy, GasSubsidyStatus, PolyTx, PolyTxRetry, PolyTxStatus,
        RemovedPolyTx, RetryTxPage,
    },
    DbResult,
};

/// Common database backend interface that relay workers can be parameterized
/// over instead of over each individual trait.
pub trait DatabaseBackend: Send + Sync {
    type Event: RelayEvent;

    fn check_tx_db(&self) -> Arc<impl CheckTxDatabase<Self::Event>>;
    fn retry_tx_db(&self) -> Arc<impl RetryTxDatabase<Self::Event>>;
    fn height_db(&self) -> Arc<impl HeightDatabase>;
    fn poly_tx_db(&self) -> Arc<impl PolyTxDatabase>;
    fn gas_subsidy_db(&self) -> Arc<impl GasSubsidyDatabase>;
    fn poly_tx_retry_db(&self) -> Arc<impl PolyTxRetryDatabase>;
}

/// Transactions submitted to the destination chain and awaiting confirmation.
pub trait CheckTxDatabase<E: RelayEvent>: Send + Sync + 'static {
    /// Records `raw` and `event` under `tx_hash`, replacing any previous entry.
    ///
    /// Fails with [`crate::DbError::InvalidTxHash`] before touching the store
    /// if `tx_hash` is not valid hex.
    fn put_check_tx(&self, tx_hash: &str, raw: Vec<u8>, event: &E) -> DbResult<()>;

    /// Deletes the entry for `tx_hash`. Deleting an absent entry succeeds.
    fn del_check_tx(&self, tx_hash: &str) -> DbResult<()>;

    /// Lists entries in key order, at most
    /// [`MAX_LISTING_ENTRIES`](crate::types::MAX_LISTING_ENTRIES) of them.
    fn get_all_check_txs(&self) -> DbResult<CheckTxPage<E>>;

    /// Like [`CheckTxDatabase::get_all_check_txs`], starting at `start`
    /// (inclusive). Pass the `next` marker of a previous page to resume.
    fn get_check_txs_from(&self, start: &str) -> DbResult<CheckTxPage<E>>;
}

/// Relay attempts that must be resubmitted.
pub trait RetryTxDatabase<E: RelayEvent>: Send + Sync + 'static {
    /// Records `event` under the caller-defined `key`, replacing any previous
    /// entry.
    fn put_retry_tx(&self, key: &[u8], event: &E) -> DbResult<()>;

    /// Deletes the entry for `key`. Deleting an absent entry succeeds.
    fn del_retry_tx(&self, key: &[u8]) -> DbResult<()>;

    /// Lists entries in key order as index-aligned key and event sequences.
    fn get_all_retry_txs(&self) -> DbResult<RetryTxPage<E>>;

    /// Like [`RetryTxDatabase::get_all_retry_txs`], starting at `start`
    /// (inclusive).
    fn get_retry_txs_from(&self, start: &[u8]) -> DbResult<RetryTxPage<E>>;
}

/// Last source-chain height the relay has fully processed.
pub trait HeightDatabase: Send + Sync + 'static {
    fn update_height(&self, height: u32) -> DbResult<()>;

    /// Returns the stored height, or 0 if none was ever stored.
    fn get_height(&self) -> DbResult<u32>;
}

/// Relay lifecycle of source-chain transactions.
///
/// Every status-changing call names the status it expects to find and fails
/// without writing anything if the stored status differs or if the move is
/// not allowed by [`PolyTxStatus::can_transition_to`].
pub trait PolyTxDatabase: Send + Sync + 'static {
    /// Inserts a new record at the back of the queue and returns its
    /// `tx_index`. Fails with [`crate::DbError::EntryAlreadyExists`] if a
    /// record for the same key is live.
    fn put_poly_tx(&self, tx: PolyTx) -> DbResult<u64>;

    fn get_poly_tx(&self, tx_hash: &str, from_chain_id: u64) -> DbResult<Option<PolyTx>>;

    /// Moves a live record into the removal queue and returns the index it is
    /// filed under there.
    fn remove_poly_tx(&self, tx_hash: &str, from_chain_id: u64) -> DbResult<u64>;

    /// Takes the removed record filed under `removed_index` and re-enqueues it as
    /// [`PolyTxStatus::Pending`] at the back of the live queue. Returns the
    /// new `tx_index`.
    fn push_back_removed_poly_tx(&self, removed_index: u64) -> DbResult<u64>;

    /// Oldest record in the removal queue.
    fn get_first_removed_poly_tx_to_be_pushed_back(&self) -> DbResult<Option<RemovedPolyTx>>;

    fn set_poly_tx_status(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: PolyTxStatus,
        new: PolyTxStatus,
    ) -> DbResult<()>;

    fn set_poly_tx_status_processing(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: PolyTxStatus,
    ) -> DbResult<()>;

    /// Records the destination-chain tx hash of a record that is
    /// [`PolyTxStatus::Processing`].
    fn set_processing_poly_tx_starcoin_tx_hash(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        starcoin_tx_hash: &str,
    ) -> DbResult<()>;

    fn set_poly_tx_status_processed(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: PolyTxStatus,
        starcoin_tx_hash: &str,
    ) -> DbResult<()>;

    /// Records the execution status reported by the destination chain. Does
    /// not change the lifecycle status.
    fn update_poly_tx_starcoin_status(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        starcoin_status: &str,
        msg: &str,
    ) -> DbResult<()>;

    /// Failed record with the lowest `tx_index`.
    fn get_first_failed_poly_tx(&self) -> DbResult<Option<PolyTx>>;

    /// Timed-out record with the lowest `tx_index`.
    fn get_first_timed_out_poly_tx(&self) -> DbResult<Option<PolyTx>>;

    /// Failed and timed-out records in queue order, bounded.
    fn get_timed_out_or_failed_poly_tx_list(&self) -> DbResult<Vec<PolyTx>>;

    /// Processed records from `from_chain_id`, updated strictly after
    /// `updated_after`, that have no gas subsidy yet. Bounded.
    fn get_poly_tx_list_not_have_gas_subsidy(
        &self,
        from_chain_id: u64,
        updated_after: u64,
    ) -> DbResult<Vec<PolyTx>>;
}

/// Queue of gas subsidy transfers to relay receivers.
pub trait GasSubsidyDatabase: Send + Sync + 'static {
    /// Inserts or overwrites a subsidy. A new subsidy is appended to the queue,
    /// an existing one keeps its position. Returns the queue position.
    fn put_gas_subsidy(&self, subsidy: GasSubsidy) -> DbResult<u64>;

    fn get_gas_subsidy(&self, tx_hash: &str, from_chain_id: u64) -> DbResult<Option<GasSubsidy>>;

    fn get_first_not_sent_gas_subsidy(&self) -> DbResult<Option<GasSubsidy>>;
    fn get_first_timed_out_gas_subsidy(&self) -> DbResult<Option<GasSubsidy>>;
    fn get_first_failed_gas_subsidy(&self) -> DbResult<Option<GasSubsidy>>;

    /// Moves the subsidy to [`GasSubsidyStatus::Processing`] and records the
    /// submitted transfer.
    fn set_gas_subsidy_starcoin_tx_info(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: GasSubsidyStatus,
        starcoin_tx_hash: &[u8],
        sender_address: &[u8],
        sender_seq_num: u64,
    ) -> DbResult<()>;

    fn set_gas_subsidy_status_processed(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: GasSubsidyStatus,
    ) -> DbResult<()>;

    fn set_gas_subsidy_status(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old: GasSubsidyStatus,
        new: GasSubsidyStatus,
    ) -> DbResult<()>;

    /// Number of subsidies ever recorded for `to_address`.
    fn get_gas_subsidy_count_by_to_address(&self, to_address: &str) -> DbResult<u64>;
}

/// Bookkeeping for relay attempts held back because of their fee.
pub trait PolyTxRetryDatabase: Send + Sync + 'static {
    /// Inserts or replaces the retry entry of `retry`'s key.
    fn put_poly_tx_retry(&self, retry: PolyTxRetry) -> DbResult<()>;

    fn get_poly_tx_retry(&self, tx_hash: &str, from_chain_id: u64)
        -> DbResult<Option<PolyTxRetry>>;

    /// All retry entries in key order, bounded.
    fn get_all_poly_tx_retry(&self) -> DbResult<Vec<PolyTxRetry>>;

    fn del_poly_tx_retry(&self, tx_hash: &str, from_chain_id: u64) -> DbResult<()>;

    /// Increments the fee check counter if it still equals `old_count` and
    /// returns the new value.
    fn increase_poly_tx_retry_check_fee_count(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        old_count: u32,
    ) -> DbResult<u32>;

    fn set_poly_tx_retry_fee_status(
        &self,
        tx_hash: &str,
        from_chain_id: u64,
        fee_status: FeeStatus,
    ) -> DbResult<()>;
}
