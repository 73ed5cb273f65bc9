use relayer_db_types::types::{GasSubsidy, PolyTx, RemovedPolyTx};

use crate::{
    define_table_with_seek_key_codec, define_table_without_codec, impl_integer_value_codec,
    impl_seek_key_codec, impl_seek_value_codec,
    lexicographic::{RecordKey, StatusIdxKey},
};

/// Store-assigned sequences, one counter per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Counter {
    PolyTxIndex = 0,
    RemovedIndex = 1,
    GasSubsidySeq = 2,
}

impl Counter {
    pub(crate) fn key(self) -> u8 {
        self as u8
    }
}

define_table_with_seek_key_codec!(
    /// Live poly txs by `(from_chain_id, tx_hash)`.
    (PolyTxSchema) RecordKey => PolyTx
);

define_table_without_codec!(
    /// Index of live poly txs by `(status, tx_index)`.
    (PolyTxStatusIdxSchema) StatusIdxKey => RecordKey
);
impl_seek_key_codec!(PolyTxStatusIdxSchema, StatusIdxKey);
impl_seek_value_codec!(PolyTxStatusIdxSchema, RecordKey);

define_table_with_seek_key_codec!(
    /// Removal queue, by the index assigned on removal.
    (RemovedPolyTxSchema) u64 => RemovedPolyTx
);

define_table_with_seek_key_codec!(
    /// Gas subsidies by `(from_chain_id, tx_hash)`.
    (GasSubsidySchema) RecordKey => GasSubsidy
);

define_table_without_codec!(
    /// Index of gas subsidies by `(status, seq)`.
    (GasSubsidyStatusIdxSchema) StatusIdxKey => RecordKey
);
impl_seek_key_codec!(GasSubsidyStatusIdxSchema, StatusIdxKey);
impl_seek_value_codec!(GasSubsidyStatusIdxSchema, RecordKey);

define_table_without_codec!(
    /// Last value handed out by each [`Counter`].
    (CounterSchema) u8 => u64
);
impl_seek_key_codec!(CounterSchema, u8);
impl_integer_value_codec!(CounterSchema, u64);
