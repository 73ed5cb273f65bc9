use relayer_db_types::types::PolyTxRetry;

use crate::{define_table_with_seek_key_codec, lexicographic::RecordKey};

define_table_with_seek_key_codec!(
    /// Fee retry bookkeeping by `(from_chain_id, tx_hash)`.
    (PolyTxRetrySchema) RecordKey => PolyTxRetry
);
