use crate::{
    define_table_without_codec, impl_borsh_value_codec, impl_bytes_key_codec,
    serializer::CheckTxEntry,
};

define_table_without_codec!(
    /// Transactions awaiting confirmation on the destination chain, keyed by
    /// the raw tx hash.
    (CheckTxSchema) Vec<u8> => CheckTxEntry
);
impl_bytes_key_codec!(CheckTxSchema);
impl_borsh_value_codec!(CheckTxSchema, CheckTxEntry);
