use crate::{define_table_without_codec, impl_bytes_key_codec, impl_bytes_value_codec};

define_table_without_codec!(
    /// Relay attempts to resubmit, keyed by caller-defined bytes. Values are
    /// the event's own encoding.
    (RetryTxSchema) Vec<u8> => Vec<u8>
);
impl_bytes_key_codec!(RetryTxSchema);
impl_bytes_value_codec!(RetryTxSchema);
