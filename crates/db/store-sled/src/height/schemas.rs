use crate::{define_table_without_codec, impl_bytes_key_codec, impl_integer_value_codec};

/// Fixed key of the source-chain height register.
pub(crate) const POLY_HEIGHT_KEY: &[u8] = b"poly_height";

define_table_without_codec!(
    /// Singleton registers. The height is kept as 4 little-endian bytes.
    (HeightSchema) Vec<u8> => u32
);
impl_bytes_key_codec!(HeightSchema);
impl_integer_value_codec!(HeightSchema, u32, le);
