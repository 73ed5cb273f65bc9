//! Key and value codecs for typed trees.

use thiserror::Error;

use crate::schema::Schema;

/// Boxed error carried by the codec failure variants.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CodecError {
    /// A fixed-width key had the wrong number of bytes.
    #[error("invalid key length in '{schema}' (expected {expected} bytes, got {actual})")]
    InvalidKeyLength {
        schema: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("failed to serialize '{schema}' entry: {source}")]
    SerializationFailed {
        schema: &'static str,
        #[source]
        source: BoxedError,
    },

    #[error("failed to deserialize '{schema}' entry: {source}")]
    DeserializationFailed {
        schema: &'static str,
        #[source]
        source: BoxedError,
    },

    #[error("{0}")]
    Other(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Encodes and decodes the key type of schema `S`.
///
/// Encoded keys determine the iteration order of the tree, so implementations
/// that need ordered scans must produce lexicographically comparable bytes.
pub trait KeyCodec<S: Schema>: Sized {
    fn encode_key(&self) -> CodecResult<Vec<u8>>;
    fn decode_key(buf: &[u8]) -> CodecResult<Self>;
}

/// Encodes and decodes the value type of schema `S`.
pub trait ValueCodec<S: Schema>: Sized {
    fn encode_value(&self) -> CodecResult<Vec<u8>>;
    fn decode_value(buf: &[u8]) -> CodecResult<Self>;
}

/// Reads a fixed-size array out of `buf`, failing if the length differs.
pub fn fixed_bytes<S: Schema, const N: usize>(buf: &[u8]) -> CodecResult<[u8; N]> {
    buf.try_into().map_err(|_| CodecError::InvalidKeyLength {
        schema: S::TREE_NAME.0,
        expected: N,
        actual: buf.len(),
    })
}
