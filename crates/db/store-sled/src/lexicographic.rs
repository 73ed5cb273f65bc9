//! Order-preserving key encodings.
//!
//! Integers are written big-endian so that sled's byte order matches numeric
//! order, which the status indexes rely on for "first in state" seeks.

use anyhow::anyhow;
use relayer_db_types::{types::decode_tx_hash, DbResult};

/// Trait for types that can be encoded and decoded lexicographically.
pub(crate) trait LexicographicKey: Sized {
    fn encode_lexicographic(&self, out: &mut Vec<u8>);
    fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self>;
}

/// Encode a lexicographic key into bytes.
pub(crate) fn encode_key<T: LexicographicKey>(value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    value.encode_lexicographic(&mut out);
    out
}

/// Decode a lexicographic key from bytes.
pub(crate) fn decode_key<T: LexicographicKey>(data: &[u8]) -> anyhow::Result<T> {
    let mut remaining = data;
    let value = T::decode_lexicographic(&mut remaining)?;
    if !remaining.is_empty() {
        return Err(anyhow!("lexicographic key has trailing bytes"));
    }
    Ok(value)
}

fn read_exact<const N: usize>(data: &mut &[u8]) -> anyhow::Result<[u8; N]> {
    if data.len() < N {
        return Err(anyhow!(
            "lexicographic key underflow: need {N} bytes, got {}",
            data.len()
        ));
    }
    let (prefix, rest) = data.split_at(N);
    *data = rest;
    let mut out = [0u8; N];
    out.copy_from_slice(prefix);
    Ok(out)
}

impl LexicographicKey for u8 {
    fn encode_lexicographic(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }

    fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(read_exact::<1>(data)?[0])
    }
}

impl LexicographicKey for u64 {
    fn encode_lexicographic(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_be_bytes());
    }

    fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(u64::from_be_bytes(read_exact::<8>(data)?))
    }
}

impl<A, B> LexicographicKey for (A, B)
where
    A: LexicographicKey,
    B: LexicographicKey,
{
    fn encode_lexicographic(&self, out: &mut Vec<u8>) {
        self.0.encode_lexicographic(out);
        self.1.encode_lexicographic(out);
    }

    fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self> {
        let first = A::decode_lexicographic(data)?;
        let second = B::decode_lexicographic(data)?;
        Ok((first, second))
    }
}

/// Key of a lifecycle record: source chain, then the raw tx hash.
///
/// The hash has no length prefix and takes the rest of the buffer, so a
/// `RecordKey` can only be the last component of a composite key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct RecordKey {
    pub(crate) from_chain_id: u64,
    pub(crate) tx_hash: Vec<u8>,
}

impl RecordKey {
    pub(crate) fn new(from_chain_id: u64, tx_hash: Vec<u8>) -> Self {
        Self {
            from_chain_id,
            tx_hash,
        }
    }

    /// Builds the key from a hex hash as received at the API boundary.
    pub(crate) fn parse(tx_hash: &str, from_chain_id: u64) -> DbResult<Self> {
        Ok(Self::new(from_chain_id, decode_tx_hash(tx_hash)?))
    }

    /// Canonical lowercase hex form of the hash.
    pub(crate) fn hex_hash(&self) -> String {
        hex::encode(&self.tx_hash)
    }
}

impl LexicographicKey for RecordKey {
    fn encode_lexicographic(&self, out: &mut Vec<u8>) {
        self.from_chain_id.encode_lexicographic(out);
        out.extend_from_slice(&self.tx_hash);
    }

    fn decode_lexicographic(data: &mut &[u8]) -> anyhow::Result<Self> {
        let from_chain_id = u64::decode_lexicographic(data)?;
        let tx_hash = data.to_vec();
        *data = &[];
        Ok(Self::new(from_chain_id, tx_hash))
    }
}

/// Status index key: status tag, then queue position.
pub(crate) type StatusIdxKey = (u8, u64);
