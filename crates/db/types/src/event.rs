//! Chain events stored alongside relay records.
//!
//! The store never looks inside an event. It only needs to turn one into bytes
//! and back, which is what [`RelayEvent`] captures. The chain client decides
//! the concrete type.

use std::fmt;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("event codec: {0}")]
pub struct EventCodecError(pub String);

/// An event payload the store can persist without interpreting it.
///
/// `decode_event(encode_event(e))` must yield a value equal to `e`.
pub trait RelayEvent: Clone + fmt::Debug + Send + Sync + 'static {
    fn encode_event(&self) -> Result<Vec<u8>, EventCodecError>;
    fn decode_event(buf: &[u8]) -> Result<Self, EventCodecError>;
}

/// Raw pass-through, for callers that keep events pre-encoded.
impl RelayEvent for Vec<u8> {
    fn encode_event(&self) -> Result<Vec<u8>, EventCodecError> {
        Ok(self.clone())
    }

    fn decode_event(buf: &[u8]) -> Result<Self, EventCodecError> {
        Ok(buf.to_vec())
    }
}

/// Contract event emitted on the source chain, as delivered by the chain
/// client.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
    Arbitrary,
)]
pub struct ChainEvent {
    pub block_hash: String,
    pub block_number: u64,
    pub transaction_hash: String,
    pub transaction_index: u64,
    pub transaction_global_index: u64,
    pub event_index: u32,
    pub event_key: String,
    pub event_seq_number: u64,
    /// Move type tag of the event struct, e.g. `0x1::CrossChain::Event`.
    pub type_tag: String,
    /// BCS-encoded event body.
    #[serde(with = "hex::serde")]
    pub data: Vec<u8>,
}

impl RelayEvent for ChainEvent {
    fn encode_event(&self) -> Result<Vec<u8>, EventCodecError> {
        borsh::to_vec(self).map_err(|e| EventCodecError(e.to_string()))
    }

    fn decode_event(buf: &[u8]) -> Result<Self, EventCodecError> {
        borsh::from_slice(buf).map_err(|e| EventCodecError(e.to_string()))
    }
}
