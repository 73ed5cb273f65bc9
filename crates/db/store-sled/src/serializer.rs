//! Conversion between caller events and the bytes kept in the store.

use borsh::{BorshDeserialize, BorshSerialize};
use relayer_db_types::{event::RelayEvent, types::BytesAndEvent, DbError, DbResult};

pub(crate) fn encode_event<E: RelayEvent>(event: &E) -> DbResult<Vec<u8>> {
    event
        .encode_event()
        .map_err(|e| DbError::CodecError(e.to_string()))
}

pub(crate) fn decode_event<E: RelayEvent>(buf: &[u8]) -> DbResult<E> {
    E::decode_event(buf).map_err(|e| DbError::CodecError(e.to_string()))
}

/// Stored form of a check-set value: the payload and the already encoded
/// event, so the store never depends on the event type.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub(crate) struct CheckTxEntry {
    pub(crate) payload: Vec<u8>,
    pub(crate) event: Vec<u8>,
}

impl CheckTxEntry {
    pub(crate) fn encode<E: RelayEvent>(payload: Vec<u8>, event: &E) -> DbResult<Self> {
        Ok(Self {
            payload,
            event: encode_event(event)?,
        })
    }

    pub(crate) fn decode<E: RelayEvent>(self) -> DbResult<BytesAndEvent<E>> {
        let event = decode_event(&self.event)?;
        Ok(BytesAndEvent::new(self.payload, event))
    }
}
