//! Module for database local types

use std::{collections::BTreeMap, fmt, str::FromStr};

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{DbError, DbResult};

/// Upper bound on the number of entries a single listing call returns.
pub const MAX_LISTING_ENTRIES: usize = 1000;

/// Decodes a hex transaction hash into the raw key bytes.
pub fn decode_tx_hash(tx_hash: &str) -> DbResult<Vec<u8>> {
    hex::decode(tx_hash).map_err(|e| DbError::InvalidTxHash(tx_hash.to_string(), e.to_string()))
}

/// Payload bytes of a pending relay paired with the event that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesAndEvent<E> {
    pub bytes: Vec<u8>,
    pub event: E,
}

impl<E> BytesAndEvent<E> {
    pub fn new(bytes: Vec<u8>, event: E) -> Self {
        Self { bytes, event }
    }
}

/// One bounded page of the check set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTxPage<E> {
    /// Entries keyed by lowercase hex tx hash.
    pub entries: BTreeMap<String, BytesAndEvent<E>>,

    /// Hex hash of the first entry not included, set when the listing was
    /// cut at [`MAX_LISTING_ENTRIES`].
    pub next: Option<String>,
}

impl<E> CheckTxPage<E> {
    pub fn is_complete(&self) -> bool {
        self.next.is_none()
    }
}

/// One bounded page of the retry set, as two index-aligned sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryTxPage<E> {
    pub keys: Vec<Vec<u8>>,
    pub events: Vec<E>,

    /// Key of the first entry not included, set when the listing was cut at
    /// [`MAX_LISTING_ENTRIES`].
    pub next: Option<Vec<u8>>,
}

impl<E> RetryTxPage<E> {
    pub fn is_complete(&self) -> bool {
        self.next.is_none()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Implements the string forms and transition table of a lifecycle status.
macro_rules! lifecycle_status {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = ($tag:literal, $label:literal) => [$($next:ident),*]),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            BorshSerialize,
            BorshDeserialize,
            Serialize,
            Deserialize,
            Arbitrary,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Single-byte tag used as the leading byte of status index keys.
            pub fn tag(&self) -> u8 {
                match self {
                    $($name::$variant => $tag),+
                }
            }

            pub fn from_tag(tag: u8) -> Option<Self> {
                match tag {
                    $($tag => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn can_transition_to(&self, next: $name) -> bool {
                match self {
                    $($name::$variant => [$($name::$next),*].contains(&next),)+
                }
            }

            /// Checks a compare-and-set move from `expected` to `next` against
            /// the currently stored status.
            pub fn check_transition(&self, expected: $name, next: $name) -> DbResult<()> {
                if *self != expected {
                    return Err(DbError::StatusMismatch {
                        expected: expected.as_str(),
                        actual: self.as_str(),
                    });
                }
                if !self.can_transition_to(next) {
                    return Err(DbError::InvalidStatusTransition {
                        from: self.as_str(),
                        to: next.as_str(),
                    });
                }
                Ok(())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DbError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(DbError::CodecError(format!(
                        "unknown {} {other:?}",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

lifecycle_status! {
    /// Where a relayed source-chain transaction is in its delivery to the
    /// destination chain.
    pub enum PolyTxStatus {
        /// Waiting to be picked up.
        Pending = (0, "pending") => [Processing, Failed, TimedOut],
        /// Submitted, waiting for the destination chain.
        Processing = (1, "processing") => [Processed, Failed, TimedOut, Pending],
        /// Executed on the destination chain. Terminal.
        Processed = (2, "processed") => [],
        Failed = (3, "failed") => [Pending, Processing],
        TimedOut = (4, "timed_out") => [Pending, Processing],
    }
}

lifecycle_status! {
    /// Delivery state of a gas subsidy transfer.
    pub enum GasSubsidyStatus {
        NotSent = (0, "not_sent") => [Processing, Failed],
        Processing = (1, "processing") => [Processed, Failed, TimedOut, NotSent],
        Processed = (2, "processed") => [],
        Failed = (3, "failed") => [NotSent, Processing],
        TimedOut = (4, "timed_out") => [NotSent, Processing],
    }
}

/// A source-chain transaction tracked through its relay lifecycle.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize, Arbitrary,
)]
pub struct PolyTx {
    /// Queue position assigned by the store. Ignored on insert.
    pub tx_index: u64,
    /// Lowercase hex hash of the source transaction.
    pub tx_hash: String,
    pub from_chain_id: u64,
    /// Proof or cross-chain message bytes needed to relay the tx.
    #[serde(with = "hex::serde")]
    pub payload: Vec<u8>,
    pub status: PolyTxStatus,
    /// Hex hash of the destination-chain transaction, once submitted.
    pub starcoin_tx_hash: Option<String>,
    /// Execution status reported by the destination chain.
    pub starcoin_status: Option<String>,
    pub starcoin_status_msg: Option<String>,
    /// Seconds since UNIX epoch of the last write.
    pub updated_at: u64,
}

impl PolyTx {
    pub fn new_pending(tx_hash: impl Into<String>, from_chain_id: u64, payload: Vec<u8>) -> Self {
        Self {
            tx_index: 0,
            tx_hash: tx_hash.into(),
            from_chain_id,
            payload,
            status: PolyTxStatus::Pending,
            starcoin_tx_hash: None,
            starcoin_status: None,
            starcoin_status_msg: None,
            updated_at: 0,
        }
    }
}

/// A [`PolyTx`] taken out of the live queue, waiting to be pushed back.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize, Arbitrary,
)]
pub struct RemovedPolyTx {
    /// Position in the removal queue, the handle for pushing the tx back.
    pub removed_index: u64,
    pub tx: PolyTx,
    /// Status the tx had when it was removed.
    pub removed_status: PolyTxStatus,
    pub removed_at: u64,
}

/// Destination-chain gas handed to the receiver of a relayed transfer.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize, Arbitrary,
)]
pub struct GasSubsidy {
    /// Queue position assigned by the store on first insert.
    pub seq: u64,
    pub tx_hash: String,
    pub from_chain_id: u64,
    pub to_address: String,
    pub subsidy_amount: u64,
    pub status: GasSubsidyStatus,
    #[serde(with = "hex::serde")]
    pub starcoin_tx_hash: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub sender_address: Vec<u8>,
    pub sender_seq_num: u64,
    pub updated_at: u64,
}

impl GasSubsidy {
    pub fn new_not_sent(
        tx_hash: impl Into<String>,
        from_chain_id: u64,
        to_address: impl Into<String>,
        subsidy_amount: u64,
    ) -> Self {
        Self {
            seq: 0,
            tx_hash: tx_hash.into(),
            from_chain_id,
            to_address: to_address.into(),
            subsidy_amount,
            status: GasSubsidyStatus::NotSent,
            starcoin_tx_hash: Vec::new(),
            sender_address: Vec::new(),
            sender_seq_num: 0,
            updated_at: 0,
        }
    }
}

/// Result of checking whether the relay fee of a tx has been paid.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
    Arbitrary,
)]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    #[default]
    Unchecked,
    Paid,
    NotPaid,
    /// The fee record could not be found on the source chain.
    Missing,
}

/// A relay attempt rejected for fee reasons, re-checked periodically.
#[derive(
    Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize, Arbitrary,
)]
pub struct PolyTxRetry {
    pub tx_hash: String,
    pub from_chain_id: u64,
    #[serde(with = "hex::serde")]
    pub payload: Vec<u8>,
    pub check_fee_count: u32,
    pub fee_status: FeeStatus,
    pub updated_at: u64,
}

impl PolyTxRetry {
    pub fn new(tx_hash: impl Into<String>, from_chain_id: u64, payload: Vec<u8>) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            from_chain_id,
            payload,
            check_fee_count: 0,
            fee_status: FeeStatus::Unchecked,
            updated_at: 0,
        }
    }
}
