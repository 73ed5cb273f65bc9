use thiserror::Error;
use typed_sled::error::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DbError {
    /// The caller passed a transaction hash that is not valid hex.
    #[error("invalid tx hash {0:?}: {1}")]
    InvalidTxHash(String, String),

    /// A stored or supplied value could not be encoded or decoded.
    #[error("codec error {0}")]
    CodecError(String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("transaction error {0}")]
    TransactionError(String),

    #[error("entry already exists")]
    EntryAlreadyExists,

    #[error("missing entry for tx {tx_hash} from chain {from_chain_id}")]
    MissingEntry { tx_hash: String, from_chain_id: u64 },

    #[error("missing removed tx at index {0}")]
    MissingRemovedEntry(u64),

    /// Compare-and-set on a status failed because the stored status differs.
    #[error("status mismatch: expected {expected}, found {actual}")]
    StatusMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("invalid status transition {from} -> {to}")]
    InvalidStatusTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("check fee count mismatch: expected {expected}, found {actual}")]
    CheckFeeCountMismatch { expected: u32, actual: u32 },

    #[error("{0}")]
    Other(String),
}

impl DbError {
    pub fn missing_entry(tx_hash: impl Into<String>, from_chain_id: u64) -> Self {
        Self::MissingEntry {
            tx_hash: tx_hash.into(),
            from_chain_id,
        }
    }

    /// Whether this error comes from the storage engine rather than from
    /// input validation or a lifecycle rule.
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            Self::IoError(_) | Self::TransactionError(_) | Self::Other(_)
        )
    }
}

impl From<anyhow::Error> for DbError {
    fn from(value: anyhow::Error) -> Self {
        Self::Other(value.to_string())
    }
}

impl From<Error> for DbError {
    fn from(value: Error) -> Self {
        match value {
            Error::CodecError(e) => Self::CodecError(e.to_string()),
            Error::SledError(sled::Error::Io(e)) => Self::IoError(e.to_string()),
            Error::SledError(e) => Self::Other(format!("sled error: {e}")),
            Error::Conflict => Self::TransactionError("unresolved conflict".to_string()),
            Error::RetriesExhausted(attempts, e) => {
                Self::TransactionError(format!("gave up after {attempts} attempts: {e}"))
            }
            Error::Abort(reason) => match reason.downcast::<DbError>() {
                Ok(db_err) => *db_err,
                Err(other) => Self::TransactionError(other.to_string()),
            },
        }
    }
}

impl From<hex::FromHexError> for DbError {
    fn from(value: hex::FromHexError) -> Self {
        Self::CodecError(format!("hex: {value}"))
    }
}

impl From<sled::Error> for DbError {
    fn from(value: sled::Error) -> Self {
        Error::SledError(value).into()
    }
}

pub type DbResult<T> = Result<T, DbError>;
