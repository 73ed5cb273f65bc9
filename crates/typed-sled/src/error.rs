use sled::transaction::{
    ConflictableTransactionError, TransactionError, UnabortableTransactionError,
};

use crate::codec::{BoxedError, CodecError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("codec error: {0}")]
    CodecError(#[from] CodecError),

    #[error("database error: {0}")]
    SledError(#[from] sled::Error),

    /// Another transaction touched the same keys. Sled reruns the closure.
    #[error("transaction conflict")]
    Conflict,

    /// Caller-requested abort carrying a domain error.
    #[error("transaction aborted: {0}")]
    Abort(BoxedError),

    #[error("transaction failed after {0} attempts: {1}")]
    RetriesExhausted(usize, sled::Error),
}

impl Error {
    /// Wraps a domain error so it aborts the enclosing transaction unchanged.
    pub fn abort(reason: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Abort(Box::new(reason))
    }

    /// Returns the domain error given to [`Error::abort`], if that is what this is.
    pub fn into_abort_reason(self) -> std::result::Result<BoxedError, Self> {
        match self {
            Self::Abort(reason) => Ok(reason),
            other => Err(other),
        }
    }
}

impl From<UnabortableTransactionError> for Error {
    fn from(value: UnabortableTransactionError) -> Self {
        match value {
            UnabortableTransactionError::Conflict => Error::Conflict,
            UnabortableTransactionError::Storage(e) => Error::SledError(e),
        }
    }
}

impl From<Error> for ConflictableTransactionError<Error> {
    fn from(value: Error) -> Self {
        match value {
            Error::Conflict => ConflictableTransactionError::Conflict,
            Error::SledError(e) => ConflictableTransactionError::Storage(e),
            other => ConflictableTransactionError::Abort(other),
        }
    }
}

impl From<TransactionError<Error>> for Error {
    fn from(value: TransactionError<Error>) -> Self {
        match value {
            TransactionError::Abort(e) => e,
            TransactionError::Storage(e) => Error::SledError(e),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
