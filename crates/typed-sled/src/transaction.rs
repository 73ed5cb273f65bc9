use std::{fmt::Debug, thread, time::Duration};

use sled::{
    transaction::{ConflictableTransactionResult, TransactionError, TransactionResult},
    Transactional,
};

use crate::{
    error::{Error, Result},
    tree::SledTransactionalTree,
    Schema, SledTree,
};

/// Delay policy between attempts of a failed transaction.
pub trait Backoff: Debug + Send + Sync {
    /// Delay before attempt number `attempt` (1-based, the first retry is 1).
    fn delay(&self, attempt: usize) -> Duration;
}

/// Waits the same amount of time before every retry.
#[derive(Debug, Clone, Copy)]
pub struct ConstantBackoff {
    delay: Duration,
}

impl ConstantBackoff {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }
}

impl Backoff for ConstantBackoff {
    fn delay(&self, _attempt: usize) -> Duration {
        self.delay
    }
}

/// Doubles the delay on every retry up to `max_ms`.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialBackoff {
    base_ms: u64,
    max_ms: u64,
}

impl ExponentialBackoff {
    pub fn new(base_ms: u64, max_ms: u64) -> Self {
        Self { base_ms, max_ms }
    }
}

impl Backoff for ExponentialBackoff {
    fn delay(&self, attempt: usize) -> Duration {
        let shift = attempt.saturating_sub(1).min(32) as u32;
        let ms = self.base_ms.saturating_mul(1u64 << shift).min(self.max_ms);
        Duration::from_millis(ms)
    }
}

/// Trait for performing transactions on a tuple of typed sled trees.
pub trait SledTransactional {
    type View;

    /// Runs `func` atomically over all trees in the tuple.
    ///
    /// Sled reruns the closure on conflicts, so it must be free of side
    /// effects other than the tree writes.
    fn transaction<F, R, E>(&self, func: F) -> TransactionResult<R, E>
    where
        F: Fn(Self::View) -> ConflictableTransactionResult<R, E>;

    /// Like [`SledTransactional::transaction`], additionally retrying storage
    /// failures up to `retry_count` times. Aborts are returned immediately.
    fn transaction_with_retry<F, R>(
        &self,
        backoff: &dyn Backoff,
        retry_count: usize,
        func: F,
    ) -> Result<R>
    where
        F: Fn(Self::View) -> ConflictableTransactionResult<R, Error>,
    {
        let mut attempt = 0;
        loop {
            match self.transaction(&func) {
                Ok(res) => return Ok(res),
                Err(TransactionError::Abort(e)) => return Err(e),
                Err(TransactionError::Storage(e)) => {
                    if attempt >= retry_count {
                        return Err(Error::RetriesExhausted(attempt + 1, e));
                    }
                    attempt += 1;
                    thread::sleep(backoff.delay(attempt));
                }
            }
        }
    }
}

macro_rules! impl_sled_transactional {
    ($(($idx:tt, $schema:ident, $var:ident)),+) => {
        impl<'a, $($schema: Schema),+> SledTransactional for ($(&'a SledTree<$schema>),+,) {
            type View = ($(SledTransactionalTree<$schema>),+,);

            fn transaction<F, R, E>(&self, func: F) -> TransactionResult<R, E>
            where
                F: Fn(Self::View) -> ConflictableTransactionResult<R, E>,
            {
                ($(&*self.$idx.inner),+,).transaction(|($($var),+,)| {
                    func(($(SledTransactionalTree::<$schema>::new($var.clone())),+,))
                })
            }
        }
    };
}

impl_sled_transactional!((0, S0, t0));
impl_sled_transactional!((0, S0, t0), (1, S1, t1));
impl_sled_transactional!((0, S0, t0), (1, S1, t1), (2, S2, t2));
impl_sled_transactional!((0, S0, t0), (1, S1, t1), (2, S2, t2), (3, S3, t3));
impl_sled_transactional!(
    (0, S0, t0),
    (1, S1, t1),
    (2, S2, t2),
    (3, S3, t3),
    (4, S4, t4)
);
