use std::sync::Arc;

use relayer_db_types::DbResult;
use sled::transaction::ConflictableTransactionResult;
use typed_sled::{
    error::Error,
    transaction::{Backoff, ConstantBackoff, SledTransactional},
};

pub(crate) const DEFAULT_RETRY_COUNT: u16 = 3;
pub(crate) const DEFAULT_RETRY_DELAY_MS: u64 = 150;
pub(crate) const TEST_RETRY_DELAY_MS: u64 = 50; // Faster for tests

/// Retry policy for the sled transactions run by every store.
#[derive(Debug, Clone)]
pub struct SledDbConfig {
    pub retry_count: u16,
    pub backoff: Arc<dyn Backoff>,
}

impl SledDbConfig {
    pub fn new(retry_count: u16, backoff: Arc<dyn Backoff>) -> Self {
        Self {
            retry_count,
            backoff,
        }
    }

    pub fn new_with_constant_backoff(retry_count: u16, delay_ms: u64) -> Self {
        Self::new(retry_count, Arc::new(ConstantBackoff::new(delay_ms)))
    }

    pub fn production() -> Self {
        Self::new_with_constant_backoff(DEFAULT_RETRY_COUNT, DEFAULT_RETRY_DELAY_MS)
    }

    pub fn test() -> Self {
        Self::new_with_constant_backoff(DEFAULT_RETRY_COUNT, TEST_RETRY_DELAY_MS)
    }

    /// Runs `f` as one transaction over `trees`, retrying storage failures
    /// with this config's policy.
    pub fn with_retry<Trees, F, R>(&self, trees: Trees, f: F) -> DbResult<R>
    where
        Trees: SledTransactional,
        F: Fn(Trees::View) -> ConflictableTransactionResult<R, Error>,
    {
        Ok(trees.transaction_with_retry(self.backoff.as_ref(), self.retry_count.into(), f)?)
    }
}

impl Default for SledDbConfig {
    fn default() -> Self {
        Self::production()
    }
}
