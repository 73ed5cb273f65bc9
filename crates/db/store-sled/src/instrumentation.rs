//! Instrumentation component identifiers for sled database operations.

/// Component identifiers for tracing spans in sled database operations.
pub mod components {
    /// Store open and tree creation. Fields: path
    pub const DB_SLED_INIT: &str = "db:sled:init";

    /// CheckTxDatabase operations. Fields: tx_hash
    pub const DB_CHECK_TX: &str = "db:sled:check_tx";

    /// RetryTxDatabase operations. Fields: key_len
    pub const DB_RETRY_TX: &str = "db:sled:retry_tx";

    /// HeightDatabase operations. Fields: height
    pub const DB_HEIGHT: &str = "db:sled:height";

    /// PolyTxDatabase operations. Fields: tx_hash, from_chain_id, status
    pub const DB_POLY_TX: &str = "db:sled:poly_tx";

    /// GasSubsidyDatabase operations. Fields: tx_hash, from_chain_id, status
    pub const DB_GAS_SUBSIDY: &str = "db:sled:gas_subsidy";

    /// PolyTxRetryDatabase operations. Fields: tx_hash, from_chain_id
    pub const DB_POLY_TX_RETRY: &str = "db:sled:poly_tx_retry";
}
