//! Relay lifecycle records: poly txs, their removal queue and gas subsidies.
//!
//! Gas subsidy selection looks at poly txs, so both share one store and one
//! lock.

pub mod db;
mod gas_subsidy;
mod poly_tx;
mod schemas;
