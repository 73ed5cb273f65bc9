//! Backend-agnostic behaviour tests for the relayer database traits.
//!
//! Each `*_tests` module exposes plain `test_*` functions over a trait and a
//! `*_db_tests!` macro that expands them into `#[test]` functions given an
//! expression producing a fresh database.

pub mod arb;
pub mod check_tx_tests;
pub mod gas_subsidy_tests;
pub mod height_tests;
pub mod poly_tx_retry_tests;
pub mod retry_tx_tests;
