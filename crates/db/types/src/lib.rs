//! Shared types and database interfaces of the relayer persistence layer.

pub mod errors;
pub mod event;
pub mod traits;
pub mod types;

pub use errors::*;
