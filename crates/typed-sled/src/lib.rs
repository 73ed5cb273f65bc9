//! # typed-sled
//!
//! Schema-typed access to the sled embedded database.
//!
//! A [`Schema`] binds a tree name to a key and a value type. Trees opened
//! through [`SledDb::get_tree`] encode and decode through the schema's
//! [`KeyCodec`] and [`ValueCodec`], so callers never handle raw bytes.
//! Several trees can be written atomically through
//! [`transaction::SledTransactional`].
//!
//! ```rust,no_run
//! use typed_sled::{codec::fixed_bytes, CodecResult, KeyCodec, Schema, SledDb, TreeName, ValueCodec};
//!
//! #[derive(Debug)]
//! struct NonceSchema;
//!
//! impl Schema for NonceSchema {
//!     const TREE_NAME: TreeName = TreeName("nonces");
//!     type Key = u64;
//!     type Value = u64;
//! }
//!
//! impl KeyCodec<NonceSchema> for u64 {
//!     fn encode_key(&self) -> CodecResult<Vec<u8>> {
//!         Ok(self.to_be_bytes().to_vec())
//!     }
//!     fn decode_key(buf: &[u8]) -> CodecResult<Self> {
//!         Ok(u64::from_be_bytes(fixed_bytes::<NonceSchema, 8>(buf)?))
//!     }
//! }
//!
//! impl ValueCodec<NonceSchema> for u64 {
//!     fn encode_value(&self) -> CodecResult<Vec<u8>> {
//!         Ok(self.to_be_bytes().to_vec())
//!     }
//!     fn decode_value(buf: &[u8]) -> CodecResult<Self> {
//!         Ok(u64::from_be_bytes(fixed_bytes::<NonceSchema, 8>(buf)?))
//!     }
//! }
//!
//! # fn main() -> typed_sled::error::Result<()> {
//! let db = SledDb::new(sled::open("nonces-db")?)?;
//! let tree = db.get_tree::<NonceSchema>()?;
//! tree.insert(&1, &42)?;
//! assert_eq!(tree.get(&1)?, Some(42));
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod db;
pub mod error;
pub mod schema;
pub mod transaction;
pub mod tree;

pub use codec::{CodecError, CodecResult, KeyCodec, ValueCodec};
pub use db::SledDb;
pub use schema::{Schema, TreeName};
pub use tree::{SledTransactionalTree, SledTree, SledTreeIter};
