#[macro_export]
macro_rules! define_table_without_codec {
    ($(#[$docs:meta])+ ( $table_name:ident ) $key:ty => $value:ty) => {
        $(#[$docs])+
        ///
        #[doc = concat!("Takes [`", stringify!($key), "`] as a key and returns [`", stringify!($value), "`]")]
        #[derive(Clone, Copy, Debug, Default)]
        pub(crate) struct $table_name;

        impl ::typed_sled::Schema for $table_name {
            const TREE_NAME: ::typed_sled::schema::TreeName = ::typed_sled::schema::TreeName($table_name::tree_name());
            type Key = $key;
            type Value = $value;
        }

        impl $table_name {
            const fn tree_name() -> &'static str {
                ::core::stringify!($table_name)
            }
        }

        impl ::std::fmt::Display for $table_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::core::write!(f, "{}", stringify!($table_name))
            }
        }
    };
}

/// Defines a table whose key is written with the order-preserving
/// lexicographic encoding and whose value is borsh.
#[macro_export]
macro_rules! define_table_with_seek_key_codec {
    ($(#[$docs:meta])+ ($table_name:ident) $key:ty => $value:ty) => {
        $crate::define_table_without_codec!($(#[$docs])+ ( $table_name ) $key => $value);
        $crate::impl_seek_key_codec!($table_name, $key);
        $crate::impl_borsh_value_codec!($table_name, $value);
    };
}

#[macro_export]
macro_rules! impl_seek_key_codec {
    ($table_name:ident, $key:ty) => {
        impl ::typed_sled::codec::KeyCodec<$table_name> for $key {
            fn encode_key(&self) -> ::typed_sled::codec::CodecResult<::std::vec::Vec<u8>> {
                Ok($crate::lexicographic::encode_key(self))
            }

            fn decode_key(data: &[u8]) -> ::typed_sled::codec::CodecResult<Self> {
                $crate::lexicographic::decode_key(data).map_err(|err| {
                    ::typed_sled::codec::CodecError::DeserializationFailed {
                        schema: $table_name::tree_name(),
                        source: err.into(),
                    }
                })
            }
        }
    };
}

/// Same encoding as [`impl_seek_key_codec`], for index tables that store a
/// key of another table as their value.
#[macro_export]
macro_rules! impl_seek_value_codec {
    ($table_name:ident, $value:ty) => {
        impl ::typed_sled::codec::ValueCodec<$table_name> for $value {
            fn encode_value(&self) -> ::typed_sled::codec::CodecResult<::std::vec::Vec<u8>> {
                Ok($crate::lexicographic::encode_key(self))
            }

            fn decode_value(data: &[u8]) -> ::typed_sled::codec::CodecResult<Self> {
                $crate::lexicographic::decode_key(data).map_err(|err| {
                    ::typed_sled::codec::CodecError::DeserializationFailed {
                        schema: $table_name::tree_name(),
                        source: err.into(),
                    }
                })
            }
        }
    };
}

#[macro_export]
macro_rules! impl_borsh_value_codec {
    ($table_name:ident, $value:ty) => {
        impl ::typed_sled::codec::ValueCodec<$table_name> for $value {
            fn encode_value(&self) -> ::typed_sled::codec::CodecResult<::std::vec::Vec<u8>> {
                ::borsh::to_vec(self).map_err(|err| {
                    ::typed_sled::codec::CodecError::SerializationFailed {
                        schema: $table_name::tree_name(),
                        source: err.into(),
                    }
                })
            }

            fn decode_value(data: &[u8]) -> ::typed_sled::codec::CodecResult<Self> {
                ::borsh::from_slice(data).map_err(|err| {
                    ::typed_sled::codec::CodecError::DeserializationFailed {
                        schema: $table_name::tree_name(),
                        source: err.into(),
                    }
                })
            }
        }
    };
}

#[macro_export]
macro_rules! impl_bytes_key_codec {
    ($table_name:ident) => {
        impl ::typed_sled::codec::KeyCodec<$table_name> for ::std::vec::Vec<u8> {
            fn encode_key(&self) -> ::typed_sled::codec::CodecResult<::std::vec::Vec<u8>> {
                Ok(self.clone())
            }

            fn decode_key(data: &[u8]) -> ::typed_sled::codec::CodecResult<Self> {
                Ok(data.to_vec())
            }
        }
    };
}

#[macro_export]
macro_rules! impl_bytes_value_codec {
    ($table_name:ident) => {
        impl ::typed_sled::codec::ValueCodec<$table_name> for ::std::vec::Vec<u8> {
            fn encode_value(&self) -> ::typed_sled::codec::CodecResult<::std::vec::Vec<u8>> {
                Ok(self.clone())
            }

            fn decode_value(data: &[u8]) -> ::typed_sled::codec::CodecResult<Self> {
                Ok(data.to_vec())
            }
        }
    };
}

/// Fixed-width integer values, big-endian unless `le` is given.
#[macro_export]
macro_rules! impl_integer_value_codec {
    ($table_name:ident, $int:ty) => {
        $crate::impl_integer_value_codec!($table_name, $int, to_be_bytes, from_be_bytes);
    };
    ($table_name:ident, $int:ty, le) => {
        $crate::impl_integer_value_codec!($table_name, $int, to_le_bytes, from_le_bytes);
    };
    ($table_name:ident, $int:ty, $to:ident, $from:ident) => {
        impl ::typed_sled::codec::ValueCodec<$table_name> for $int {
            fn encode_value(&self) -> ::typed_sled::codec::CodecResult<::std::vec::Vec<u8>> {
                Ok(self.$to().into())
            }

            fn decode_value(buf: &[u8]) -> ::typed_sled::codec::CodecResult<Self> {
                const SIZE: usize = ::std::mem::size_of::<$int>();
                if buf.len() != SIZE {
                    return Err(::typed_sled::codec::CodecError::Other(format!(
                        "invalid value length in '{}' (expected {} bytes, got {})",
                        $table_name::tree_name(),
                        SIZE,
                        buf.len()
                    )));
                }
                let mut bytes = [0u8; SIZE];
                bytes.copy_from_slice(buf);
                Ok(<$int>::$from(bytes))
            }
        }
    };
}

#[macro_export]
macro_rules! sled_db_test_setup {
    ($db_type:ty, $test_macro:ident) => {
        fn setup_db() -> $db_type {
            let db = sled::Config::new().temporary(true).open().unwrap();
            let sled_db = typed_sled::SledDb::new(db).unwrap();
            let config = $crate::SledDbConfig::test();
            <$db_type>::new(sled_db.into(), config).unwrap()
        }

        $test_macro!(setup_db());
    };
}

/// Defines a store over a fixed set of trees, guarded by one lock.
///
/// Writers take `lock` exclusively for the whole transaction; listings and
/// point reads take it shared so they never see a write half-applied across
/// trees.
#[macro_export]
macro_rules! define_sled_database {
    (
        $(#[$meta:meta])*
        pub struct $db_name:ident {
            $($vis:vis $field:ident: $schema:ty),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $db_name {
            $(
                $vis $field: typed_sled::SledTree<$schema>,
            )*
            lock: parking_lot::RwLock<()>,
            config: $crate::SledDbConfig,
        }

        impl $db_name {
            pub fn new(db: std::sync::Arc<typed_sled::SledDb>, config: $crate::SledDbConfig) -> relayer_db_types::DbResult<Self> {
                Ok(Self {
                    $(
                        $field: db.get_tree()?,
                    )*
                    lock: parking_lot::RwLock::new(()),
                    config,
                })
            }
        }
    };
}
